//! `rn-core` — foundational types for the `roadnet` transportation simulation.
//!
//! This crate is a dependency of every other `rn-*` crate.  It intentionally
//! has no `rn-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                            |
//! |---------------|-----------------------------------------------------|
//! | [`ids`]       | `NodeId`, `EventId`                                 |
//! | [`geo`]       | `GeoPoint`, haversine distance                      |
//! | [`time`]      | `SimTime` (simulated minutes)                       |
//! | [`rng`]       | `SimRng` (seeded, deterministic)                    |
//! | [`transport`] | `TransportMode` enum                                |
//! | [`error`]     | `CoreError`, `CoreResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.       |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;
pub mod transport;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{EventId, NodeId};
pub use rng::SimRng;
pub use time::{MINUTES_PER_DAY, SimTime};
pub use transport::TransportMode;
