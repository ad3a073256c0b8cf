//! `rn-traffic` — time-varying road conditions over a graph store.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`level`]    | `CongestionLevel` ordinal + factor lookup               |
//! | [`incident`] | `IncidentKind`, `Incident`                              |
//! | [`state`]    | `EdgeTraffic` per-edge state                            |
//! | [`config`]   | `TrafficConfig`, `Weather`                              |
//! | [`model`]    | `TrafficModel` (event-driven dynamics)                  |
//! | [`error`]    | `TrafficError`, `TrafficResult<T>`                      |
//!
//! # Data flow (summary)
//!
//! The event engine drives the model; the model writes effective weights
//! into the graph store; routing reads the store on demand.  There is no
//! reverse flow — routing results never feed back into the simulation.

pub mod config;
pub mod error;
pub mod incident;
pub mod level;
pub mod model;
pub mod state;

#[cfg(test)]
mod tests;

pub use config::{TrafficConfig, Weather};
pub use error::{TrafficError, TrafficResult};
pub use incident::{Incident, IncidentKind};
pub use level::CongestionLevel;
pub use model::TrafficModel;
pub use state::EdgeTraffic;
