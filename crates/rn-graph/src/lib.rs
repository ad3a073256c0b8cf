//! `rn-graph` — mutable weighted graph store with stable external ids.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`node`]  | `Node`, `NodeKind`, `NodeFlags`                           |
//! | [`edge`]  | `Edge`, `EdgeFlags`                                       |
//! | [`store`] | `Graph` (generational slot arena + adjacency lists)       |
//! | [`error`] | `GraphError`, `GraphResult<T>`                            |
//!
//! # Mutation model (summary)
//!
//! All public access is by stable external [`NodeId`][rn_core::NodeId];
//! internal slot indices are private and invalidated by compaction.  Edge
//! weights are live: the traffic model rewrites them in place and search
//! algorithms re-read them on every query.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on node/edge records.     |

pub mod edge;
pub mod error;
pub mod node;
pub mod store;

#[cfg(test)]
mod tests;

pub use edge::{Edge, EdgeFlags};
pub use error::{GraphError, GraphResult};
pub use node::{Node, NodeFlags, NodeKind};
pub use store::Graph;
