//! Routing error type.
//!
//! "No path exists" is not an error — it is an empty path / `None` result.
//! The only failure mode is querying with an id the graph doesn't know.

use thiserror::Error;

use rn_core::NodeId;

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
