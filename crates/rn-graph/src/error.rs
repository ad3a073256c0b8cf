//! Graph-store error type.

use thiserror::Error;

use rn_core::NodeId;

/// Errors produced by `rn-graph`.
///
/// Expected, recoverable outcomes (duplicate insertions, mutations that
/// reference an unknown id) are reported as `bool`/`Option` returns from the
/// store, not as errors; this enum covers structural validation failures.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("edge {from} -> {to} not found")]
    EdgeNotFound { from: NodeId, to: NodeId },

    #[error("graph inconsistency: {0}")]
    Invalid(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
