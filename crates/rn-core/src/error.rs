//! Framework error type.
//!
//! Sub-crates define their own error enums (`GraphError`, `ScheduleError`,
//! `TrafficError`, `RoutingError`) and keep them separate; `CoreError`
//! covers the small set of failures shared across crates.

use thiserror::Error;

use crate::NodeId;

/// The top-level error type for `rn-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `rn-core` consumers.
pub type CoreResult<T> = Result<T, CoreError>;
