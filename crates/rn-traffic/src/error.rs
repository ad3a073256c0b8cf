//! Traffic-subsystem error type.

use thiserror::Error;

use rn_core::NodeId;
use rn_events::ScheduleError;

/// Errors produced by `rn-traffic`.
#[derive(Debug, Error)]
pub enum TrafficError {
    #[error("edge {from} -> {to} is not tracked by the traffic model")]
    EdgeNotTracked { from: NodeId, to: NodeId },

    #[error("scheduling failed: {0}")]
    Schedule(#[from] ScheduleError),
}

pub type TrafficResult<T> = Result<T, TrafficError>;
