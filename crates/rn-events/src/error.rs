//! Scheduling precondition errors.
//!
//! These are caller programming errors, rejected synchronously at the call
//! site; a rejected event never enters the queue.  Failures *inside* an
//! event's execution are not errors at this level — the engine logs and
//! keeps processing.

use thiserror::Error;

use rn_core::SimTime;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("cannot schedule event at {scheduled}, clock is already at {now}")]
    PastEvent { scheduled: SimTime, now: SimTime },

    #[error("negative scheduling delay: {0}")]
    NegativeDelay(i64),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
