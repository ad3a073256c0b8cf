//! `rn-events` — discrete-event simulation engine.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`event`]  | `Event`, `EventPayload`, `EventSpec`, `Predicate`, `EventKind` |
//! | [`engine`] | `EventEngine` (clock + `(time, priority)` min-queue)       |
//! | [`stats`]  | `EventStats`                                               |
//! | [`error`]  | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! # Processing model (summary)
//!
//! Time advances by jumping to the next scheduled event, never by fixed
//! ticks.  `process_until` / `process_events` are the only long-running
//! calls and are bounded by simulated end time or event count.  All
//! "concurrency" is temporal multiplexing: independent edges' traffic
//! updates interleave as distinct events on one queue, processed strictly
//! in `(time, priority)` order on a single logical thread.

pub mod engine;
pub mod error;
pub mod event;
pub mod stats;


pub use engine::EventEngine;
pub use error::{ScheduleError, ScheduleResult};
pub use event::{DEFAULT_PRIORITY, Event, EventKind, EventPayload, EventSpec, Predicate};
pub use stats::EventStats;
