//! Read-only engine statistics.

use rustc_hash::FxHashMap;

use crate::event::EventKind;

/// Lifetime counters for one engine instance.
///
/// `scheduled - processed - cancelled` always equals the number of events
/// still pending in the queue.
#[derive(Debug, Default, Clone)]
pub struct EventStats {
    /// Events accepted by `schedule`/`schedule_after` (including events the
    /// engine enqueued on behalf of recurring and trigger payloads).
    pub scheduled: u64,
    /// Events popped and executed.
    pub processed: u64,
    /// Events removed by kind-based cancellation.
    pub cancelled: u64,
    /// Processed events broken down by type tag.
    per_kind: FxHashMap<EventKind, u64>,
}

impl EventStats {
    pub(crate) fn record_processed(&mut self, kind: EventKind) {
        self.processed += 1;
        *self.per_kind.entry(kind).or_insert(0) += 1;
    }

    /// Processed events of the given kind.
    pub fn processed_of(&self, kind: EventKind) -> u64 {
        self.per_kind.get(&kind).copied().unwrap_or(0)
    }
}
