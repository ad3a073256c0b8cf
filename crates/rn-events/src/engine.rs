//! The event engine: a monotonic clock plus a `(time, priority)` min-queue.
//!
//! # Ordering
//!
//! Pending events are ordered by `(time, priority)` ascending — among
//! events at the same time, the lower priority value fires first,
//! regardless of insertion order.  Events equal on both keys fall back to
//! schedule order via the engine-assigned sequence; callers must not rely
//! on that last tiebreak.
//!
//! # Failure containment
//!
//! Anything that goes wrong while executing a payload (e.g. a recurring
//! event failing to re-enqueue) is logged via `log::warn!` and swallowed —
//! one bad event never halts the simulation.  Only scheduling
//! preconditions ([`ScheduleError`]) surface to callers, synchronously.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use rn_core::{EventId, SimTime};

use crate::error::{ScheduleError, ScheduleResult};
use crate::event::{Event, EventKind, EventPayload, Predicate};
use crate::stats::EventStats;

// ── Heap entry ────────────────────────────────────────────────────────────────

/// Queue entry; ordering key is `(time, priority, id)`.
struct Pending(Event);

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.0.time, self.0.priority, self.0.id)
            .cmp(&(other.0.time, other.0.priority, other.0.id))
    }
}

// ── EventEngine ───────────────────────────────────────────────────────────────

/// Discrete-event engine.  Simulated time advances only by popping events
/// (or by explicit `process_until` bounds); there is no wall-clock pacing.
pub struct EventEngine {
    now: SimTime,
    // Reverse makes the std max-heap behave as a min-heap.
    queue: BinaryHeap<Reverse<Pending>>,
    next_id: u64,
    /// Named counters owned by the engine, mutated by `Counter` payloads.
    counters: FxHashMap<String, i64>,
    stats: EventStats,
}

impl EventEngine {
    pub fn new() -> Self {
        Self {
            now: SimTime::ZERO,
            queue: BinaryHeap::new(),
            next_id: 0,
            counters: FxHashMap::default(),
            stats: EventStats::default(),
        }
    }

    /// Current simulation time.  Monotonically non-decreasing.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Number of events waiting in the queue.
    #[inline]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Lifetime statistics (scheduled / processed / cancelled / per-kind).
    pub fn stats(&self) -> &EventStats {
        &self.stats
    }

    /// Current value of a named counter (0 if never touched).
    pub fn counter(&self, name: &str) -> i64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    // ── Scheduling ────────────────────────────────────────────────────────

    /// Schedule a payload at an absolute time.
    ///
    /// Rejects times before the current clock — a past event would violate
    /// monotonicity and is a caller bug, not a queueable request.
    pub fn schedule(
        &mut self,
        time: SimTime,
        priority: u8,
        payload: EventPayload,
    ) -> ScheduleResult<EventId> {
        if time < self.now {
            return Err(ScheduleError::PastEvent {
                scheduled: time,
                now: self.now,
            });
        }
        let id = EventId(self.next_id);
        self.next_id += 1;
        self.stats.scheduled += 1;
        self.queue.push(Reverse(Pending(Event {
            id,
            time,
            priority,
            payload,
        })));
        Ok(id)
    }

    /// Schedule a payload `delay` minutes from now.  Rejects negative
    /// delays.
    pub fn schedule_after(
        &mut self,
        delay: i64,
        priority: u8,
        payload: EventPayload,
    ) -> ScheduleResult<EventId> {
        if delay < 0 {
            return Err(ScheduleError::NegativeDelay(delay));
        }
        self.schedule(self.now.offset(delay as u64), priority, payload)
    }

    // ── Processing ────────────────────────────────────────────────────────

    /// The next event to fire, without removing it.
    pub fn peek_next(&self) -> Option<&Event> {
        self.queue.peek().map(|Reverse(p)| &p.0)
    }

    /// Pop the minimum event, advance the clock to its time, execute its
    /// intrinsic behaviour, and return it.
    ///
    /// Domain payloads (`TrafficUpdate`, `IncidentResolution`) are returned
    /// unexecuted for the owning model to dispatch.
    pub fn process_next(&mut self) -> Option<Event> {
        let Reverse(Pending(event)) = self.queue.pop()?;
        debug_assert!(event.time >= self.now, "queue yielded a past event");
        self.now = event.time;
        self.stats.record_processed(event.kind());
        self.execute(event.time, event.priority, &event.payload);
        Some(event)
    }

    /// Process every event with `time <= end`, then advance the clock to
    /// `end` even if nothing fired.  Returns the number of events processed.
    pub fn process_until(&mut self, end: SimTime) -> usize {
        let mut processed = 0;
        while self.peek_next().is_some_and(|e| e.time <= end) {
            self.process_next();
            processed += 1;
        }
        if end > self.now {
            self.now = end;
        }
        processed
    }

    /// Process at most `max_count` events.  Returns the number processed
    /// (less than `max_count` only if the queue drained).
    pub fn process_events(&mut self, max_count: usize) -> usize {
        let mut processed = 0;
        while processed < max_count && self.process_next().is_some() {
            processed += 1;
        }
        processed
    }

    /// Remove all pending events of the given kind; returns how many were
    /// dropped.  Implemented as a drain-and-reinsert of the survivors.
    pub fn cancel_by_kind(&mut self, kind: EventKind) -> usize {
        let drained = std::mem::take(&mut self.queue);
        let mut removed = 0;
        for entry in drained {
            if entry.0.0.kind() == kind {
                removed += 1;
            } else {
                self.queue.push(entry);
            }
        }
        self.stats.cancelled += removed as u64;
        removed
    }

    // ── Intrinsic execution ───────────────────────────────────────────────

    fn execute(&mut self, time: SimTime, priority: u8, payload: &EventPayload) {
        match payload {
            EventPayload::Message { text } => {
                log::info!("[{time}] {text}");
            }

            EventPayload::Counter { name, delta } => {
                *self.counters.entry(name.clone()).or_insert(0) += delta;
            }

            EventPayload::Recurring {
                label,
                interval,
                remaining,
            } => {
                // This firing consumed one iteration; clone with the count
                // decremented until the series is exhausted.
                if *remaining > 1 {
                    let next = EventPayload::Recurring {
                        label: label.clone(),
                        interval: *interval,
                        remaining: remaining - 1,
                    };
                    if let Err(e) = self.schedule(time.offset(*interval), priority, next) {
                        log::warn!("recurring event '{label}' failed to re-enqueue: {e}");
                    }
                }
            }

            EventPayload::Trigger { batch } => {
                // Materialise the held descriptions at this event's own
                // fire time.
                for spec in batch {
                    if let Err(e) = self.schedule(time, spec.priority, spec.payload.clone()) {
                        log::warn!("trigger batch member failed to enqueue: {e}");
                    }
                }
            }

            EventPayload::Conditional { predicate, inner } => {
                if self.predicate_holds(predicate) {
                    match inner.as_ref() {
                        // Domain payloads cannot run inside the engine;
                        // surface them on the queue so the owning model
                        // pops them at this same time.
                        p @ (EventPayload::TrafficUpdate { .. }
                        | EventPayload::IncidentResolution { .. }) => {
                            if let Err(e) = self.schedule(time, priority, p.clone()) {
                                log::warn!("conditional inner event failed to enqueue: {e}");
                            }
                        }
                        p => self.execute(time, priority, p),
                    }
                }
            }

            // Inert here; the traffic model dispatches these.
            EventPayload::TrafficUpdate { .. } | EventPayload::IncidentResolution { .. } => {}
        }
    }

    fn predicate_holds(&self, predicate: &Predicate) -> bool {
        match predicate {
            Predicate::Always => true,
            Predicate::TimeAtLeast(t) => self.now >= *t,
            Predicate::CounterAtLeast { name, value } => self.counter(name) >= *value,
        }
    }
}

impl Default for EventEngine {
    fn default() -> Self {
        Self::new()
    }
}
