//! Event types.
//!
//! # Ownership model
//!
//! The engine's queue is the **sole owner** of every pending event.  Where a
//! shared-ownership design would hold live references (e.g. a trigger event
//! pointing at the sub-events it will fire), this model holds *descriptions*
//! ([`EventSpec`]) and materialises them into the queue only at fire time.
//! "Clone for rescheduling" is just constructing a new payload value with an
//! updated iteration count — no deep-copy machinery.

use rn_core::{EventId, NodeId, SimTime};

/// Priority used when the caller doesn't care.  Lower value fires first
/// among events scheduled for the same time.
pub const DEFAULT_PRIORITY: u8 = 5;

// ── EventKind ─────────────────────────────────────────────────────────────────

/// Type tag of an event, used for cancellation and per-kind statistics.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EventKind {
    Message,
    Counter,
    Recurring,
    Trigger,
    Conditional,
    TrafficUpdate,
    IncidentResolution,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Message => "message",
            EventKind::Counter => "counter",
            EventKind::Recurring => "recurring",
            EventKind::Trigger => "trigger",
            EventKind::Conditional => "conditional",
            EventKind::TrafficUpdate => "traffic-update",
            EventKind::IncidentResolution => "incident-resolution",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Predicate ─────────────────────────────────────────────────────────────────

/// Condition evaluated against engine state at a conditional event's fire
/// time.  Data-only so events stay cloneable and inspectable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Predicate {
    /// Always fires.
    Always,
    /// Fires if the clock has reached the given time.
    TimeAtLeast(SimTime),
    /// Fires if the named engine counter has reached `value`.
    CounterAtLeast { name: String, value: i64 },
}

// ── EventPayload ──────────────────────────────────────────────────────────────

/// What an event does when it fires.
///
/// The first five variants are *intrinsic*: the engine executes them itself
/// during [`process_next`][crate::EventEngine::process_next].  The traffic
/// variants are *domain* payloads: inert inside the engine, dispatched by
/// the traffic model that scheduled them.
#[derive(Clone, Debug, PartialEq)]
pub enum EventPayload {
    /// Log a message.
    Message { text: String },
    /// Add `delta` to the engine-owned counter `name`.
    Counter { name: String, delta: i64 },
    /// Re-enqueue a copy of itself at `time + interval` until `remaining`
    /// executions are exhausted.  `remaining` counts the execution that is
    /// currently happening, so a value of N fires exactly N times.  A value
    /// of 0 behaves like 1: the event is already in the queue when the
    /// count is read, so its one pop still happens and nothing is
    /// re-enqueued.
    Recurring {
        label: String,
        interval: u64,
        remaining: u32,
    },
    /// Enqueue the described batch of sub-events at this event's fire time.
    Trigger { batch: Vec<EventSpec> },
    /// Execute `inner` only if `predicate` holds at fire time.
    Conditional {
        predicate: Predicate,
        inner: Box<EventPayload>,
    },
    /// Periodic traffic-state update for one edge.  Handled by `rn-traffic`.
    TrafficUpdate { from: NodeId, to: NodeId },
    /// Clears the active incident on one edge.  Handled by `rn-traffic`.
    IncidentResolution { from: NodeId, to: NodeId },
}

impl EventPayload {
    /// The payload's type tag.
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::Message { .. } => EventKind::Message,
            EventPayload::Counter { .. } => EventKind::Counter,
            EventPayload::Recurring { .. } => EventKind::Recurring,
            EventPayload::Trigger { .. } => EventKind::Trigger,
            EventPayload::Conditional { .. } => EventKind::Conditional,
            EventPayload::TrafficUpdate { .. } => EventKind::TrafficUpdate,
            EventPayload::IncidentResolution { .. } => EventKind::IncidentResolution,
        }
    }
}

// ── EventSpec ─────────────────────────────────────────────────────────────────

/// Description of an event not yet in the queue.  Trigger batches hold
/// these; the engine assigns time (the trigger's fire time) and an id when
/// the batch is materialised.
#[derive(Clone, Debug, PartialEq)]
pub struct EventSpec {
    pub priority: u8,
    pub payload: EventPayload,
}

impl EventSpec {
    pub fn new(payload: EventPayload) -> Self {
        Self {
            priority: DEFAULT_PRIORITY,
            payload,
        }
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }
}

// ── Event ─────────────────────────────────────────────────────────────────────

/// A scheduled event.  Ids are assigned monotonically by the engine at
/// schedule time and are unique within one engine instance.
#[derive(Clone, Debug)]
pub struct Event {
    pub id: EventId,
    pub time: SimTime,
    pub priority: u8,
    pub payload: EventPayload,
}

impl Event {
    #[inline]
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }
}
