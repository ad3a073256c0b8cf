//! Per-edge traffic state.

use rn_core::SimTime;

use crate::incident::Incident;
use crate::level::CongestionLevel;

/// The traffic condition of one edge.
///
/// Initialised to free-flow / no incident at simulation start; mutated only
/// by scheduled traffic-update and incident-resolution events (plus manual
/// incident triggers).  Search algorithms never touch this — they see only
/// the effective weight the model pushes into the graph store.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeTraffic {
    pub level: CongestionLevel,
    pub incident: Option<Incident>,
    /// Combined speed factor (congestion level × incident), in [0, 1].
    pub speed_factor: f64,
    /// Combined capacity factor, in [0, 1].
    pub capacity_factor: f64,
    /// Edge weight captured at `initialize()` time; restored by `reset()`.
    pub original_weight: f64,
}

impl EdgeTraffic {
    pub fn new(original_weight: f64) -> Self {
        Self {
            level: CongestionLevel::FreeFlow,
            incident: None,
            speed_factor: 1.0,
            capacity_factor: 1.0,
            original_weight,
        }
    }

    /// Recompute the combined factors from the congestion level and any
    /// active incident.
    pub(crate) fn recompute_factors(&mut self) {
        self.speed_factor = self.level.speed_factor();
        self.capacity_factor = self.level.capacity_factor();
        if let Some(incident) = &self.incident {
            self.speed_factor *= incident.kind.speed_multiplier();
            self.capacity_factor *= incident.kind.capacity_multiplier();
        }
    }

    /// An edge is blocked when nothing can move (zero speed factor) or a
    /// closure-class incident is active.
    pub fn is_blocked(&self) -> bool {
        self.speed_factor == 0.0
            || self.incident.is_some_and(|i| i.kind.is_closure())
    }

    /// The traversal cost to push into the graph store: the original weight
    /// inflated by the slowdown, or infinite when blocked.
    pub fn effective_weight(&self) -> f64 {
        if self.is_blocked() {
            f64::INFINITY
        } else {
            self.original_weight / self.speed_factor
        }
    }

    /// Minutes left on the active incident, if any.
    pub fn incident_remaining(&self, now: SimTime) -> u64 {
        self.incident.map_or(0, |i| i.remaining(now))
    }
}
