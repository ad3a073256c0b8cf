//! Incident categories and the per-edge incident record.

use rn_core::SimTime;

/// A transient, categorised disruption on an edge.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum IncidentKind {
    MinorAccident,
    MajorAccident,
    Breakdown,
    Construction,
    /// Police/fire closure.  Blocks the edge outright.
    EmergencyClosure,
    /// Flooding, ice, downed trees.  Blocks the edge outright.
    WeatherClosure,
}

impl IncidentKind {
    /// All categories, in sampling order.
    pub const ALL: [IncidentKind; 6] = [
        IncidentKind::MinorAccident,
        IncidentKind::MajorAccident,
        IncidentKind::Breakdown,
        IncidentKind::Construction,
        IncidentKind::EmergencyClosure,
        IncidentKind::WeatherClosure,
    ];

    /// Speed multiplier applied on top of the congestion-level factor.
    pub fn speed_multiplier(self) -> f64 {
        match self {
            IncidentKind::MinorAccident => 0.6,
            IncidentKind::MajorAccident => 0.25,
            IncidentKind::Breakdown => 0.7,
            IncidentKind::Construction => 0.5,
            IncidentKind::EmergencyClosure | IncidentKind::WeatherClosure => 0.0,
        }
    }

    /// Capacity multiplier applied on top of the congestion-level factor.
    pub fn capacity_multiplier(self) -> f64 {
        match self {
            IncidentKind::MinorAccident => 0.7,
            IncidentKind::MajorAccident => 0.4,
            IncidentKind::Breakdown => 0.8,
            IncidentKind::Construction => 0.6,
            IncidentKind::EmergencyClosure | IncidentKind::WeatherClosure => 0.0,
        }
    }

    /// Mean duration in simulated minutes; the model jitters around this.
    pub fn mean_duration_min(self) -> u64 {
        match self {
            IncidentKind::MinorAccident => 20,
            IncidentKind::MajorAccident => 45,
            IncidentKind::Breakdown => 15,
            IncidentKind::Construction => 120,
            IncidentKind::EmergencyClosure => 60,
            IncidentKind::WeatherClosure => 90,
        }
    }

    /// Relative weight when sampling a random category.
    pub fn sample_weight(self) -> u32 {
        match self {
            IncidentKind::MinorAccident => 35,
            IncidentKind::MajorAccident => 15,
            IncidentKind::Breakdown => 30,
            IncidentKind::Construction => 10,
            IncidentKind::EmergencyClosure => 5,
            IncidentKind::WeatherClosure => 5,
        }
    }

    /// Closure categories block the edge regardless of congestion level.
    #[inline]
    pub fn is_closure(self) -> bool {
        matches!(
            self,
            IncidentKind::EmergencyClosure | IncidentKind::WeatherClosure
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IncidentKind::MinorAccident => "minor-accident",
            IncidentKind::MajorAccident => "major-accident",
            IncidentKind::Breakdown => "breakdown",
            IncidentKind::Construction => "construction",
            IncidentKind::EmergencyClosure => "emergency-closure",
            IncidentKind::WeatherClosure => "weather-closure",
        }
    }
}

impl std::fmt::Display for IncidentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An active incident on one edge.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Incident {
    pub kind: IncidentKind,
    /// When the matching resolution event clears this incident.  A later
    /// incident overwrites an earlier one, so a resolution firing before
    /// `until` is stale and must be ignored.
    pub until: SimTime,
}

impl Incident {
    /// Minutes left until resolution, zero if already due.
    pub fn remaining(&self, now: SimTime) -> u64 {
        self.until.0.saturating_sub(now.0)
    }
}
