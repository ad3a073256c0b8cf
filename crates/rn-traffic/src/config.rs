//! Traffic model configuration.

/// Ambient weather, scaling both congestion growth and incident likelihood.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Fog,
    Snow,
}

impl Weather {
    /// Multiplier applied to the congestion step-up probability and to the
    /// incident probability.  The step-down (recovery) probability is never
    /// scaled — bad weather makes things worsen faster, not recover slower.
    pub fn multiplier(self) -> f64 {
        match self {
            Weather::Clear => 1.0,
            Weather::Rain => 1.4,
            Weather::Fog => 1.6,
            Weather::Snow => 2.0,
        }
    }
}

/// Tuning knobs for the traffic dynamics.
///
/// Rush windows are minute-of-day ranges (inclusive start, exclusive end);
/// the simulation is assumed to start at midnight.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficConfig {
    /// Minutes between consecutive traffic updates of one edge.
    pub update_interval_min: u64,
    /// Morning rush window, minute-of-day.
    pub morning_rush: (u64, u64),
    /// Evening rush window, minute-of-day.
    pub evening_rush: (u64, u64),
    /// Scales the step-up probability inside a rush window.  Only the
    /// worsening probability is scaled; `step_down_prob` applies unchanged
    /// at all times of day.
    pub rush_hour_multiplier: f64,
    pub weather: Weather,
    /// Base probability that one update worsens congestion by one level.
    pub step_up_prob: f64,
    /// Base probability that one update relieves congestion by one level
    /// (evaluated only when the step-up roll fails).
    pub step_down_prob: f64,
    /// Base per-update probability of a fresh incident on an edge.
    pub incident_prob: f64,
    /// Lower bound on any incident duration.
    pub min_incident_duration_min: u64,
    /// Master RNG seed.  The same seed always produces identical dynamics.
    pub seed: u64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            update_interval_min: 5,
            morning_rush: (7 * 60, 9 * 60),
            evening_rush: (16 * 60 + 30, 18 * 60 + 30),
            rush_hour_multiplier: 2.5,
            weather: Weather::Clear,
            step_up_prob: 0.25,
            step_down_prob: 0.35,
            incident_prob: 0.02,
            min_incident_duration_min: 5,
            seed: 0,
        }
    }
}

impl TrafficConfig {
    /// `true` if `minute_of_day` falls inside either rush window.
    pub fn is_rush_hour(&self, minute_of_day: u64) -> bool {
        let in_window = |w: (u64, u64)| minute_of_day >= w.0 && minute_of_day < w.1;
        in_window(self.morning_rush) || in_window(self.evening_rush)
    }
}
