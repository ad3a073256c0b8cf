//! Discrete congestion levels and their factor lookup table.

/// Five-level ordinal describing traffic density on an edge.
///
/// Ordering is meaningful: `FreeFlow < Light < ... < Gridlock`, and the
/// stochastic update steps at most one level per firing.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CongestionLevel {
    #[default]
    FreeFlow,
    Light,
    Moderate,
    Heavy,
    Gridlock,
}

impl CongestionLevel {
    /// Fraction of free-flow speed attainable at this level.
    pub fn speed_factor(self) -> f64 {
        match self {
            CongestionLevel::FreeFlow => 1.0,
            CongestionLevel::Light => 0.8,
            CongestionLevel::Moderate => 0.6,
            CongestionLevel::Heavy => 0.3,
            CongestionLevel::Gridlock => 0.05,
        }
    }

    /// Fraction of nominal capacity available at this level.
    pub fn capacity_factor(self) -> f64 {
        match self {
            CongestionLevel::FreeFlow => 1.0,
            CongestionLevel::Light => 0.9,
            CongestionLevel::Moderate => 0.75,
            CongestionLevel::Heavy => 0.5,
            CongestionLevel::Gridlock => 0.1,
        }
    }

    /// One level worse, saturating at `Gridlock`.
    pub fn step_up(self) -> CongestionLevel {
        match self {
            CongestionLevel::FreeFlow => CongestionLevel::Light,
            CongestionLevel::Light => CongestionLevel::Moderate,
            CongestionLevel::Moderate => CongestionLevel::Heavy,
            CongestionLevel::Heavy | CongestionLevel::Gridlock => CongestionLevel::Gridlock,
        }
    }

    /// One level better, saturating at `FreeFlow`.
    pub fn step_down(self) -> CongestionLevel {
        match self {
            CongestionLevel::FreeFlow | CongestionLevel::Light => CongestionLevel::FreeFlow,
            CongestionLevel::Moderate => CongestionLevel::Light,
            CongestionLevel::Heavy => CongestionLevel::Moderate,
            CongestionLevel::Gridlock => CongestionLevel::Heavy,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CongestionLevel::FreeFlow => "free-flow",
            CongestionLevel::Light => "light",
            CongestionLevel::Moderate => "moderate",
            CongestionLevel::Heavy => "heavy",
            CongestionLevel::Gridlock => "gridlock",
        }
    }
}

impl std::fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
