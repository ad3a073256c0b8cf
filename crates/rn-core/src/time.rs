//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically non-decreasing count of **simulated minutes**
//! since the start of the run.  Using an integer minute as the canonical
//! unit means all event-schedule arithmetic is exact (no floating-point
//! drift) and comparisons are O(1).  The minute resolution matches the
//! traffic model, whose update interval and incident durations are whole
//! minutes.
//!
//! Time only advances by event processing: the event engine sets its clock
//! to the timestamp of the event it pops.  There is no wall-clock pacing.

use std::fmt;

/// Simulated minutes in one day.
pub const MINUTES_PER_DAY: u64 = 24 * 60;

/// An absolute simulation timestamp in minutes since the start of the run.
///
/// Stored as `u64`: at one-minute resolution that is ~35 billion simulated
/// years, so overflow is not a practical concern.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// Return the timestamp `n` minutes after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> SimTime {
        SimTime(self.0 + n)
    }

    /// Minute within the simulated day, in `0..1440`.
    ///
    /// The run is assumed to start at midnight; rush-hour windows in the
    /// traffic model are expressed against this value.
    #[inline]
    pub fn minute_of_day(self) -> u64 {
        self.0 % MINUTES_PER_DAY
    }

    /// Minutes elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0 - earlier.0
    }

    /// Break the timestamp into (day, hour, minute) components.
    pub fn dhm(self) -> (u64, u32, u32) {
        let days = self.0 / MINUTES_PER_DAY;
        let hours = ((self.0 % MINUTES_PER_DAY) / 60) as u32;
        let minutes = (self.0 % 60) as u32;
        (days, hours, minutes)
    }
}

impl std::ops::Add<u64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: SimTime) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.dhm();
        write!(f, "T{} (day {} {:02}:{:02})", self.0, d, h, m)
    }
}
