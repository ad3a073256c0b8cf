//! Strongly typed, zero-cost identifier wrappers.
//!
//! `NodeId` is an *external* identifier: stable, caller-assigned, and the
//! only handle the rest of the system ever sees.  Internal graph slots are
//! private to `rn-graph` and never leak through public APIs.  All IDs are
//! `Copy + Ord + Hash` so they can be used as map keys and sorted collection
//! elements without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to the max value.
            pub const INVALID: $name = $name(<$inner>::MAX);
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> $name {
                $name(raw)
            }
        }
    };
}

typed_id! {
    /// Stable external identifier of a network node.  Assigned by the caller
    /// (e.g. a GTFS stop converter) and never recycled by the graph store.
    pub struct NodeId(u64);
}

typed_id! {
    /// Monotonically increasing identifier assigned to each scheduled event.
    pub struct EventId(u64);
}
