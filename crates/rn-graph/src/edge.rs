//! Edge record and its flag type.

use rn_core::{NodeId, TransportMode};

// ── EdgeFlags ─────────────────────────────────────────────────────────────────

/// Bit-flags describing edge attributes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeFlags(pub u8);

impl EdgeFlags {
    pub const NONE: EdgeFlags = EdgeFlags(0);
    pub const ONE_WAY: EdgeFlags = EdgeFlags(1 << 0);
    pub const TOLL: EdgeFlags = EdgeFlags(1 << 1);
    pub const CONSTRUCTION: EdgeFlags = EdgeFlags(1 << 2);
    /// Temporary closure (e.g. an active emergency incident).
    pub const CLOSED: EdgeFlags = EdgeFlags(1 << 3);

    #[inline]
    pub fn contains(self, other: EdgeFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: EdgeFlags) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: EdgeFlags) {
        self.0 &= !other.0;
    }
}

impl std::ops::BitOr for EdgeFlags {
    type Output = EdgeFlags;
    #[inline]
    fn bitor(self, rhs: EdgeFlags) -> EdgeFlags {
        EdgeFlags(self.0 | rhs.0)
    }
}

// ── Edge ──────────────────────────────────────────────────────────────────────

/// A directed edge between two external node ids.
///
/// `weight` is the **current traversal cost** (simulated minutes) and is the
/// only mutable field in normal operation: the traffic model rewrites it as
/// conditions evolve, and `f64::INFINITY` marks a blocked edge.  `length_m`
/// is the static physical distance and never changes.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    /// Current traversal cost.  `f64::INFINITY` = impassable.
    pub weight: f64,
    /// Physical length in metres.
    pub length_m: f64,
    /// Vehicles per hour the link can carry under free flow.
    pub capacity: u32,
    pub mode: TransportMode,
    pub flags: EdgeFlags,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, weight: f64) -> Self {
        Self {
            from,
            to,
            weight,
            length_m: 0.0,
            capacity: 0,
            mode: TransportMode::default(),
            flags: EdgeFlags::NONE,
        }
    }

    pub fn with_length_m(mut self, length_m: f64) -> Self {
        self.length_m = length_m;
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_mode(mut self, mode: TransportMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_flags(mut self, flags: EdgeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// The same edge travelled in the opposite direction.  Used by the
    /// store to maintain the implicit reverse edge of undirected graphs.
    pub(crate) fn reversed(&self) -> Edge {
        let mut e = self.clone();
        std::mem::swap(&mut e.from, &mut e.to);
        e
    }

    /// `true` if the edge cannot currently be traversed.
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.weight.is_infinite()
    }
}
