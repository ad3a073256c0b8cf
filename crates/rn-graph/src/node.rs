//! Node record and its classification/flag types.

use rn_core::{GeoPoint, NodeId};

// ── NodeKind ──────────────────────────────────────────────────────────────────

/// Coarse classification of a network node.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum NodeKind {
    /// Plain road intersection (default).
    #[default]
    Intersection,
    /// Surface transit stop.
    Stop,
    /// Rail or multi-modal station.
    Station,
    /// Point of interest attached to the network.
    Poi,
}

// ── NodeFlags ─────────────────────────────────────────────────────────────────

/// Bit-flags describing node attributes.
///
/// A plain `u8` newtype rather than a `bitflags!` macro — three flags don't
/// justify the dependency, and the combinators below cover every use site.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeFlags(pub u8);

impl NodeFlags {
    pub const NONE: NodeFlags = NodeFlags(0);
    /// Wheelchair-accessible.
    pub const ACCESSIBLE: NodeFlags = NodeFlags(1 << 0);
    /// Signalised intersection.
    pub const TRAFFIC_LIGHT: NodeFlags = NodeFlags(1 << 1);
    /// Designated transfer point between modes.
    pub const TRANSFER: NodeFlags = NodeFlags(1 << 2);

    #[inline]
    pub fn contains(self, other: NodeFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: NodeFlags) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: NodeFlags) {
        self.0 &= !other.0;
    }
}

impl std::ops::BitOr for NodeFlags {
    type Output = NodeFlags;
    #[inline]
    fn bitor(self, rhs: NodeFlags) -> NodeFlags {
        NodeFlags(self.0 | rhs.0)
    }
}

// ── Node ──────────────────────────────────────────────────────────────────────

/// A network node, addressed by its stable external [`NodeId`].
///
/// `degree` is the count of outgoing edges currently stored for this node.
/// It is maintained by the graph store on every mutation; callers read it
/// through [`Node::degree`] but cannot write it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub pos: GeoPoint,
    pub kind: NodeKind,
    pub flags: NodeFlags,
    pub(crate) degree: u32,
}

impl Node {
    pub fn new(id: NodeId, pos: GeoPoint) -> Self {
        Self {
            id,
            pos,
            kind: NodeKind::default(),
            flags: NodeFlags::NONE,
            degree: 0,
        }
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Number of outgoing edges currently stored for this node.
    #[inline]
    pub fn degree(&self) -> u32 {
        self.degree
    }
}
