//! Transportation mode tag carried by every graph edge.

/// The kind of link an edge represents.
///
/// The graph store and search algorithms treat all modes uniformly; the tag
/// exists so converters (e.g. GTFS route types) can round-trip their source
/// classification and so callers can filter edges.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum TransportMode {
    /// General road link (default).
    #[default]
    Road,
    /// Bus route segment.
    Bus,
    /// Heavy rail.
    Rail,
    /// Light rail / tram.
    Tram,
    /// Ferry crossing.
    Ferry,
    /// Pedestrian link.
    Walk,
}

impl TransportMode {
    /// Human-readable label, useful for logs and exports.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Road => "road",
            TransportMode::Bus => "bus",
            TransportMode::Rail => "rail",
            TransportMode::Tram => "tram",
            TransportMode::Ferry => "ferry",
            TransportMode::Walk => "walk",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
