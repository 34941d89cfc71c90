/// Identifies a point of interest in the external catalog.
///
/// Intentionally a small, copyable handle so it can be pushed through the
/// deterministic registries without heap allocation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoiId(pub u64);

/// Identifies one overlay path's render state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverlayId(pub u64);

/// Identifies one on-screen label in the force simulator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelId(pub u64);
