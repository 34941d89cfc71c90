use std::collections::BTreeMap;

use foundation::ids::PoiId;
use foundation::math::LngLat;
use overlay::SignalZone;

/// What a point of interest labels on the map.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PoiKind {
    Team,
    Circuit,
}

/// Normalized marker-selection event handed to the UI layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    pub kind: PoiKind,
    pub id: PoiId,
}

/// Overlay geometry and styling for one point of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct PoiOverlay {
    pub center: LngLat,
    pub points: Vec<LngLat>,
    pub color: [f32; 4],
    /// Pulse zones over the revealed path. Empty means one full-path zone.
    pub zones: Vec<SignalZone>,
}

/// The external catalog, interface only: the engine asks for overlay
/// geometry per id and treats `None` as "no overlay available".
pub trait PoiSource {
    fn overlay(&self, id: PoiId) -> Option<PoiOverlay>;
}

/// Map-backed source for tests and simple hosts.
#[derive(Debug, Default)]
pub struct StaticPoiSource {
    overlays: BTreeMap<PoiId, PoiOverlay>,
}

impl StaticPoiSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: PoiId, overlay: PoiOverlay) {
        self.overlays.insert(id, overlay);
    }
}

impl PoiSource for StaticPoiSource {
    fn overlay(&self, id: PoiId) -> Option<PoiOverlay> {
        self.overlays.get(&id).cloned()
    }
}
