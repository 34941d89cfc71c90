use std::collections::BTreeMap;

use camera::CameraSurface;
use foundation::ids::OverlayId;
use runtime::{EventBus, Frame};

use crate::path::OverlayPath;

/// Registry of alive overlay render state, owned by one camera-surface
/// session and injected where needed.
///
/// Deliberately not a module-level singleton: multiple independent
/// visualizations (and unit tests) each get their own registry.
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    overlays: BTreeMap<OverlayId, OverlayPath>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: OverlayId) -> bool {
        self.overlays.contains_key(&id)
    }

    pub fn get(&self, id: OverlayId) -> Option<&OverlayPath> {
        self.overlays.get(&id)
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn insert(&mut self, path: OverlayPath) {
        self.overlays.insert(path.id, path);
    }

    /// Removes one overlay's render state from the registry and surface.
    pub fn remove(&mut self, id: OverlayId, surface: &mut dyn CameraSurface) -> bool {
        if self.overlays.remove(&id).is_some() {
            surface.remove_path(id);
            return true;
        }
        false
    }

    /// Zoom-gated lifecycle: destroys every overlay whose `min_zoom_to_show`
    /// the camera has dropped below. Returns the evicted ids.
    pub fn evict_below_zoom(
        &mut self,
        frame: Frame,
        zoom: f64,
        surface: &mut dyn CameraSurface,
        bus: &mut EventBus,
    ) -> Vec<OverlayId> {
        let evicted: Vec<OverlayId> = self
            .overlays
            .values()
            .filter(|p| zoom < p.min_zoom_to_show)
            .map(|p| p.id)
            .collect();
        for id in &evicted {
            self.overlays.remove(id);
            surface.remove_path(*id);
            bus.trace(frame, "overlay", format!("evicted {:?} at zoom {zoom:.2}", id));
        }
        evicted
    }

    /// Tears down all render state.
    pub fn clear(&mut self, surface: &mut dyn CameraSurface) {
        for id in self.overlays.keys().copied().collect::<Vec<_>>() {
            surface.remove_path(id);
        }
        self.overlays.clear();
    }
}
