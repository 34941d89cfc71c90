use std::collections::BTreeMap;

use foundation::easing::ease_in_out_cubic;
use foundation::ids::OverlayId;
use foundation::math::{LngLat, Vec2, wrap_delta_deg};

use crate::surface::{CameraPose, CameraSurface, EaseTo};

/// Base scale of the equirectangular fixture projection at zoom 0.
const TILE_PX: f64 = 256.0;

#[derive(Debug, Clone, PartialEq)]
struct EaseState {
    from_center: LngLat,
    from_zoom: f64,
    target: EaseTo,
    elapsed_s: f64,
}

/// Render state the fixture keeps per path layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FixturePath {
    pub points: Vec<LngLat>,
    pub color: [f32; 4],
    pub levels: Vec<u8>,
    /// How many times `upsert_path` touched this layer.
    pub upserts: u64,
}

/// Deterministic in-memory [`CameraSurface`] for tests.
///
/// Eases are advanced explicitly via [`FixtureCamera::step`], so tests
/// control time frame by frame. Projection is a flat equirectangular
/// mapping centered on the pose, which is plenty for screen-space
/// assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureCamera {
    pose: CameraPose,
    viewport_px: Vec2,
    ease: Option<EaseState>,
    paths: BTreeMap<OverlayId, FixturePath>,
    removed_paths: u64,
}

impl FixtureCamera {
    pub fn new(center: LngLat, zoom: f64) -> Self {
        Self {
            pose: CameraPose::new(center, zoom),
            viewport_px: Vec2::new(1280.0, 720.0),
            ease: None,
            paths: BTreeMap::new(),
            removed_paths: 0,
        }
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.pose.zoom = zoom;
    }

    pub fn set_pitch(&mut self, pitch_deg: f64) {
        self.pose.pitch_deg = pitch_deg;
    }

    pub fn path(&self, id: OverlayId) -> Option<&FixturePath> {
        self.paths.get(&id)
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn removed_path_count(&self) -> u64 {
        self.removed_paths
    }

    /// Pixels per degree of longitude at the current zoom.
    pub fn px_per_deg(&self) -> f64 {
        TILE_PX * 2f64.powf(self.pose.zoom) / 360.0
    }

    /// Advances any in-flight ease by `dt_s`.
    pub fn step(&mut self, dt_s: f64) {
        let Some(ease) = &mut self.ease else {
            return;
        };
        ease.elapsed_s += dt_s.max(0.0);
        let t = if ease.target.duration_s <= 0.0 {
            1.0
        } else {
            (ease.elapsed_s / ease.target.duration_s).min(1.0)
        };
        let k = ease_in_out_cubic(t);
        self.pose.center = ease.from_center.lerp(ease.target.center, k);
        self.pose.zoom = ease.from_zoom + (ease.target.zoom - ease.from_zoom) * k;
        if t >= 1.0 {
            self.pose.center = ease.target.center;
            self.pose.zoom = ease.target.zoom;
            self.ease = None;
        }
    }
}

impl CameraSurface for FixtureCamera {
    fn pose(&self) -> CameraPose {
        self.pose
    }

    fn set_center(&mut self, center: LngLat) {
        self.pose.center = center;
    }

    fn set_bearing(&mut self, bearing_deg: f64) {
        self.pose.bearing_deg = bearing_deg;
    }

    fn ease_to(&mut self, target: EaseTo) {
        self.ease = Some(EaseState {
            from_center: self.pose.center,
            from_zoom: self.pose.zoom,
            target,
            elapsed_s: 0.0,
        });
    }

    fn is_easing(&self) -> bool {
        self.ease.is_some()
    }

    fn project(&self, point: LngLat) -> Option<Vec2> {
        if !point.is_finite() {
            return None;
        }
        let ppd = self.px_per_deg();
        let dx = wrap_delta_deg(self.pose.center.lng, point.lng);
        let dy = point.lat - self.pose.center.lat;
        Some(Vec2::new(
            self.viewport_px.x * 0.5 + dx * ppd,
            self.viewport_px.y * 0.5 - dy * ppd,
        ))
    }

    fn upsert_path(&mut self, id: OverlayId, points: &[LngLat], color: [f32; 4]) {
        let entry = self.paths.entry(id).or_default();
        entry.points = points.to_vec();
        entry.color = color;
        entry.upserts += 1;
    }

    fn set_path_levels(&mut self, id: OverlayId, levels: &[u8]) {
        if let Some(path) = self.paths.get_mut(&id) {
            path.levels = levels.to_vec();
        }
    }

    fn remove_path(&mut self, id: OverlayId) {
        if self.paths.remove(&id).is_some() {
            self.removed_paths += 1;
        }
    }
}
