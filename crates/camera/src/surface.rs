use foundation::ids::OverlayId;
use foundation::math::{LngLat, Vec2};

/// Read-only snapshot of the camera.
///
/// The rendering surface stays the source of truth; the engine reads a
/// pose per tick and issues mutations through [`CameraSurface`], never
/// caching its own copy.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub center: LngLat,
    pub zoom: f64,
    pub bearing_deg: f64,
    pub pitch_deg: f64,
}

impl CameraPose {
    pub fn new(center: LngLat, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            bearing_deg: 0.0,
            pitch_deg: 0.0,
        }
    }
}

/// Eased camera transition request.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EaseTo {
    pub center: LngLat,
    pub zoom: f64,
    pub duration_s: f64,
}

/// The narrow interface the engine consumes from the external map/camera
/// rendering surface.
///
/// Projection math, tile rendering and input capture all live behind this
/// trait; the engine only reads the pose, requests mutations, and manages
/// path render layers. `set_path_levels` carries per-point pulse intensity
/// in `0..=3`.
pub trait CameraSurface {
    fn pose(&self) -> CameraPose;

    fn set_center(&mut self, center: LngLat);
    fn set_bearing(&mut self, bearing_deg: f64);

    /// Starts an eased transition; replaces any transition in flight.
    fn ease_to(&mut self, target: EaseTo);
    fn is_easing(&self) -> bool;

    /// World to screen pixels. `None` while the point cannot be projected
    /// (behind the globe, surface mid-resize, etc.).
    fn project(&self, point: LngLat) -> Option<Vec2>;

    fn upsert_path(&mut self, id: OverlayId, points: &[LngLat], color: [f32; 4]);
    fn set_path_levels(&mut self, id: OverlayId, levels: &[u8]);
    fn remove_path(&mut self, id: OverlayId);
}
