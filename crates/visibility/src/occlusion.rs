use foundation::math::{LngLat, wrap_delta_deg};

/// Above this zoom the surface has left the globe projection and nothing
/// is ever back-face occluded.
pub const GLOBE_PROJECTION_MAX_ZOOM: f64 = 6.0;

/// Half-window of longitude visible around the camera center.
const BASE_HALF_WINDOW_DEG: f64 = 90.0;

/// Widening/narrowing of the window per degree of camera pitch.
const PITCH_ASYMMETRY: f64 = 0.35;

/// Back-face test for a globe-projected camera.
///
/// A longitude-delta heuristic rather than real sphere math: an entity is
/// occluded when its wrapped longitude delta from the camera center
/// exceeds a ~90 degree half-window. Pitching the camera tilts the horizon,
/// showing more of the hemisphere on the far side of the tilt, so the
/// window widens for entities poleward of the center (in the pitch
/// direction) and narrows for the opposite side.
///
/// Only meaningful while the camera is in the globe-projection zoom range;
/// outside it the surface is a flat map and this always returns `false`.
pub fn is_occluded(entity: LngLat, camera_center: LngLat, pitch_deg: f64, zoom: f64) -> bool {
    if zoom >= GLOBE_PROJECTION_MAX_ZOOM {
        return false;
    }

    let dlng = wrap_delta_deg(camera_center.lng, entity.lng).abs();
    let north_of_center = entity.lat >= camera_center.lat;
    let asym = pitch_deg.max(0.0) * PITCH_ASYMMETRY;
    let half_window = if north_of_center {
        BASE_HALF_WINDOW_DEG + asym
    } else {
        BASE_HALF_WINDOW_DEG - asym
    }
    .clamp(45.0, 135.0);

    dlng > half_window
}
