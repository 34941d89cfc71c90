use foundation::ids::OverlayId;
use foundation::math::LngLat;

/// Scale of the fixture/web-mercator style projection at zoom 0, used to
/// convert a screen-pixel budget into degrees at a given zoom.
const TILE_PX: f64 = 256.0;

/// Render state for one point of interest's path overlay.
///
/// Created once per visited point of interest and destroyed when zoom
/// drops below `min_zoom_to_show` or the surface is torn down. At most one
/// reveal animation may be active per id; the registry and animator
/// enforce that together.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPath {
    pub id: OverlayId,
    /// Ordered, densified points. Closed overlays repeat the first point
    /// at the end.
    pub points: Vec<LngLat>,
    /// Fraction of the path currently drawn, in `[0, 1]`.
    pub reveal_progress: f64,
    pub color: [f32; 4],
    pub min_zoom_to_show: f64,
}

/// Inserts interpolated points so no segment exceeds `budget_px` on
/// screen at `zoom`.
///
/// Without this the reveal animation visibly jumps segment to segment at
/// high zoom. Non-finite input points are dropped up front; fewer than two
/// finite points come back unchanged.
pub fn densify_for_zoom(points: &[LngLat], zoom: f64, budget_px: f64) -> Vec<LngLat> {
    let finite: Vec<LngLat> = points.iter().copied().filter(|p| p.is_finite()).collect();
    if finite.len() < 2 {
        return finite;
    }

    let px_per_deg = TILE_PX * 2f64.powf(zoom) / 360.0;
    let max_seg_deg = (budget_px / px_per_deg).max(1e-6);

    let mut out = Vec::with_capacity(finite.len());
    out.push(finite[0]);
    for pair in finite.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let dist = a.coarse_distance_deg(b);
        let subdivisions = (dist / max_seg_deg).ceil().max(1.0) as usize;
        for i in 1..=subdivisions {
            out.push(a.lerp(b, i as f64 / subdivisions as f64));
        }
    }
    out
}
