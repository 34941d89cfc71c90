pub mod bands;
pub mod occlusion;

pub use bands::*;
pub use occlusion::*;

use foundation::math::LngLat;

/// Final marker visibility: in a visible zoom band and not behind the globe.
pub fn is_visible(zoom: f64, entity: LngLat, camera_center: LngLat, pitch_deg: f64) -> bool {
    band(zoom) != VisibilityBand::Hidden && !is_occluded(entity, camera_center, pitch_deg, zoom)
}

#[cfg(test)]
mod tests {
    use super::is_visible;
    use foundation::math::LngLat;

    #[test]
    fn hidden_band_wins_over_front_facing() {
        let p = LngLat::new(0.0, 0.0);
        assert!(is_visible(3.0, p, p, 0.0));
        assert!(!is_visible(15.0, p, p, 0.0));
    }

    #[test]
    fn occlusion_wins_over_visible_band() {
        let center = LngLat::new(0.0, 0.0);
        let far_side = LngLat::new(180.0, 0.0);
        assert!(!is_visible(3.0, far_side, center, 0.0));
    }
}
