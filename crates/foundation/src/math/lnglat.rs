use super::angles::wrap_longitude;

/// Geographic position in degrees.
///
/// Longitude is kept wrapped to `[-180, 180)`; latitude is clamped to the
/// poles. Constructors enforce both so downstream math never sees an
/// out-of-domain coordinate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self {
            lng: wrap_longitude(lng),
            lat: lat.clamp(-90.0, 90.0),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.lng.is_finite() && self.lat.is_finite()
    }

    /// Linear interpolation in coordinate space, taking the short way
    /// around the antimeridian in longitude.
    pub fn lerp(self, other: LngLat, t: f64) -> LngLat {
        let t = t.clamp(0.0, 1.0);
        let dl = wrap_longitude(other.lng - self.lng);
        LngLat::new(self.lng + dl * t, self.lat + (other.lat - self.lat) * t)
    }

    /// Flat-space distance in degrees, longitude wrapped.
    ///
    /// Not a geodesic; good enough for densification budgets and
    /// screen-scale heuristics at overlay scale.
    pub fn coarse_distance_deg(self, other: LngLat) -> f64 {
        let dl = wrap_longitude(other.lng - self.lng);
        let dp = other.lat - self.lat;
        (dl * dl + dp * dp).sqrt()
    }
}
