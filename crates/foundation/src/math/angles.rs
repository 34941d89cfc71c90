/// Angle helpers on the wrapped longitude domain.

/// Wraps a longitude to `[-180, 180)`.
pub fn wrap_longitude(lng_deg: f64) -> f64 {
    let mut l = (lng_deg + 180.0) % 360.0;
    if l < 0.0 {
        l += 360.0;
    }
    l - 180.0
}

/// Smallest signed angular difference `b - a`, normalized to `[-180, 180)`.
pub fn wrap_delta_deg(a_deg: f64, b_deg: f64) -> f64 {
    wrap_longitude(b_deg - a_deg)
}

/// Circular distance between two fractions of a unit cycle.
///
/// Both inputs are taken modulo 1; the result is in `[0, 0.5]`.
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(1.0);
    d.min(1.0 - d)
}

#[cfg(test)]
mod tests {
    use super::{circular_distance, wrap_delta_deg, wrap_longitude};

    #[test]
    fn wraps_longitude_into_range() {
        assert_eq!(wrap_longitude(0.0), 0.0);
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
        assert_eq!(wrap_longitude(540.0), 180.0 - 360.0);
    }

    #[test]
    fn delta_takes_short_way_around() {
        assert_eq!(wrap_delta_deg(170.0, -170.0), 20.0);
        assert_eq!(wrap_delta_deg(-170.0, 170.0), -20.0);
        assert_eq!(wrap_delta_deg(10.0, 30.0), 20.0);
    }

    #[test]
    fn circular_distance_is_symmetric_and_bounded() {
        assert!((circular_distance(0.1, 0.9) - 0.2).abs() < 1e-12);
        assert!((circular_distance(0.9, 0.1) - 0.2).abs() < 1e-12);
        assert!((circular_distance(0.25, 0.75) - 0.5).abs() < 1e-12);
        assert_eq!(circular_distance(0.4, 0.4), 0.0);
    }
}
