/// Animation pacing curves.
///
/// All curves map `t in [0, 1]` to `[0, 1]` with `f(0) = 0` and `f(1) = 1`;
/// inputs outside the unit interval are clamped first.

pub fn clamp01(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Cubic ease-in-out: slow start, fast middle, slow finish.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = clamp01(t);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Linear interpolation, extrapolation-free.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * clamp01(t)
}
