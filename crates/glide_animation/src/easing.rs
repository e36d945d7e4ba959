//! Easing for programmatic scrolling

/// Ease-out cubic, `(t - 1)^3 + 1`, for progress in `[0, 1]`
pub fn ease_out_cubic(t: f64) -> f64 {
    let u = t - 1.0;
    u * u * u + 1.0
}
