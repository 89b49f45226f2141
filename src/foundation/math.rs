use crate::foundation::core::Vec2;

/// Clamp to `[0, 1]`, mapping NaN to `0`.
pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Interpolation contract for animatable values.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Round to 4 decimals so emitted CSS and JSON stay stable across float noise.
pub(crate) fn round4(v: f64) -> f64 {
    let r = (v * 10_000.0).round() / 10_000.0;
    // Avoid "-0" in output.
    if r == 0.0 { 0.0 } else { r }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
