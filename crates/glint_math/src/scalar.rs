//! Scalar interpolation helpers shared by shading and pixel conversion.

use crate::{Interval, Vec3};

/// Linear interpolation: `from + (to - from) * t`. `t` is not clamped.
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Inverse of [`lerp`]: where `value` sits between `from` and `to`.
///
/// Unbounded; `from == to` divides by zero.
#[inline]
pub fn inverse_lerp(from: f32, to: f32, value: f32) -> f32 {
    (value - from) / (to - from)
}

/// [`inverse_lerp`] with `value` clamped into the range first, so the result
/// always lies in [0, 1]. The range may be given in either order.
#[inline]
pub fn inverse_lerp01(from: f32, to: f32, value: f32) -> f32 {
    inverse_lerp(from, to, Interval::spanning(from, to).clamp(value))
}

/// Clamp to [0, 1].
#[inline]
pub fn clamp01(x: f32) -> f32 {
    Interval::UNIT.clamp(x)
}

/// Mirror `dir` about `normal`. Both are expected to be unit length.
#[inline]
pub fn reflect(dir: Vec3, normal: Vec3) -> Vec3 {
    dir - normal * (2.0 * dir.dot(normal))
}
