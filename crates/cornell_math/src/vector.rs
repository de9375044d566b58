//! Direction helpers shared by the primitives and the shading code.

use crate::Vec3;

/// Lengths at or below this are treated as zero by [`normalized`].
pub const NORMALIZE_EPSILON: f64 = 1e-12;

/// Normalize `v`, returning the zero vector instead of NaN for degenerate input.
#[inline]
pub fn normalized(v: Vec3) -> Vec3 {
    let len = v.length();
    if len <= NORMALIZE_EPSILON {
        Vec3::ZERO
    } else {
        v / len
    }
}

/// Mirror `d` about the normal `n`: `d - 2(d·n)n`.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - 2.0 * d.dot(n) * n
}

/// Bend the unit direction `uv` through a surface with unit normal `n`
/// (facing against `uv`) using Snell's law with `eta = n1 / n2`.
///
/// Returns `None` on total internal reflection. The result is unit length by
/// construction and is not re-normalized.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, eta: f64) -> Option<Vec3> {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_perp = eta * (uv + cos_theta * n);
    let k = 1.0 - r_perp.length_squared();
    if k < 0.0 {
        return None;
    }
    let r_parallel = -k.sqrt() * n;
    Some(r_perp + r_parallel)
}
