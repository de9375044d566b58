//! Linear-light color and its conversion to display bytes.

use crate::{Interval, Vec3};

/// Linear-light RGB color. Add, scale and component-wise multiply come from glam.
pub type Color = Vec3;

/// Display gamma applied when encoding linear values.
pub const GAMMA: f64 = 2.2;

/// Encode a linear channel value for display (exponent 1/2.2).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.powf(1.0 / GAMMA)
    } else {
        0.0
    }
}

/// Clamp to [0, 1], gamma-encode and quantize a single channel.
#[inline]
pub fn to_display_byte(linear: f64) -> u8 {
    // NaN clamps to NaN; map it to black instead of relying on cast saturation
    let linear = if linear.is_nan() { 0.0 } else { linear };
    let encoded = linear_to_gamma(Interval::UNIT.clamp(linear));
    (255.999 * encoded).floor() as u8
}

/// Convert a linear color to gamma-encoded 8-bit RGB.
pub fn to_rgb8(color: Color) -> [u8; 3] {
    [
        to_display_byte(color.x),
        to_display_byte(color.y),
        to_display_byte(color.z),
    ]
}
