//! Point lights.

use cornell_math::{Color, Point3};

/// An infinitely small light with inverse-square falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Point3,
    pub color: Color,
    /// Radiant power analog, spread over `4π·d²`
    pub intensity: f64,
}

impl PointLight {
    pub const fn new(position: Point3, color: Color, intensity: f64) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }

    /// Falloff factor `intensity / (4π·d²)` for a squared distance.
    #[inline]
    pub fn attenuation(&self, distance_squared: f64) -> f64 {
        self.intensity / (4.0 * std::f64::consts::PI * distance_squared)
    }
}
