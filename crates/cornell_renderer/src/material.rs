//! Surface optical properties.
//!
//! A material is plain data read by the evaluator in `tracer.rs`. Primitives
//! share materials through `Arc`; customizing one instance means cloning the
//! template into a new `Arc`, never mutating the shared value.

use cornell_math::Color;

/// Optical properties of a surface.
///
/// Exactly one shading branch applies per hit: mirror, then dielectric, then
/// diffuse. A material with both `is_mirror` and `is_transparent` set shades
/// as a mirror.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Diffuse reflectance, also the tint of light passing through a dielectric
    pub albedo: Color,

    /// Reflect everything, no local shading
    pub is_mirror: bool,
    /// Multiplier on the reflected radiance of a mirror
    pub mirror_strength: f64,

    /// Refract and reflect at the surface
    pub is_transparent: bool,
    /// Index of refraction of the volume behind the surface
    pub ior: f64,
    /// Multiplier on the refracted radiance
    pub transparency: f64,
    /// Fixed fraction of the blend taken from the reflected ray
    pub reflection_factor: f64,

    /// Phong highlight strength (0 disables the highlight)
    pub specular_intensity: f64,
    /// Phong exponent
    pub specular_power: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(Color::splat(0.73))
    }
}

impl Material {
    /// Create a matte material with the given albedo.
    pub fn diffuse(albedo: Color) -> Self {
        Self {
            albedo,
            is_mirror: false,
            mirror_strength: 0.0,
            is_transparent: false,
            ior: 1.0,
            transparency: 0.0,
            reflection_factor: 0.0,
            specular_intensity: 0.0,
            specular_power: 1.0,
        }
    }

    /// Add a Phong highlight.
    pub fn with_specular(mut self, intensity: f64, power: f64) -> Self {
        self.specular_intensity = intensity;
        self.specular_power = power;
        self
    }

    /// Turn this material into a mirror that returns `strength` times the
    /// reflected radiance.
    pub fn with_mirror(mut self, strength: f64) -> Self {
        self.is_mirror = true;
        self.mirror_strength = strength;
        self
    }

    /// Turn this material into a dielectric.
    ///
    /// - `ior`: index of refraction (1.0 = air, 1.5 = glass)
    /// - `transparency`: scale on the refracted contribution
    /// - `reflection_factor`: share of the reflected ray in the final blend
    pub fn with_dielectric(mut self, ior: f64, transparency: f64, reflection_factor: f64) -> Self {
        self.is_transparent = true;
        self.ior = ior;
        self.transparency = transparency;
        self.reflection_factor = reflection_factor;
        self
    }
}
