//! Vector, color and ray math for the Cornell renderer.
//!
//! Everything is double precision: the renderer works with epsilons down to
//! `1e-12` and parametric distances up to `1e30`.

// Re-export glam for convenience
pub use glam;

mod color;
mod interval;
mod ray;
mod vector;

pub use color::{linear_to_gamma, to_display_byte, to_rgb8, Color, GAMMA};
pub use interval::Interval;
pub use ray::Ray;
pub use vector::{normalized, reflect, refract, NORMALIZE_EPSILON};

/// 3D vector used for points, directions and unnormalized normals.
pub type Vec3 = glam::DVec3;

/// A position in world space.
pub type Point3 = Vec3;
