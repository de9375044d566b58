//! Cornell Renderer - CPU Whitted-style ray tracing.
//!
//! Renders a Cornell box with point lights, Lambert + Blinn-Phong shading,
//! mirror reflection and dielectric refraction. Rows are traced in parallel
//! with rayon; intersection is a brute-force scan over every primitive.
//!
//! # Example
//!
//! ```ignore
//! use cornell_core::RenderOptions;
//! use cornell_renderer::{render, CancellationToken};
//!
//! let image = render(&RenderOptions::new(320, 240), &CancellationToken::new())?;
//! image.save("cornell.png")?;
//! ```

mod camera;
mod cancel;
mod hittable;
mod light;
mod material;
mod rect;
mod renderer;
mod scene;
mod sphere;
mod tracer;

pub use camera::Camera;
pub use cancel::CancellationToken;
pub use hittable::{face_normal, HitRecord, Hittable, HittableList};
pub use light::PointLight;
pub use material::Material;
pub use rect::{Plane, Rect};
pub use renderer::{
    render, render_pixel, render_with, Image, RenderConfig, RenderError, RenderResult,
};
pub use scene::{hollow_box, Scene};
pub use sphere::Sphere;
pub use tracer::{trace_ray, AMBIENT_IOR};

/// Re-export the math types the public API is written in.
pub use cornell_math::{Color, Interval, Point3, Ray, Vec3};
