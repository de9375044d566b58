//! Recursive Whitted-style light transport.
//!
//! `trace_ray` follows mirror and dielectric interactions recursively up to a
//! fixed depth and shades everything else directly against the point lights
//! with Lambert + Blinn-Phong terms and hard shadows.

use crate::{HitRecord, Hittable, Material, PointLight};
use cornell_math::{normalized, reflect, refract, Color, Interval, Ray};

/// Lower bound on every hit query, keeps rays from re-hitting their origin surface.
pub const HIT_EPSILON: f64 = 1e-4;

/// Upper bound on primary and secondary hit queries.
pub const FAR_PLANE: f64 = 1e30;

/// Offset along reflected directions.
pub const REFLECT_OFFSET: f64 = 1e-4;

/// Offset along refracted directions.
pub const REFRACT_OFFSET: f64 = 1e-3;

/// Offset along the normal for shadow ray origins.
pub const SHADOW_OFFSET: f64 = 1e-3;

/// Fraction of albedo returned even in full shadow.
pub const AMBIENT: f64 = 0.02;

/// Index of refraction of the room's air.
pub const AMBIENT_IOR: f64 = 1.0;

/// Radiance arriving along `ray`.
///
/// - `depth`: remaining recursion budget, zero returns black
/// - `medium_ior`: IOR of the volume the ray is currently travelling through
pub fn trace_ray(
    ray: &Ray,
    world: &dyn Hittable,
    lights: &[PointLight],
    depth: u32,
    medium_ior: f64,
) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(HIT_EPSILON, FAR_PLANE)) else {
        return Color::ZERO;
    };

    let material = rec.material;
    if material.is_mirror {
        shade_mirror(ray, &rec, world, lights, depth, medium_ior)
    } else if material.is_transparent {
        shade_dielectric(ray, &rec, world, lights, depth, medium_ior)
    } else {
        shade_diffuse(ray, &rec, world, lights)
    }
}

/// Pure reflection scaled by the mirror strength.
fn shade_mirror(
    ray: &Ray,
    rec: &HitRecord<'_>,
    world: &dyn Hittable,
    lights: &[PointLight],
    depth: u32,
    medium_ior: f64,
) -> Color {
    let reflected = reflected_ray(ray, rec);
    trace_ray(&reflected, world, lights, depth - 1, medium_ior) * rec.material.mirror_strength
}

/// Fixed-ratio blend of reflection and refraction, tinted by albedo.
fn shade_dielectric(
    ray: &Ray,
    rec: &HitRecord<'_>,
    world: &dyn Hittable,
    lights: &[PointLight],
    depth: u32,
    medium_ior: f64,
) -> Color {
    let material: &Material = rec.material;
    let exiting = !rec.front_face;
    let eta = if exiting {
        material.ior / medium_ior
    } else {
        medium_ior / material.ior
    };

    let unit_direction = normalized(ray.direction());
    let refracted = match refract(unit_direction, rec.normal, eta) {
        Some(direction) => {
            let next_ior = if exiting { AMBIENT_IOR } else { material.ior };
            let refracted_ray = Ray::new(rec.p + direction * REFRACT_OFFSET, direction);
            trace_ray(&refracted_ray, world, lights, depth - 1, next_ior) * material.transparency
        }
        // Total internal reflection
        None => Color::ZERO,
    };

    let reflected_ray = reflected_ray(ray, rec);
    let reflected = trace_ray(&reflected_ray, world, lights, depth - 1, medium_ior);

    let kr = material.reflection_factor;
    let surface = reflected * kr + refracted * (1.0 - kr);
    surface * material.albedo
}

/// Ambient plus Lambert and Blinn-Phong terms from every visible light.
fn shade_diffuse(
    ray: &Ray,
    rec: &HitRecord<'_>,
    world: &dyn Hittable,
    lights: &[PointLight],
) -> Color {
    let material = rec.material;
    let view = normalized(-ray.direction());
    let shadow_origin = rec.p + rec.normal * SHADOW_OFFSET;

    let mut color = material.albedo * AMBIENT;
    for light in lights {
        let to_light = light.position - rec.p;
        let distance_squared = to_light.length_squared();
        let distance = distance_squared.sqrt();
        let light_dir = normalized(to_light);

        let shadow_ray = Ray::new(shadow_origin, light_dir);
        if world
            .hit(&shadow_ray, Interval::new(HIT_EPSILON, distance - HIT_EPSILON))
            .is_some()
        {
            continue;
        }

        let attenuation = light.attenuation(distance_squared);
        let n_dot_l = rec.normal.dot(light_dir).max(0.0);
        color += material.albedo * light.color * (n_dot_l * attenuation);

        if material.specular_intensity > 0.0 {
            let half_vector = normalized(light_dir + view);
            let n_dot_h = rec.normal.dot(half_vector).max(0.0);
            let highlight =
                material.specular_intensity * n_dot_h.powf(material.specular_power) * attenuation;
            color += light.color * highlight;
        }
    }

    color
}

/// Mirror bounce of `ray` at the hit, nudged off the surface.
fn reflected_ray(ray: &Ray, rec: &HitRecord<'_>) -> Ray {
    let direction = normalized(reflect(ray.direction(), rec.normal));
    Ray::new(rec.p + direction * REFLECT_OFFSET, direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HittableList, Rect, Sphere};
    use cornell_math::Vec3;
    use std::sync::Arc;

    /// Reference Lambert term from one light, ignoring occlusion.
    fn unshadowed_lambert(albedo: Color, p: Vec3, normal: Vec3, light: &PointLight) -> Color {
        let to_light = light.position - p;
        let n_dot_l = normal.dot(to_light.normalize()).max(0.0);
        albedo * light.color * (n_dot_l * light.attenuation(to_light.length_squared()))
    }

    fn white_light(position: Vec3) -> PointLight {
        PointLight::new(position, Color::ONE, 4.0 * std::f64::consts::PI)
    }

    fn assert_color_eq(a: Color, b: Color) {
        assert!((a - b).length() < 1e-9, "{a:?} != {b:?}");
    }

    /// A matte floor at y = 0 facing up.
    fn floor(albedo: Color) -> Box<dyn Hittable> {
        Box::new(Rect::xz(
            -10.0,
            10.0,
            -10.0,
            10.0,
            0.0,
            Arc::new(Material::diffuse(albedo)),
            false,
        ))
    }

    #[test]
    fn test_zero_depth_is_black() {
        let mut world = HittableList::new();
        world.add(floor(Color::ONE));
        let lights = [white_light(Vec3::new(0.0, 2.0, 0.0))];
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);

        assert_eq!(trace_ray(&ray, &world, &lights, 0, 1.0), Color::ZERO);
    }

    #[test]
    fn test_miss_is_black() {
        let world = HittableList::new();
        let lights = [white_light(Vec3::new(0.0, 2.0, 0.0))];
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);

        assert_eq!(trace_ray(&ray, &world, &lights, 5, 1.0), Color::ZERO);
    }

    #[test]
    fn test_diffuse_lit_point() {
        let albedo = Color::new(0.8, 0.4, 0.2);
        let mut world = HittableList::new();
        world.add(floor(albedo));
        let light = white_light(Vec3::new(0.0, 2.0, 0.0));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);

        let color = trace_ray(&ray, &world, &[light], 3, 1.0);

        // Directly below the light: N·L = 1, d² = 4, attenuation = 4π / (4π·4)
        let expected = albedo * AMBIENT + albedo * 0.25;
        assert_color_eq(color, expected);
    }

    #[test]
    fn test_occluded_light_contributes_nothing() {
        let albedo = Color::splat(0.5);
        let mut world = HittableList::new();
        world.add(floor(albedo));
        // Blocker between the floor point and the light
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, 1.0, 0.0),
            0.25,
            Arc::new(Material::diffuse(Color::ONE)),
        )));
        let lights = [white_light(Vec3::new(0.0, 2.0, 0.0))];
        let ray = Ray::new(Vec3::new(0.5, 0.5, 0.0), Vec3::new(-0.5, -0.5, 0.0).normalize());

        let color = trace_ray(&ray, &world, &lights, 3, 1.0);
        assert_color_eq(color, albedo * AMBIENT);
    }

    #[test]
    fn test_unoccluded_light_is_positive() {
        let albedo = Color::splat(0.5);
        let mut world = HittableList::new();
        world.add(floor(albedo));
        let lights = [white_light(Vec3::new(3.0, 1.0, 0.0))];
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);

        let color = trace_ray(&ray, &world, &lights, 3, 1.0);
        let ambient = albedo * AMBIENT;
        assert!(color.x > ambient.x && color.y > ambient.y && color.z > ambient.z);
    }

    #[test]
    fn test_light_behind_surface_adds_nothing() {
        let albedo = Color::splat(0.5);
        let mut world = HittableList::new();
        // One-sided test geometry: the light is below the floor plane but off the rectangle
        world.add(Box::new(Rect::xz(
            -1.0,
            1.0,
            -1.0,
            1.0,
            0.0,
            Arc::new(Material::diffuse(albedo)),
            false,
        )));
        let lights = [white_light(Vec3::new(5.0, -1.0, 0.0))];
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);

        let color = trace_ray(&ray, &world, &lights, 3, 1.0);
        assert_color_eq(color, albedo * AMBIENT);
    }

    #[test]
    fn test_specular_highlight_adds_light_color() {
        let albedo = Color::splat(0.5);
        let mut world = HittableList::new();
        world.add(Box::new(Rect::xz(
            -10.0,
            10.0,
            -10.0,
            10.0,
            0.0,
            Arc::new(Material::diffuse(albedo).with_specular(0.5, 16.0)),
            false,
        )));
        let light = white_light(Vec3::new(0.0, 2.0, 0.0));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);

        let color = trace_ray(&ray, &world, &[light], 3, 1.0);

        // Light and viewer share the normal, so N·H = 1
        let expected = albedo * AMBIENT + albedo * 0.25 + Color::splat(0.5 * 0.25);
        assert_color_eq(color, expected);
    }

    #[test]
    fn test_mirror_into_nothing_is_black() {
        let mut world = HittableList::new();
        world.add(Box::new(Rect::xy(
            -1.0,
            1.0,
            -1.0,
            1.0,
            -2.0,
            Arc::new(Material::diffuse(Color::ONE).with_mirror(0.9)),
            false,
        )));
        let lights = [white_light(Vec3::new(0.0, 0.5, 0.0))];
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert_eq!(trace_ray(&ray, &world, &lights, 5, 1.0), Color::ZERO);
    }

    #[test]
    fn test_mirror_scales_reflected_surface() {
        let strength = 0.7;
        let albedo = Color::new(0.9, 0.5, 0.1);
        let mirror = Arc::new(Material::diffuse(Color::ONE).with_mirror(strength));
        let target_material = Arc::new(Material::diffuse(albedo));

        // Mirror at z = -2 facing the camera, diffuse target behind the camera at z = 2
        let mut world = HittableList::new();
        world.add(Box::new(Rect::xy(-1.0, 1.0, -1.0, 1.0, -2.0, mirror, false)));
        world.add(Box::new(Rect::xy(-5.0, 5.0, -5.0, 5.0, 2.0, target_material, true)));
        let light = white_light(Vec3::new(0.0, 0.0, 1.0));
        let lights = [light];

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let color = trace_ray(&ray, &world, &lights, 5, 1.0);

        // The reflected ray starts just off the mirror and lands on the target at (0, 0, 2)
        let reference = albedo * AMBIENT
            + unshadowed_lambert(albedo, Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z, &light);
        assert!((color - reference * strength).length() < 1e-6);
    }

    #[test]
    fn test_mirror_needs_depth_for_bounce() {
        let mut world = HittableList::new();
        world.add(Box::new(Rect::xy(
            -1.0,
            1.0,
            -1.0,
            1.0,
            -2.0,
            Arc::new(Material::diffuse(Color::ONE).with_mirror(1.0)),
            false,
        )));
        world.add(Box::new(Rect::xy(
            -5.0,
            5.0,
            -5.0,
            5.0,
            2.0,
            Arc::new(Material::diffuse(Color::ONE)),
            true,
        )));
        let lights = [white_light(Vec3::new(0.0, 0.0, 1.0))];
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        // Depth 1 is spent on the mirror itself
        assert_eq!(trace_ray(&ray, &world, &lights, 1, 1.0), Color::ZERO);
        assert!(trace_ray(&ray, &world, &lights, 2, 1.0).length() > 0.0);
    }

    #[test]
    fn test_mirror_wins_over_transparency() {
        let both = Material::diffuse(Color::ONE)
            .with_dielectric(1.5, 1.0, 0.0)
            .with_mirror(1.0);
        let mut world = HittableList::new();
        world.add(Box::new(Rect::xy(-1.0, 1.0, -1.0, 1.0, -2.0, Arc::new(both), false)));
        // Something lit behind the pane that only refraction could reach
        world.add(floor_at_z(-4.0));
        let lights = [white_light(Vec3::new(0.0, 0.0, -3.0))];
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert_eq!(trace_ray(&ray, &world, &lights, 5, 1.0), Color::ZERO);
    }

    fn floor_at_z(z: f64) -> Box<dyn Hittable> {
        Box::new(Rect::xy(
            -10.0,
            10.0,
            -10.0,
            10.0,
            z,
            Arc::new(Material::diffuse(Color::ONE)),
            false,
        ))
    }

    #[test]
    fn test_dielectric_matched_ior_passes_straight_through() {
        // IOR 1.0 bends nothing; with no reflection share the pane just tints
        let tint = Color::new(1.0, 0.5, 0.25);
        let pane = Material::diffuse(tint).with_dielectric(1.0, 0.8, 0.0);
        let mut world = HittableList::new();
        world.add(Box::new(Rect::xy(-1.0, 1.0, -1.0, 1.0, -2.0, Arc::new(pane), false)));
        world.add(floor_at_z(-4.0));
        let light = white_light(Vec3::new(0.0, 0.0, -3.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let behind = trace_ray(&ray, &world, &[light], 1, 1.0);
        assert_eq!(behind, Color::ZERO);

        let color = trace_ray(&ray, &world, &[light], 5, 1.0);
        // The light sits between pane and wall, so nothing shadows the wall
        let wall = Color::ONE * AMBIENT
            + unshadowed_lambert(Color::ONE, Vec3::new(0.0, 0.0, -4.0), Vec3::Z, &light);
        assert!((color - wall * 0.8 * tint).length() < 1e-6);
    }

    #[test]
    fn test_dielectric_blends_reflection() {
        // Fully reflective share: the result is the reflected radiance tinted by albedo
        let tint = Color::new(0.5, 1.0, 1.0);
        let pane = Material::diffuse(tint).with_dielectric(1.5, 1.0, 1.0);
        let mut world = HittableList::new();
        world.add(Box::new(Rect::xy(-1.0, 1.0, -1.0, 1.0, -2.0, Arc::new(pane), false)));
        world.add(Box::new(Rect::xy(
            -5.0,
            5.0,
            -5.0,
            5.0,
            2.0,
            Arc::new(Material::diffuse(Color::ONE)),
            true,
        )));
        let light = white_light(Vec3::new(0.0, 0.0, 1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let color = trace_ray(&ray, &world, &[light], 5, 1.0);
        let reflected = Color::ONE * AMBIENT
            + unshadowed_lambert(Color::ONE, Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z, &light);
        assert!((color - reflected * tint).length() < 1e-6);
    }

    #[test]
    fn test_total_internal_reflection_keeps_only_reflection() {
        let kr = 0.25;
        let glass = Material::diffuse(Color::ONE).with_dielectric(1.5, 1.0, kr);
        let mut world = HittableList::new();
        // Outward normal +y: a ray travelling upward hits the back face (exiting)
        world.add(Box::new(Rect::xz(-10.0, 10.0, -10.0, 10.0, 0.0, Arc::new(glass), false)));
        world.add(Box::new(Rect::xz(
            -10.0,
            10.0,
            -10.0,
            10.0,
            -1.0,
            Arc::new(Material::diffuse(Color::splat(0.6))),
            false,
        )));
        let lights = [white_light(Vec3::new(2.0, -0.5, 0.0))];

        // Grazing hit at (0.5, 0, 0): eta = 1.5, sin(theta) ~ 0.98, no transmitted ray
        let direction = Vec3::new(1.0, 0.2, 0.0).normalize();
        let ray = Ray::new(Vec3::new(0.0, -0.1, 0.0), direction);
        let color = trace_ray(&ray, &world, &lights, 5, 1.0);

        let bounce = Vec3::new(1.0, -0.2, 0.0).normalize();
        let bounce_ray = Ray::new(Vec3::new(0.5, 0.0, 0.0) + bounce * REFLECT_OFFSET, bounce);
        let reflected = trace_ray(&bounce_ray, &world, &lights, 4, 1.0);

        assert!(reflected.length() > 0.0);
        assert!((color - reflected * kr).length() < 1e-9);
    }

    #[test]
    fn test_dielectric_entering_bends_and_tracks_ior() {
        // Glass slab between y = -0.5 and y = 0 over a matte floor at y = -1
        let glass = Arc::new(Material::diffuse(Color::ONE).with_dielectric(1.5, 1.0, 0.0));
        let floor_albedo = Color::splat(0.6);
        let mut world = HittableList::new();
        world.add(Box::new(Rect::xz(-10.0, 10.0, -10.0, 10.0, 0.0, glass.clone(), false)));
        world.add(Box::new(Rect::xz(-10.0, 10.0, -10.0, 10.0, -0.5, glass, true)));
        world.add(Box::new(Rect::xz(
            -10.0,
            10.0,
            -10.0,
            10.0,
            -1.0,
            Arc::new(Material::diffuse(floor_albedo)),
            false,
        )));
        let light = white_light(Vec3::new(0.5, -0.7, 0.0));

        // 45 degree ray entering the top face at the origin
        let direction = Vec3::new(1.0, -1.0, 0.0).normalize();
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), direction);
        let color = trace_ray(&ray, &world, &[light], 5, AMBIENT_IOR);

        // Entering bends by 1/1.5. Inside, the medium is 1.5, so leaving through the
        // bottom face uses 1.5/1.5 and the ray keeps its direction down to the floor.
        let sin_t = std::f64::consts::FRAC_1_SQRT_2 / 1.5;
        let tan_t = sin_t / (1.0 - sin_t * sin_t).sqrt();
        let floor_hit = Vec3::new(tan_t, -1.0, 0.0);
        let expected =
            floor_albedo * AMBIENT + unshadowed_lambert(floor_albedo, floor_hit, Vec3::Y, &light);
        assert!((color - expected).length() < 1e-6, "{color:?} != {expected:?}");

        // The same bend from the refraction helper, traced with the glass as medium
        let inside = refract(direction, Vec3::Y, 1.0 / 1.5).unwrap();
        assert!((inside.x / -inside.y - tan_t).abs() < 1e-12);
        let inside_ray = Ray::new(inside * REFRACT_OFFSET, inside);
        let through = trace_ray(&inside_ray, &world, &[light], 4, 1.5);
        assert!((color - through).length() < 1e-6);

        // Tracking the ambient IOR inside instead would bend again on the way out
        let wrong = trace_ray(&inside_ray, &world, &[light], 4, AMBIENT_IOR);
        assert!((color - wrong).length() > 1e-3);
    }
}
