//! Cornell box assembly.
//!
//! Turns a `RenderOptions` into the world, lights and camera the renderer
//! consumes. The room spans x ∈ [-1, 1], y ∈ [0, 2], z ∈ [-3, 1]; the camera
//! stands just inside the front wall looking down -z.

use std::sync::Arc;

use cornell_core::{MirrorWall, RenderOptions, SecondLight};
use cornell_math::{Color, Point3, Vec3};

use crate::{Camera, Hittable, HittableList, Material, PointLight, Rect, Sphere};

const ROOM_MIN: Point3 = Point3::new(-1.0, 0.0, -3.0);
const ROOM_MAX: Point3 = Point3::new(1.0, 2.0, 1.0);

const CAMERA_FROM: Point3 = Point3::new(0.0, 1.0, 0.9);
const CAMERA_AT: Point3 = Point3::new(0.0, 1.0, -3.0);
const CAMERA_VFOV: f64 = 60.0;

const PRIMARY_LIGHT_POSITION: Point3 = Point3::new(0.0, 1.9, -1.5);
const PRIMARY_LIGHT_INTENSITY: f64 = 35.0;
const WARM_WHITE: Color = Color::new(1.0, 0.85, 0.6);

const MIRROR_STRENGTH: f64 = 0.9;
const GLASS_IOR: f64 = 1.5;
const GLASS_TRANSPARENCY: f64 = 0.9;
const GLASS_REFLECTION: f64 = 0.1;

/// Everything needed to render one frame.
pub struct Scene {
    pub world: HittableList,
    pub lights: Vec<PointLight>,
    pub camera: Camera,
}

impl Scene {
    /// Create a scene from its parts.
    pub fn new(world: HittableList, lights: Vec<PointLight>, camera: Camera) -> Self {
        Self {
            world,
            lights,
            camera,
        }
    }

    /// Assemble the Cornell box variant selected by `options`.
    pub fn cornell_box(options: &RenderOptions) -> Self {
        let palette = Palette::new();
        let mut world = HittableList::new();

        world.extend(room_walls(&palette, options.mirror_wall));

        // Left sphere can turn into a mirror, right sphere into glass
        let left_sphere = if options.mirror_spheres {
            mirror_of(&palette.left_sphere)
        } else {
            palette.left_sphere.clone()
        };
        let right_sphere = if options.transparent_spheres {
            glass_of(&palette.right_sphere)
        } else {
            palette.right_sphere.clone()
        };
        world.add(Box::new(Sphere::new(Point3::new(-0.45, 0.3, -2.1), 0.3, left_sphere)));
        world.add(Box::new(Sphere::new(Point3::new(0.45, 0.3, -1.6), 0.3, right_sphere)));

        let left_box = if options.mirror_cubes {
            mirror_of(&palette.left_box)
        } else {
            palette.left_box.clone()
        };
        let right_box = if options.transparent_cubes {
            glass_of(&palette.right_box)
        } else {
            palette.right_box.clone()
        };
        world.extend(hollow_box(
            Point3::new(-0.85, 0.0, -2.9),
            Point3::new(-0.45, 0.9, -2.5),
            left_box,
        ));
        world.extend(hollow_box(
            Point3::new(0.3, 0.0, -2.7),
            Point3::new(0.8, 0.5, -2.2),
            right_box,
        ));

        let mut lights = vec![PointLight::new(
            PRIMARY_LIGHT_POSITION,
            Color::ONE,
            PRIMARY_LIGHT_INTENSITY,
        )];
        if let Some(position) = second_light_position(options.second_light) {
            lights.push(PointLight::new(
                position,
                WARM_WHITE,
                PRIMARY_LIGHT_INTENSITY * 0.5,
            ));
        }

        let camera = Camera::new(
            CAMERA_FROM,
            CAMERA_AT,
            Vec3::Y,
            CAMERA_VFOV,
            options.aspect_ratio(),
        );

        log::debug!(
            "Assembled Cornell box: {} primitives, {} lights, mirror wall {}, second light {}",
            world.len(),
            lights.len(),
            options.mirror_wall,
            options.second_light
        );

        Self::new(world, lights, camera)
    }
}

/// Shared material templates. Variants are cloned from these, never mutated.
struct Palette {
    white: Arc<Material>,
    red: Arc<Material>,
    green: Arc<Material>,
    left_sphere: Arc<Material>,
    right_sphere: Arc<Material>,
    left_box: Arc<Material>,
    right_box: Arc<Material>,
}

impl Palette {
    fn new() -> Self {
        Self {
            white: Arc::new(Material::diffuse(Color::splat(0.73))),
            red: Arc::new(Material::diffuse(Color::new(0.65, 0.05, 0.05))),
            green: Arc::new(Material::diffuse(Color::new(0.12, 0.45, 0.15))),
            left_sphere: Arc::new(
                Material::diffuse(Color::new(0.8, 0.8, 0.8)).with_specular(0.6, 64.0),
            ),
            right_sphere: Arc::new(
                Material::diffuse(Color::new(0.2, 0.4, 0.9)).with_specular(0.6, 64.0),
            ),
            left_box: Arc::new(
                Material::diffuse(Color::new(0.9, 0.7, 0.3)).with_specular(0.2, 16.0),
            ),
            right_box: Arc::new(Material::diffuse(Color::new(0.7, 0.7, 0.7))),
        }
    }
}

/// Independent mirror copy of a template.
fn mirror_of(template: &Arc<Material>) -> Arc<Material> {
    Arc::new(template.as_ref().clone().with_mirror(MIRROR_STRENGTH))
}

/// Independent glass copy of a template, lightly tinted.
fn glass_of(template: &Arc<Material>) -> Arc<Material> {
    let mut glass = template.as_ref().clone().with_dielectric(
        GLASS_IOR,
        GLASS_TRANSPARENCY,
        GLASS_REFLECTION,
    );
    glass.albedo = Color::new(0.95, 0.95, 1.0);
    Arc::new(glass)
}

/// The six room walls, each facing into the room.
fn room_walls(palette: &Palette, mirror_wall: MirrorWall) -> Vec<Box<dyn Hittable>> {
    let (lo, hi) = (ROOM_MIN, ROOM_MAX);
    let pick = |wall: MirrorWall, material: &Arc<Material>| {
        if wall == mirror_wall {
            mirror_of(material)
        } else {
            material.clone()
        }
    };

    [
        Rect::xz(lo.x, hi.x, lo.z, hi.z, lo.y, pick(MirrorWall::Floor, &palette.white), false),
        Rect::xz(lo.x, hi.x, lo.z, hi.z, hi.y, pick(MirrorWall::Ceiling, &palette.white), true),
        Rect::yz(lo.y, hi.y, lo.z, hi.z, lo.x, pick(MirrorWall::Left, &palette.red), false),
        Rect::yz(lo.y, hi.y, lo.z, hi.z, hi.x, pick(MirrorWall::Right, &palette.green), true),
        Rect::xy(lo.x, hi.x, lo.y, hi.y, lo.z, pick(MirrorWall::Back, &palette.white), false),
        Rect::xy(lo.x, hi.x, lo.y, hi.y, hi.z, pick(MirrorWall::Front, &palette.white), true),
    ]
    .into_iter()
    .map(|rect| Box::new(rect) as Box<dyn Hittable>)
    .collect()
}

/// Six rectangles bounding `[min, max]`, every outward normal pointing into the volume.
pub fn hollow_box(min: Point3, max: Point3, material: Arc<Material>) -> Vec<Box<dyn Hittable>> {
    [
        Rect::xz(min.x, max.x, min.z, max.z, min.y, material.clone(), false),
        Rect::xz(min.x, max.x, min.z, max.z, max.y, material.clone(), true),
        Rect::yz(min.y, max.y, min.z, max.z, min.x, material.clone(), false),
        Rect::yz(min.y, max.y, min.z, max.z, max.x, material.clone(), true),
        Rect::xy(min.x, max.x, min.y, max.y, min.z, material.clone(), false),
        Rect::xy(min.x, max.x, min.y, max.y, max.z, material, true),
    ]
    .into_iter()
    .map(|rect| Box::new(rect) as Box<dyn Hittable>)
    .collect()
}

/// Where the optional second light goes, just inside the chosen wall.
fn second_light_position(placement: SecondLight) -> Option<Point3> {
    match placement {
        SecondLight::None => None,
        SecondLight::Right => Some(Point3::new(0.9, 1.0, -1.5)),
        SecondLight::Left => Some(Point3::new(-0.9, 1.0, -1.5)),
        SecondLight::Floor => Some(Point3::new(0.0, 0.1, -1.2)),
        SecondLight::Back => Some(Point3::new(0.0, 1.0, -2.9)),
        SecondLight::Front => Some(Point3::new(0.0, 1.0, 0.8)),
    }
}
