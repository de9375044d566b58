//! Axis-aligned rectangles.
//!
//! A rectangle lies in a plane perpendicular to one coordinate axis (the
//! skipped axis) at offset `k`, bounded by `[a0, a1]` and `[b0, b1]` on the
//! two in-plane axes. Walls and box faces are built from these.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use cornell_math::{Interval, Ray, Vec3};

/// Directions with a smaller component along the plane normal are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-12;

/// The plane a rectangle lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    /// Constant z, bounded in x and y
    Xy,
    /// Constant y, bounded in x and z
    Xz,
    /// Constant x, bounded in y and z
    Yz,
}

impl Plane {
    /// Axis indices `(a, b, skipped)`.
    #[inline]
    pub fn axes(&self) -> (usize, usize, usize) {
        match self {
            Plane::Xy => (0, 1, 2),
            Plane::Xz => (0, 2, 1),
            Plane::Yz => (1, 2, 0),
        }
    }

    /// Unit vector along the skipped axis.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        match self {
            Plane::Xy => Vec3::Z,
            Plane::Xz => Vec3::Y,
            Plane::Yz => Vec3::X,
        }
    }
}

/// An axis-aligned rectangle.
pub struct Rect {
    plane: Plane,
    a: Interval,
    b: Interval,
    k: f64,
    material: Arc<Material>,
    outward_normal: Vec3,
}

impl Rect {
    /// Create a rectangle in `plane`. The outward normal points along the
    /// positive skipped axis unless `flip_normal` is set.
    pub fn new(
        plane: Plane,
        a: Interval,
        b: Interval,
        k: f64,
        material: Arc<Material>,
        flip_normal: bool,
    ) -> Self {
        let normal = plane.normal();
        Self {
            plane,
            a,
            b,
            k,
            material,
            outward_normal: if flip_normal { -normal } else { normal },
        }
    }

    /// Rectangle at `z = k` spanning `[x0, x1] × [y0, y1]`.
    pub fn xy(
        x0: f64,
        x1: f64,
        y0: f64,
        y1: f64,
        k: f64,
        material: Arc<Material>,
        flip_normal: bool,
    ) -> Self {
        Self::new(Plane::Xy, Interval::new(x0, x1), Interval::new(y0, y1), k, material, flip_normal)
    }

    /// Rectangle at `y = k` spanning `[x0, x1] × [z0, z1]`.
    pub fn xz(
        x0: f64,
        x1: f64,
        z0: f64,
        z1: f64,
        k: f64,
        material: Arc<Material>,
        flip_normal: bool,
    ) -> Self {
        Self::new(Plane::Xz, Interval::new(x0, x1), Interval::new(z0, z1), k, material, flip_normal)
    }

    /// Rectangle at `x = k` spanning `[y0, y1] × [z0, z1]`.
    pub fn yz(
        y0: f64,
        y1: f64,
        z0: f64,
        z1: f64,
        k: f64,
        material: Arc<Material>,
        flip_normal: bool,
    ) -> Self {
        Self::new(Plane::Yz, Interval::new(y0, y1), Interval::new(z0, z1), k, material, flip_normal)
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn outward_normal(&self) -> Vec3 {
        self.outward_normal
    }
}

impl Hittable for Rect {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let (ia, ib, ik) = self.plane.axes();
        let origin = ray.origin();
        let dir = ray.direction();

        // Parallel rays never hit, even when coplanar
        if dir[ik].abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.k - origin[ik]) / dir[ik];
        if !ray_t.contains(t) {
            return None;
        }

        let a = origin[ia] + t * dir[ia];
        let b = origin[ib] + t * dir[ib];
        if !self.a.contains(a) || !self.b.contains(b) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.outward_normal, &self.material))
    }
}
