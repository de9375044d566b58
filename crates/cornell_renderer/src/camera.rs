//! Pinhole camera for ray generation.

use cornell_math::{normalized, Point3, Ray, Vec3};

/// Perspective camera with no lens or defocus.
///
/// The basis is computed once at construction and the camera is immutable
/// afterwards, so one instance is shared by every render worker.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Create a camera at `look_from` aimed at `look_at`.
    ///
    /// - `vup`: approximate up direction
    /// - `vfov`: vertical field of view in degrees
    /// - `aspect_ratio`: viewport width over height
    pub fn new(
        look_from: Point3,
        look_at: Point3,
        vup: Vec3,
        vfov: f64,
        aspect_ratio: f64,
    ) -> Self {
        let theta = vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        // w points backwards, out of the screen
        let w = normalized(look_from - look_at);
        let u = normalized(vup.cross(w));
        let v = w.cross(u);

        let horizontal = viewport_width * u;
        let vertical = viewport_height * v;
        let lower_left_corner = look_from - horizontal / 2.0 - vertical / 2.0 - w;

        Self {
            origin: look_from,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
        }
    }

    /// Ray through normalized image-plane coordinates `(s, t)`.
    ///
    /// `(0, 0)` is the bottom-left corner of the viewport, `(1, 1)` the top-right.
    /// The returned direction is unit length.
    pub fn get_ray(&self, s: f64, t: f64) -> Ray {
        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(self.origin, normalized(target - self.origin))
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Camera basis `(u, v, w)`: right, up, backwards.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looking_down_neg_z(aspect: f64) -> Camera {
        Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y, 90.0, aspect)
    }

    #[test]
    fn test_camera_basis() {
        let camera = looking_down_neg_z(1.0);
        let (u, v, w) = camera.basis();

        assert!((u - Vec3::X).length() < 1e-12);
        assert!((v - Vec3::Y).length() < 1e-12);
        assert!((w - Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let look_from = Vec3::new(1.0, 2.0, 3.0);
        let look_at = Vec3::new(-1.0, 0.5, -4.0);
        let camera = Camera::new(look_from, look_at, Vec3::Y, 40.0, 16.0 / 9.0);

        let ray = camera.get_ray(0.5, 0.5);
        assert_eq!(ray.origin(), look_from);
        assert!((ray.direction() - (look_at - look_from).normalize()).length() < 1e-9);
        assert!((ray.direction().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_corner_rays() {
        // 90 degree fov, square viewport: corners sit at 45 degrees on both axes
        let camera = looking_down_neg_z(1.0);

        let bottom_left = camera.get_ray(0.0, 0.0).direction();
        assert!((bottom_left - Vec3::new(-1.0, -1.0, -1.0).normalize()).length() < 1e-9);

        let top_right = camera.get_ray(1.0, 1.0).direction();
        assert!((top_right - Vec3::new(1.0, 1.0, -1.0).normalize()).length() < 1e-9);
    }

    #[test]
    fn test_aspect_ratio_widens_viewport() {
        let camera = looking_down_neg_z(2.0);
        let right_edge = camera.get_ray(1.0, 0.5).direction();
        assert!((right_edge - Vec3::new(2.0, 0.0, -1.0).normalize()).length() < 1e-9);
    }
}
