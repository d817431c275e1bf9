// Copyright @yucwang 2026

use crate::core::camera::Camera;
use crate::core::rng::SampleRng;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::warp::sample_uniform_disk_concentric;

pub struct PerspectiveCamera {
    origin: Vector3f,
    forward: Vector3f,
    right: Vector3f,
    up: Vector3f,
    tan_half_fov_y: Float,
    aspect: Float,
    aperture_radius: Float,
    focal_distance: Float,
}

impl PerspectiveCamera {
    pub fn new(origin: Vector3f,
               target: Vector3f,
               up: Vector3f,
               fov_y_radians: Float,
               aspect: Float) -> Self {
        let forward = (target - origin).normalize();
        let right = forward.cross(&up).normalize();
        let up = right.cross(&forward).normalize();

        Self {
            origin,
            forward,
            right,
            up,
            tan_half_fov_y: (0.5 * fov_y_radians).tan(),
            aspect,
            aperture_radius: 0.0,
            focal_distance: (target - origin).norm(),
        }
    }

    /// Thin lens: rays leave a disk of `aperture_radius` and converge on the
    /// plane `focal_distance` along the view direction.
    pub fn with_aperture(mut self, aperture_radius: Float, focal_distance: Float) -> Self {
        self.aperture_radius = aperture_radius.max(0.0);
        self.focal_distance = focal_distance;
        self
    }
}

impl Camera for PerspectiveCamera {
    fn ray(&self, ndc_x: Float, ndc_y: Float, rng: &mut SampleRng) -> Ray3f {
        let px = ndc_x * self.aspect * self.tan_half_fov_y;
        let py = -ndc_y * self.tan_half_fov_y;
        let dir = (self.right * px + self.up * py + self.forward).normalize();

        if self.aperture_radius <= 0.0 {
            return Ray3f::new(self.origin, dir, Some(0.0), None);
        }

        let focus = self.origin + dir * (self.focal_distance / dir.dot(&self.forward));
        let lens = sample_uniform_disk_concentric(&Vector2f::new(rng.next_f32(), rng.next_f32()))
            * self.aperture_radius;
        let origin = self.origin + self.right * lens.x + self.up * lens.y;
        Ray3f::new(origin, focus - origin, Some(0.0), None)
    }

    fn describe(&self) -> String {
        format!("PerspectiveCamera {{ origin: {:?}, forward: {:?}, aperture: {} }}",
                self.origin, self.forward, self.aperture_radius)
    }
}
