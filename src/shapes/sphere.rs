// Copyright @yucwang 2026

use crate::core::shape::{Shape, ShapeHit};
use crate::math::constants::{Float, Vector3f};
use crate::math::ray::Ray3f;

pub struct Sphere {
    center: Vector3f,
    radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius }
    }
}

impl Shape for Sphere {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<ShapeHit> {
        let oc = ray.origin() - self.center;
        let b = oc.dot(&ray.dir());
        let c = oc.norm_squared() - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let t = if ray.test_segment(-b - root) {
            -b - root
        } else if ray.test_segment(-b + root) {
            -b + root
        } else {
            return None;
        };

        let p = ray.at(t);
        Some(ShapeHit { t, p, normal: (p - self.center) / self.radius })
    }
}
