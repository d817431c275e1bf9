// Copyright @yucwang 2026

use crate::core::shape::{Shape, ShapeHit};
use crate::math::constants::{EPSILON, Vector3f};
use crate::math::ray::Ray3f;

/// Parallelogram spanned by `edge_u` and `edge_v` from `corner`. Two-sided.
pub struct Rectangle {
    corner: Vector3f,
    edge_u: Vector3f,
    edge_v: Vector3f,
    cross: Vector3f,
    normal: Vector3f,
}

impl Rectangle {
    pub fn new(corner: Vector3f, edge_u: Vector3f, edge_v: Vector3f) -> Self {
        let cross = edge_u.cross(&edge_v);
        let normal = cross.normalize();
        Self { corner, edge_u, edge_v, cross, normal }
    }
}

impl Shape for Rectangle {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<ShapeHit> {
        let denom = self.normal.dot(&ray.dir());
        if denom.abs() < EPSILON {
            return None;
        }

        let t = self.normal.dot(&(self.corner - ray.origin())) / denom;
        if !ray.test_segment(t) {
            return None;
        }

        let p = ray.at(t);
        let w = p - self.corner;
        let area_sqr = self.cross.norm_squared();
        let a = w.cross(&self.edge_v).dot(&self.cross) / area_sqr;
        let b = self.edge_u.cross(&w).dot(&self.cross) / area_sqr;
        if !(0.0..=1.0).contains(&a) || !(0.0..=1.0).contains(&b) {
            return None;
        }

        Some(ShapeHit { t, p, normal: self.normal })
    }
}
