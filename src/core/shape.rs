// Copyright @yucwang 2023

use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;

/// Geometric part of a hit, before a material is attached.
#[derive(Debug, Clone, Copy)]
pub struct ShapeHit {
    pub t: Float,
    pub p: Vector3f,
    pub normal: Vector3f,
}

pub trait Shape: Send + Sync {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<ShapeHit>;
}
