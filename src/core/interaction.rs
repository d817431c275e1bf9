// Copyright @yucwang 2023

use crate::core::material::Material;
use crate::math::constants::{ Float, Vector3f };

/// Hit record handed to the integrator. The normal faces the incoming ray.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceIntersection {
    p: Vector3f,
    normal: Vector3f,
    t: Float,
    material: Material,
}

impl SurfaceIntersection {
    pub fn new(new_p: Vector3f,
               new_normal: Vector3f,
               new_t: Float,
               new_material: Material) -> Self {
        Self { p: new_p, normal: new_normal, t: new_t, material: new_material }
    }

    pub fn t(&self) -> Float {
        self.t
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}
