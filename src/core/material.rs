// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};

/// Surface response used by the recursive integrator.
///
/// `reflectivity` is the probability of continuing along a glossy cone
/// around the mirror direction instead of the diffuse hemisphere. It is a
/// plain weight with no Fresnel or index-of-refraction term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse: Vector3f,
    pub emission: Vector3f,
    pub reflectivity: Float,
    cone_angle: Float,
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(Vector3f::new(0.5, 0.5, 0.5))
    }
}

impl Material {
    pub fn diffuse(colour: Vector3f) -> Self {
        Self {
            diffuse: colour,
            emission: Vector3f::zeros(),
            reflectivity: 0.0,
            cone_angle: 0.0,
        }
    }

    pub fn light(emission: Vector3f) -> Self {
        Self {
            diffuse: Vector3f::zeros(),
            emission,
            reflectivity: 0.0,
            cone_angle: 0.0,
        }
    }

    /// `cone_angle` is the half-angle in radians; zero is a perfect mirror.
    pub fn reflective(colour: Vector3f, reflectivity: Float, cone_angle: Float) -> Self {
        Self {
            diffuse: colour,
            emission: Vector3f::zeros(),
            reflectivity: reflectivity.clamp(0.0, 1.0),
            cone_angle: cone_angle.max(0.0),
        }
    }

    pub fn with_emission(mut self, emission: Vector3f) -> Self {
        self.emission = emission;
        self
    }

    pub fn reflection_cone_angle(&self) -> Float {
        self.cone_angle
    }
}
