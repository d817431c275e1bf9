// Copyright @yucwang 2026

use crate::core::rng::SampleRng;
use crate::math::constants::Float;
use crate::math::ray::Ray3f;

pub trait Camera: Sync {
    /// Primary ray through normalized device coordinates in [-1, 1].
    /// `ndc_y == -1` is the top row of the image. `rng` drives any lens jitter.
    fn ray(&self, ndc_x: Float, ndc_y: Float, rng: &mut SampleRng) -> Ray3f;
    fn describe(&self) -> String {
        String::from("Camera")
    }
}
