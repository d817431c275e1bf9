// Copyright @yucwang 2026

use crate::core::rng::SampleRng;
use crate::core::scene::Scene;
use crate::math::constants::{UInt, Vector3f};
use crate::math::ray::Ray3f;

pub trait Integrator: Sync {
    /// Radiance arriving along `ray`. `depth` counts bounces already taken and
    /// the `u_samples × v_samples` grid sets the fan-out at this bounce.
    fn radiance(&self,
                scene: &dyn Scene,
                ray: &Ray3f,
                depth: UInt,
                u_samples: UInt,
                v_samples: UInt,
                rng: &mut SampleRng) -> Vector3f;

    /// Grid requested for the primary hit.
    fn first_bounce_samples(&self) -> (UInt, UInt) {
        (1, 1)
    }
}
