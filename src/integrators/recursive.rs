// Copyright @yucwang 2026

use crate::core::integrator::Integrator;
use crate::core::rng::SampleRng;
use crate::core::scene::Scene;
use crate::math::constants::{EPSILON, Float, UInt, Vector3f};
use crate::math::frame::{reflect, Frame};
use crate::math::ray::Ray3f;
use crate::math::warp::{sample_cone, sample_hemisphere};

pub const DEFAULT_MAX_DEPTH: UInt = 5;
pub const DEFAULT_FIRST_BOUNCE_U_SAMPLES: UInt = 1;
pub const DEFAULT_FIRST_BOUNCE_V_SAMPLES: UInt = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegratorConfig {
    /// Bounces at or beyond this depth contribute nothing.
    pub max_depth: UInt,
    pub first_bounce_u_samples: UInt,
    pub first_bounce_v_samples: UInt,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            first_bounce_u_samples: DEFAULT_FIRST_BOUNCE_U_SAMPLES,
            first_bounce_v_samples: DEFAULT_FIRST_BOUNCE_V_SAMPLES,
        }
    }
}

/// Depth-truncated recursive path tracer.
///
/// Each sub-sample picks between a glossy cone around the mirror direction
/// (with probability `reflectivity`) and a uniform hemisphere bounce, then
/// recurses with a single sample. Truncating at `max_depth` biases the
/// estimate towards black; the bias shrinks as the depth bound grows.
pub struct RecursiveIntegrator {
    pub config: IntegratorConfig,
    /// Return the diffuse colour at the first hit instead of integrating.
    pub preview: bool,
}

impl RecursiveIntegrator {
    pub fn new(config: IntegratorConfig, preview: bool) -> Self {
        Self { config, preview }
    }
}

impl Integrator for RecursiveIntegrator {
    fn radiance(&self,
                scene: &dyn Scene,
                ray: &Ray3f,
                depth: UInt,
                u_samples: UInt,
                v_samples: UInt,
                rng: &mut SampleRng) -> Vector3f {
        if depth >= self.config.max_depth {
            return Vector3f::zeros();
        }
        let intersection = match scene.intersect(ray) {
            Some(hit) => hit,
            None => return scene.environment(ray),
        };

        let mat = intersection.material();
        if self.preview {
            return mat.diffuse;
        }

        // An empty sub-sample grid gathers nothing.
        if u_samples == 0 || v_samples == 0 {
            return Vector3f::zeros();
        }

        let p = intersection.p();
        let normal = intersection.normal();
        let basis = Frame::from_z(normal);

        let mut result = Vector3f::zeros();
        for u_sample in 0..u_samples {
            for v_sample in 0..v_samples {
                let u = (u_sample as Float + rng.next_f32()) / u_samples as Float;
                let v = (v_sample as Float + rng.next_f32()) / v_samples as Float;
                let choice = rng.next_f32();

                let dir = if choice < mat.reflectivity {
                    let mirror = reflect(&ray.dir(), &normal);
                    sample_cone(&mirror, mat.reflection_cone_angle(), u, v)
                } else {
                    sample_hemisphere(&basis, u, v)
                };
                let next = Ray3f::new(p, dir, Some(EPSILON), None);

                let incoming = self.radiance(scene, &next, depth + 1, 1, 1, rng);
                result += mat.emission + mat.diffuse.component_mul(&incoming);
            }
        }

        if u_samples == 1 && v_samples == 1 {
            result
        } else {
            result / (u_samples as Float * v_samples as Float)
        }
    }

    fn first_bounce_samples(&self) -> (UInt, UInt) {
        (self.config.first_bounce_u_samples, self.config.first_bounce_v_samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::material::Material;
    use crate::core::scene::{Environment, SceneObject, ShapeScene};
    use crate::shapes::rectangle::Rectangle;
    use crate::shapes::sphere::Sphere;

    fn down_ray() -> Ray3f {
        Ray3f::new(Vector3f::new(0.0, 1.0, 0.0), Vector3f::new(0.0, -1.0, 0.0), None, None)
    }

    fn floor_scene(material: Material, sky: Vector3f) -> ShapeScene {
        let floor = Rectangle::new(Vector3f::new(-50.0, 0.0, 50.0),
                                   Vector3f::new(100.0, 0.0, 0.0),
                                   Vector3f::new(0.0, 0.0, -100.0));
        ShapeScene::new(Environment::Constant(sky))
            .with_object(SceneObject::new(Box::new(floor), material))
    }

    #[test]
    fn test_max_depth_returns_black() {
        let scene = floor_scene(Material::light(Vector3f::new(5.0, 5.0, 5.0)), Vector3f::new(1.0, 1.0, 1.0));
        let integrator = RecursiveIntegrator::new(IntegratorConfig::default(), false);
        let mut rng = SampleRng::new(1);
        for (u, v) in [(1, 1), (4, 4)] {
            let l = integrator.radiance(&scene, &down_ray(), DEFAULT_MAX_DEPTH, u, v, &mut rng);
            assert_eq!(l, Vector3f::zeros());
        }
        let sky_ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 1.0, 0.0), None, None);
        assert_eq!(integrator.radiance(&scene, &sky_ray, DEFAULT_MAX_DEPTH + 3, 1, 1, &mut rng),
                   Vector3f::zeros());
    }

    #[test]
    fn test_miss_returns_environment() {
        let sky = Vector3f::new(0.2, 0.4, 0.8);
        let scene = floor_scene(Material::default(), sky);
        let integrator = RecursiveIntegrator::new(IntegratorConfig::default(), false);
        let mut rng = SampleRng::new(1);
        let up = Ray3f::new(Vector3f::new(0.0, 1.0, 0.0), Vector3f::new(0.0, 1.0, 0.0), None, None);
        assert_eq!(integrator.radiance(&scene, &up, 0, 3, 3, &mut rng), sky);
    }

    #[test]
    fn test_preview_returns_diffuse() {
        let diffuse = Vector3f::new(0.9, 0.3, 0.1);
        let scene = floor_scene(Material::reflective(diffuse, 0.5, 0.1), Vector3f::new(1.0, 1.0, 1.0));
        let integrator = RecursiveIntegrator::new(IntegratorConfig::default(), true);
        let mut rng = SampleRng::new(9);
        for (u, v) in [(1, 1), (2, 3), (8, 8)] {
            assert_eq!(integrator.radiance(&scene, &down_ray(), 0, u, v, &mut rng), diffuse);
        }
    }

    #[test]
    fn test_white_floor_under_constant_sky() {
        // Every hemisphere bounce off the floor escapes to the sky.
        let sky = Vector3f::new(0.5, 0.5, 0.5);
        let scene = floor_scene(Material::diffuse(Vector3f::new(1.0, 1.0, 1.0)), sky);
        let integrator = RecursiveIntegrator::new(IntegratorConfig::default(), false);
        let mut rng = SampleRng::new(5);
        let l = integrator.radiance(&scene, &down_ray(), 0, 4, 4, &mut rng);
        assert!((l - sky).norm() < 1e-5);
    }

    #[test]
    fn test_emission_added_per_bounce() {
        // Inside a closed emissive sphere every path runs to the depth bound:
        // L = e * (1 + d + d^2 + ...), truncated after max_depth terms.
        let emission = Vector3f::new(1.0, 1.0, 1.0);
        let material = Material::diffuse(Vector3f::new(0.5, 0.5, 0.5)).with_emission(emission);
        let scene = ShapeScene::new(Environment::default())
            .with_object(SceneObject::new(Box::new(Sphere::new(Vector3f::zeros(), 10.0)), material));
        let config = IntegratorConfig { max_depth: 3, ..IntegratorConfig::default() };
        let integrator = RecursiveIntegrator::new(config, false);
        let mut rng = SampleRng::new(11);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        let l = integrator.radiance(&scene, &ray, 0, 1, 1, &mut rng);
        assert!((l.x - 1.75).abs() < 1e-4);
    }

    #[test]
    fn test_empty_grid_gathers_nothing() {
        let material = Material::diffuse(Vector3f::new(0.5, 0.5, 0.5)).with_emission(Vector3f::new(1.0, 1.0, 1.0));
        let scene = ShapeScene::new(Environment::Constant(Vector3f::new(1.0, 1.0, 1.0)))
            .with_object(SceneObject::new(Box::new(Sphere::new(Vector3f::zeros(), 10.0)), material));
        let integrator = RecursiveIntegrator::new(IntegratorConfig::default(), false);
        let mut rng = SampleRng::new(4);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        for (u, v) in [(0, 3), (3, 0), (0, 0)] {
            let l = integrator.radiance(&scene, &ray, 0, u, v, &mut rng);
            assert_eq!(l, Vector3f::zeros());
        }
    }

    #[test]
    fn test_mirror_branch_follows_reflection() {
        // A perfect mirror floor reflects the downward ray straight back up
        // into a sky that is only bright overhead.
        let sky = Environment::Sky { horizon: Vector3f::zeros(), zenith: Vector3f::new(1.0, 1.0, 1.0) };
        let floor = Rectangle::new(Vector3f::new(-50.0, 0.0, 50.0),
                                   Vector3f::new(100.0, 0.0, 0.0),
                                   Vector3f::new(0.0, 0.0, -100.0));
        let mirror = Material::reflective(Vector3f::new(1.0, 1.0, 1.0), 1.0, 0.0);
        let scene = ShapeScene::new(sky).with_object(SceneObject::new(Box::new(floor), mirror));
        let integrator = RecursiveIntegrator::new(IntegratorConfig::default(), false);
        let mut rng = SampleRng::new(2);
        let l = integrator.radiance(&scene, &down_ray(), 0, 2, 2, &mut rng);
        assert!((l - Vector3f::new(1.0, 1.0, 1.0)).norm() < 1e-4);
    }
}
