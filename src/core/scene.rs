// Copyright @yucwang 2026

use crate::core::interaction::SurfaceIntersection;
use crate::core::material::Material;
use crate::core::shape::Shape;
use crate::math::constants::Vector3f;
use crate::math::ray::Ray3f;

/// Read-only view of the world used by integrators. Implementations are
/// queried concurrently from every render worker.
pub trait Scene: Sync {
    /// Closest hit along `ray`, or `None` when the ray escapes.
    fn intersect(&self, ray: &Ray3f) -> Option<SurfaceIntersection>;
    fn environment(&self, ray: &Ray3f) -> Vector3f;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Environment {
    Constant(Vector3f),
    /// Blend from `horizon` to `zenith` with the ray's upward component.
    Sky { horizon: Vector3f, zenith: Vector3f },
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Constant(Vector3f::zeros())
    }
}

impl Environment {
    pub fn eval(&self, ray: &Ray3f) -> Vector3f {
        match self {
            Environment::Constant(colour) => *colour,
            Environment::Sky { horizon, zenith } => {
                let t = ray.dir().y.clamp(0.0, 1.0);
                *horizon * (1.0 - t) + *zenith * t
            }
        }
    }
}

pub struct SceneObject {
    pub shape: Box<dyn Shape>,
    pub material: Material,
    pub name: Option<String>,
}

impl SceneObject {
    pub fn new(shape: Box<dyn Shape>, material: Material) -> Self {
        Self { shape, material, name: None }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

/// Brute-force list of objects; fine for the handful of primitives in the
/// built-in scenes.
#[derive(Default)]
pub struct ShapeScene {
    objects: Vec<SceneObject>,
    environment: Environment,
}

impl ShapeScene {
    pub fn new(environment: Environment) -> Self {
        Self { objects: Vec::new(), environment }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    pub fn with_object(mut self, object: SceneObject) -> Self {
        self.add_object(object);
        self
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }
}

impl Scene for ShapeScene {
    fn intersect(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let mut closest = *ray;
        let mut result = None;
        for object in &self.objects {
            if let Some(hit) = object.shape.ray_intersection(&closest) {
                closest.max_t = hit.t;
                let normal = if hit.normal.dot(&ray.dir()) > 0.0 { -hit.normal } else { hit.normal };
                result = Some(SurfaceIntersection::new(hit.p, normal, hit.t, object.material));
            }
        }
        result
    }

    fn environment(&self, ray: &Ray3f) -> Vector3f {
        self.environment.eval(ray)
    }
}
