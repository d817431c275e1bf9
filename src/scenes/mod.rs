// Copyright @yucwang 2026

//! Scenes built in code, selectable by name from the command line.

use crate::core::material::Material;
use crate::core::scene::{Environment, SceneObject, ShapeScene};
use crate::math::constants::{Float, Vector3f};
use crate::sensors::perspective::PerspectiveCamera;
use crate::shapes::rectangle::Rectangle;
use crate::shapes::sphere::Sphere;

use std::fmt;

pub const BUILTIN_SCENES: [&str; 2] = ["cornell", "spheres"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    Unknown(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Unknown(name) => write!(f, "unknown scene '{}', expected one of {:?}", name, BUILTIN_SCENES),
        }
    }
}

impl std::error::Error for SceneError {}

pub fn load_builtin(name: &str, aspect: Float) -> Result<(ShapeScene, PerspectiveCamera), SceneError> {
    log::info!("Loading built-in scene '{}'.", name);
    match name {
        "cornell" => Ok(cornell_box(aspect)),
        "spheres" => Ok(sphere_field(aspect)),
        other => Err(SceneError::Unknown(other.to_string())),
    }
}

fn rect(corner: [Float; 3], edge_u: [Float; 3], edge_v: [Float; 3]) -> Box<Rectangle> {
    Box::new(Rectangle::new(Vector3f::from(corner), Vector3f::from(edge_u), Vector3f::from(edge_v)))
}

/// Closed box from -1 to 1 on every axis except the open front, lit by a
/// panel in the ceiling.
pub fn cornell_box(aspect: Float) -> (ShapeScene, PerspectiveCamera) {
    let white = Material::diffuse(Vector3f::new(0.75, 0.75, 0.75));
    let red = Material::diffuse(Vector3f::new(0.75, 0.25, 0.25));
    let green = Material::diffuse(Vector3f::new(0.25, 0.75, 0.25));
    let light = Material::light(Vector3f::new(12.0, 12.0, 12.0));

    let scene = ShapeScene::new(Environment::default())
        .with_object(SceneObject::new(rect([-1.0, -1.0, -1.0], [0.0, 0.0, 2.0], [0.0, 2.0, 0.0]), red).with_name("left"))
        .with_object(SceneObject::new(rect([1.0, -1.0, -1.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]), green).with_name("right"))
        .with_object(SceneObject::new(rect([-1.0, -1.0, -1.0], [0.0, 2.0, 0.0], [2.0, 0.0, 0.0]), white).with_name("back"))
        .with_object(SceneObject::new(rect([-1.0, -1.0, -1.0], [2.0, 0.0, 0.0], [0.0, 0.0, 2.0]), white).with_name("floor"))
        .with_object(SceneObject::new(rect([-1.0, 1.0, -1.0], [0.0, 0.0, 2.0], [2.0, 0.0, 0.0]), white).with_name("ceiling"))
        .with_object(SceneObject::new(rect([-0.3, 0.999, -0.3], [0.6, 0.0, 0.0], [0.0, 0.0, 0.6]), light).with_name("light"))
        .with_object(SceneObject::new(
            Box::new(Sphere::new(Vector3f::new(-0.45, -0.6, -0.3), 0.4)),
            Material::reflective(Vector3f::new(0.95, 0.95, 0.95), 0.9, 0.02)).with_name("mirror ball"))
        .with_object(SceneObject::new(
            Box::new(Sphere::new(Vector3f::new(0.45, -0.6, 0.3), 0.4)),
            Material::reflective(Vector3f::new(0.3, 0.4, 0.9), 0.2, 0.3)).with_name("glossy ball"));

    let camera = PerspectiveCamera::new(Vector3f::new(0.0, 0.0, 3.4),
                                        Vector3f::new(0.0, 0.0, 0.0),
                                        Vector3f::new(0.0, 1.0, 0.0),
                                        (40.0 as Float).to_radians(),
                                        aspect);
    (scene, camera)
}

/// Spheres of mixed materials on a large ground plane under a sky, seen
/// through a thin lens focused on the middle sphere.
pub fn sphere_field(aspect: Float) -> (ShapeScene, PerspectiveCamera) {
    let sky = Environment::Sky {
        horizon: Vector3f::new(1.0, 1.0, 1.0),
        zenith: Vector3f::new(0.5, 0.7, 1.0),
    };
    let mut scene = ShapeScene::new(sky)
        .with_object(SceneObject::new(rect([-50.0, 0.0, 50.0], [100.0, 0.0, 0.0], [0.0, 0.0, -100.0]),
                                      Material::diffuse(Vector3f::new(0.5, 0.5, 0.5))).with_name("ground"))
        .with_object(SceneObject::new(Box::new(Sphere::new(Vector3f::new(0.0, 1.0, 0.0), 1.0)),
                                      Material::reflective(Vector3f::new(0.9, 0.9, 0.9), 1.0, 0.0)).with_name("mirror"))
        .with_object(SceneObject::new(Box::new(Sphere::new(Vector3f::new(-2.2, 1.0, -0.5), 1.0)),
                                      Material::diffuse(Vector3f::new(0.8, 0.3, 0.2))).with_name("matte"))
        .with_object(SceneObject::new(Box::new(Sphere::new(Vector3f::new(2.2, 1.0, 0.5), 1.0)),
                                      Material::reflective(Vector3f::new(0.8, 0.7, 0.3), 0.6, 0.15)).with_name("brushed"));

    for i in 0..5 {
        let x = -4.0 + 2.0 * i as Float;
        let glow = Material::light(Vector3f::new(2.0, 1.6 + 0.2 * i as Float, 1.0));
        scene.add_object(SceneObject::new(Box::new(Sphere::new(Vector3f::new(x, 0.25, 2.5), 0.25)), glow));
    }

    let origin = Vector3f::new(0.0, 2.0, 8.0);
    let target = Vector3f::new(0.0, 1.0, 0.0);
    let camera = PerspectiveCamera::new(origin,
                                        target,
                                        Vector3f::new(0.0, 1.0, 0.0),
                                        (35.0 as Float).to_radians(),
                                        aspect)
        .with_aperture(0.05, (target - origin).norm());
    (scene, camera)
}
