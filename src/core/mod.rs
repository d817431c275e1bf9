// Copyright @yucwang 2021

pub mod camera;
pub mod integrator;
pub mod interaction;
pub mod material;
pub mod rng;
pub mod scene;
pub mod shape;
