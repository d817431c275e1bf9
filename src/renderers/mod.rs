// Copyright @yucwang 2021

pub mod accumulation;
pub mod renderer;
pub mod tiled;
pub mod tiles;
pub mod work_queue;
