// Copyright @yucwang 2021

use crate::math::bitmap::Bitmap;
use crate::math::constants::UInt;
use crate::renderers::tiles::TileError;

use std::fmt;

/// Render configuration, fixed before `render` is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderParams {
    pub width: usize,
    pub height: usize,
    pub samples_per_pixel: UInt,
    /// Number of worker threads. One is a valid pool.
    pub max_cpus: usize,
    /// Shade first hits with their diffuse colour only.
    pub preview: bool,
    /// Draw a terminal progress bar.
    pub show_progress: bool,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            samples_per_pixel: 32,
            max_cpus: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            preview: false,
            show_progress: false,
        }
    }
}

impl RenderParams {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.max_cpus == 0 {
            return Err(RenderError::NoWorkers);
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::Tiles(TileError::ZeroSamples));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum RenderError {
    Tiles(TileError),
    NoWorkers,
    EmptyFirstBounceGrid,
    WorkerPanicked { worker: usize },
}

impl From<TileError> for RenderError {
    fn from(err: TileError) -> Self {
        RenderError::Tiles(err)
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Tiles(err) => write!(f, "tile configuration error: {}", err),
            RenderError::NoWorkers => write!(f, "render needs at least one worker thread"),
            RenderError::EmptyFirstBounceGrid => write!(f, "first bounce sample grid must be at least 1x1"),
            RenderError::WorkerPanicked { worker } => write!(f, "render worker {} panicked", worker),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Tiles(err) => Some(err),
            _ => None,
        }
    }
}

pub trait Renderer {
    /// Render to completion. `progress` may be called from any worker with a
    /// partial image while other workers are still accumulating.
    fn render(&self, progress: &(dyn Fn(&Bitmap) + Sync)) -> Result<Bitmap, RenderError>;
}
