// Copyright @yucwang 2026

use crate::core::rng::SampleRng;
use crate::math::constants::UInt;

use std::fmt;

pub const DEFAULT_TILE_SIZE: usize = 16;
pub const DEFAULT_SAMPLES_PER_BATCH: UInt = 8;

/// One schedulable piece of work: a pixel rectangle and a contiguous range of
/// that tile's sample budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileBatch {
    pub x_begin: usize,
    pub x_end: usize,
    pub y_begin: usize,
    pub y_end: usize,
    pub samples: UInt,
    pub sample_offset: UInt,
    /// Squared distance from the tile midpoint to the image centre.
    pub distance_sqr: u64,
    /// Seed for the generator of whichever worker renders this batch.
    pub seed: u32,
}

impl TileBatch {
    pub fn key(&self) -> u64 {
        self.distance_sqr
    }

    pub fn pixel_count(&self) -> usize {
        (self.x_end - self.x_begin) * (self.y_end - self.y_begin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileConfig {
    pub tile_width: usize,
    pub tile_height: usize,
    pub samples_per_batch: UInt,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            tile_width: DEFAULT_TILE_SIZE,
            tile_height: DEFAULT_TILE_SIZE,
            samples_per_batch: DEFAULT_SAMPLES_PER_BATCH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileError {
    ZeroTileSize,
    ZeroBatchSize,
    ZeroSamples,
}

impl fmt::Display for TileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileError::ZeroTileSize => write!(f, "tile width and height must be positive"),
            TileError::ZeroBatchSize => write!(f, "samples per batch must be positive"),
            TileError::ZeroSamples => write!(f, "samples per pixel must be positive"),
        }
    }
}

impl std::error::Error for TileError {}

/// Split a `width × height` image into tile batches, ordered by descending
/// distance from the image centre. Consumers take from the back of the list,
/// so tiles near the centre are rendered first.
///
/// Seeds are drawn from one generator seeded with `width * height`, one per
/// batch in row-major generation order, so a given image size and tiling
/// always produces the same seeds.
pub fn generate_tiles(width: usize,
                      height: usize,
                      config: &TileConfig,
                      samples_per_pixel: UInt) -> Result<Vec<TileBatch>, TileError> {
    if config.tile_width == 0 || config.tile_height == 0 {
        return Err(TileError::ZeroTileSize);
    }
    if config.samples_per_batch == 0 {
        return Err(TileError::ZeroBatchSize);
    }
    if samples_per_pixel == 0 {
        return Err(TileError::ZeroSamples);
    }

    let mut rng = SampleRng::new((width * height) as u64);
    let centre_x = (width / 2) as i64;
    let centre_y = (height / 2) as i64;

    let mut tiles = Vec::new();
    for y_begin in (0..height).step_by(config.tile_height) {
        let y_end = (y_begin + config.tile_height).min(height);
        for x_begin in (0..width).step_by(config.tile_width) {
            let x_end = (x_begin + config.tile_width).min(width);
            let dx = ((x_begin + x_end) / 2) as i64 - centre_x;
            let dy = ((y_begin + y_end) / 2) as i64 - centre_y;
            let distance_sqr = (dx * dx + dy * dy) as u64;

            for sample_offset in (0..samples_per_pixel).step_by(config.samples_per_batch as usize) {
                let samples = config.samples_per_batch.min(samples_per_pixel - sample_offset);
                tiles.push(TileBatch {
                    x_begin,
                    x_end,
                    y_begin,
                    y_end,
                    samples,
                    sample_offset,
                    distance_sqr,
                    seed: rng.next_u32(),
                });
            }
        }
    }

    // `sort_by` is stable: equal keys keep generation order.
    tiles.sort_by(|lhs, rhs| rhs.key().cmp(&lhs.key()));
    Ok(tiles)
}
