// Copyright @yucwang 2026

use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, UInt, Vector3f};

use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, Default)]
struct PixelAccumulator {
    sum: Vector3f,
    count: UInt,
}

/// Running per-pixel radiance sums shared by all render workers.
///
/// Each pixel sits behind its own lock, so a sum is always read together with
/// the count it was accumulated with. A readout taken mid-render may mix
/// pixels from different moments.
pub struct AccumulationBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Mutex<PixelAccumulator>>,
}

impl AccumulationBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let pixels = (0..width * height)
            .map(|_| Mutex::new(PixelAccumulator::default()))
            .collect();
        Self { width, height, pixels }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn lock(&self, x: usize, y: usize) -> MutexGuard<'_, PixelAccumulator> {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        self.pixels[x + self.width * y]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_samples(&self, x: usize, y: usize, colour_sum: Vector3f, count: UInt) {
        let mut pixel = self.lock(x, y);
        pixel.sum += colour_sum;
        pixel.count += count;
    }

    /// Current `(sum, count)` of one pixel.
    pub fn pixel(&self, x: usize, y: usize) -> (Vector3f, UInt) {
        let pixel = self.lock(x, y);
        (pixel.sum, pixel.count)
    }

    /// Mean radiance per pixel; pixels without samples are black.
    pub fn readout(&self) -> Bitmap {
        let mut bitmap = Bitmap::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let (sum, count) = self.pixel(x, y);
                if count > 0 {
                    bitmap[(x, y)] = sum / count as Float;
                }
            }
        }
        bitmap
    }
}
