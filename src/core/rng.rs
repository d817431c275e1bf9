// Copyright @yucwang 2026

use crate::math::constants::Float;

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Random generator owned by a single call path. It is handed down the
/// recursion as `&mut` and never shared between threads.
///
/// Seeding is two-level: the tile scheduler seeds one generator from the
/// image size and draws a `u32` per work unit, and the worker rendering that
/// unit builds a fresh `SampleRng` from the draw.
pub struct SampleRng {
    inner: Pcg32,
}

impl SampleRng {
    pub fn new(seed: u64) -> Self {
        Self { inner: Pcg32::seed_from_u64(seed) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    /// Uniform in [0, 1).
    pub fn next_f32(&mut self) -> Float {
        self.inner.gen::<Float>()
    }
}
