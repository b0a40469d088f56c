//! Reseedable deterministic RNG
//!
//! Owned by the maze, never shared with audio/AI. Each `range`/`random`
//! call consumes exactly one 32-bit draw, so a discarded `range(1)` moves
//! the stream by the same amount as a real draw.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// 2^32, the span of one draw
const DRAW_SPAN: f64 = 4_294_967_296.0;

#[derive(Debug, Clone)]
pub struct MazeRng {
    inner: Pcg32,
}

impl MazeRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Reset the stream; the same seed always replays the same draws
    pub fn reseed(&mut self, seed: u64) {
        self.inner = Pcg32::seed_from_u64(seed);
    }

    /// Uniform float in [0, 1)
    #[inline]
    pub fn random(&mut self) -> f64 {
        self.inner.next_u32() as f64 / DRAW_SPAN
    }

    /// Uniform integer in [0, n)
    #[inline]
    pub fn range(&mut self, n: u32) -> u32 {
        assert!(n > 0, "range(0) has no values");
        (self.random() * n as f64) as u32
    }
}
