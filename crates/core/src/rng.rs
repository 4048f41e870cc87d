//! RNG module - deterministic piece stream
//!
//! A linear congruential generator `hash(seed) = (a * seed + c) mod m` with
//! a = 1103515245, c = 12345, m = 2^31. Each draw chains `seed = hash(seed)`;
//! the stream is resumable from any seed and reproduces the same sequence for
//! the same seed. Not suitable for anything that needs unpredictability.

use crate::types::{Draw, LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER};

/// One LCG step.
pub fn hash(seed: u32) -> u32 {
    ((LCG_MULTIPLIER * seed as u64 + LCG_INCREMENT) % LCG_MODULUS) as u32
}

/// Map a hash value into `[0, 1]`.
pub fn scale(hash: u32) -> f64 {
    Draw::new(hash).scaled()
}

/// Running LCG state; each [`RngStream::next_draw`] consumes one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RngStream {
    seed: u32,
}

impl RngStream {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Advance the chain and return the new value.
    pub fn next_draw(&mut self) -> Draw {
        self.seed = hash(self.seed);
        Draw::new(self.seed)
    }

    /// Current position in the chain; `RngStream::new(seed())` resumes here.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for RngStream {
    fn default() -> Self {
        Self::new(1)
    }
}
