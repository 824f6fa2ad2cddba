//! Memory-access latency models.
//!
//! The memory stage draws its per-access latency from an injected generator
//! so tests can replace the random draw with a fixed sequence.

use rand::rngs::ThreadRng;
use rand::Rng;

/// Strategy for drawing the extra hold cycles of a memory access.
pub trait LatencyGenerator {
    /// Draws the number of additional cycles the next access is held.
    fn next_delay(&mut self) -> u32;
}

/// Uniform random latency in `min..=max` cycles.
pub struct RandomLatency {
    rng: ThreadRng,
    min: u32,
    max: u32,
}

impl RandomLatency {
    pub fn new(min: u32, max: u32) -> Self {
        Self {
            rng: rand::thread_rng(),
            min,
            max: max.max(min),
        }
    }
}

impl LatencyGenerator for RandomLatency {
    fn next_delay(&mut self) -> u32 {
        self.rng.gen_range(self.min..=self.max)
    }
}

/// Constant latency, used for deterministic runs and tests.
pub struct FixedLatency {
    delay: u32,
}

impl FixedLatency {
    pub fn new(delay: u32) -> Self {
        Self { delay }
    }
}

impl LatencyGenerator for FixedLatency {
    fn next_delay(&mut self) -> u32 {
        self.delay
    }
}
