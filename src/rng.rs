//! Centralized randomness
//!
//! Every randomized behavior in the crate (motion jitter, settle delays, the
//! slider distance fraction, wander targets) draws from one seedable source so
//! tests can pin a seed and get reproducible output without disabling jitter.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seedable random source shared by all humanization components
#[derive(Debug)]
pub struct Randomness {
    rng: StdRng,
}

impl Randomness {
    /// Create a source seeded from OS entropy (production path)
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a deterministic source from a fixed seed (test path)
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform f64 in [min, max)
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        self.rng.gen_range(min..max)
    }

    /// Uniform u64 in [min, max)
    pub fn range_u64(&mut self, min: u64, max: u64) -> u64 {
        self.rng.gen_range(min..max)
    }

    /// Uniform millisecond duration in [min_ms, max_ms)
    pub fn delay_ms(&mut self, min_ms: u64, max_ms: u64) -> Duration {
        Duration::from_millis(self.range_u64(min_ms, max_ms))
    }

    /// Symmetric jitter in [-spread, spread)
    pub fn jitter(&mut self, spread: f64) -> f64 {
        self.range_f64(-spread, spread)
    }

    /// Bernoulli draw
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }
}

impl Default for Randomness {
    fn default() -> Self {
        Self::from_entropy()
    }
}
