//! Injectable randomness for stochastic stages
//!
//! Sensors never touch a global generator. Each sensor owns one boxed
//! [`NoiseSource`]; tests swap it for a deterministic one with
//! `Sensor::with_noise_source`, or seed the default one with
//! `Sensor::with_seed`.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Source of noise draws
pub trait NoiseSource {
    /// One draw from N(mean, stddev²)
    fn gaussian(&mut self, mean: f64, stddev: f64) -> f64;

    /// One draw from U[low, high)
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

/// [`NoiseSource`] backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RngNoise<R> {
    rng: R,
}

/// Default generator used by sensors
pub type DefaultNoise = RngNoise<ChaCha8Rng>;

impl<R: RngCore> RngNoise<R> {
    /// Wrap an existing generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngNoise<ChaCha8Rng> {
    /// Reproducible stream
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Stream seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: RngCore> NoiseSource for RngNoise<R> {
    fn gaussian(&mut self, mean: f64, stddev: f64) -> f64 {
        // Normal::new only rejects non-finite or negative stddev, which validation excludes
        match Normal::new(mean, stddev) {
            Ok(normal) => normal.sample(&mut self.rng),
            Err(_) => mean,
        }
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }
}
