//! Additive noise injection
//!
//! Every field and every cell receives an independent draw per call. The
//! result is clamped to the sensor's physical lower bound after the noise is
//! added, so a field strength never reads negative.
//!
//! Uniform noise is scaled to the configured standard deviation: a uniform
//! distribution of half-width `a` has σ = a/√3, so `a = σ·√3`.

use crate::config::{NoiseConfig, NoiseKind};
use crate::random::NoiseSource;
use crate::reading::GroundTruthReading;

use super::{ImperfectionStage, StageContext, StageKind};

/// Additive stochastic noise with an optional floor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseInjector {
    kind: NoiseKind,
    mean: f64,
    stddev: f64,
    lower_bound: Option<f64>,
}

impl NoiseInjector {
    /// Build the stage, or `None` when noise is absent or has zero spread
    pub fn from_config(config: Option<&NoiseConfig>, lower_bound: Option<f64>) -> Option<Self> {
        let config = config?;
        if config.stddev == 0.0 {
            return None;
        }
        Some(Self {
            kind: config.kind,
            mean: config.mean,
            stddev: config.stddev,
            lower_bound,
        })
    }

    /// Floor applied after noise
    pub fn lower_bound(&self) -> Option<f64> {
        self.lower_bound
    }

    fn draw(&self, noise: &mut dyn NoiseSource) -> f64 {
        match self.kind {
            NoiseKind::Gaussian => noise.gaussian(self.mean, self.stddev),
            NoiseKind::Uniform => {
                let half_width = self.stddev * libm::sqrt(3.0);
                noise.uniform(self.mean - half_width, self.mean + half_width)
            }
        }
    }
}

impl ImperfectionStage for NoiseInjector {
    fn kind(&self) -> StageKind {
        StageKind::Noise
    }

    fn apply(&self, mut reading: GroundTruthReading, ctx: &mut StageContext<'_>) -> GroundTruthReading {
        let noise = &mut *ctx.noise;
        reading.for_each_value_mut(|_, value| {
            let noisy = *value + self.draw(&mut *noise);
            *value = match self.lower_bound {
                Some(floor) => noisy.max(floor),
                None => noisy,
            };
        });
        reading
    }
}
