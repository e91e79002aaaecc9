//! Frequency-dependent gain
//!
//! A sensor responds fully inside its design band widened by the tolerance,
//! and is scaled by `default_frequency_gain` outside it. Only scalar readings
//! that carry a dominant frequency are affected; the frequency itself is
//! metadata and passes through unchanged.

use crate::config::SpecificParams;
use crate::constants::sensors::{DEFAULT_FREQUENCY_TOLERANCE_HZ, DEFAULT_OUT_OF_BAND_GAIN, IN_BAND_GAIN};
use crate::reading::GroundTruthReading;
use crate::types::FrequencyRange;

use super::{ImperfectionStage, StageContext, StageKind};

/// Band-dependent multiplicative gain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyGain {
    band: FrequencyRange,
    tolerance_hz: f64,
    out_of_band_gain: f64,
}

impl FrequencyGain {
    /// Build the stage, or `None` when no design band is configured
    pub fn from_params(params: &SpecificParams) -> Option<Self> {
        let band = params.frequency_range?;
        Some(Self {
            band,
            tolerance_hz: params.frequency_tolerance_hz.unwrap_or(DEFAULT_FREQUENCY_TOLERANCE_HZ),
            out_of_band_gain: params.default_frequency_gain.unwrap_or(DEFAULT_OUT_OF_BAND_GAIN),
        })
    }

    /// Gain for a signal at `frequency_hz`
    pub fn gain_at(&self, frequency_hz: f64) -> f64 {
        if self.band.contains_with_tolerance(frequency_hz, self.tolerance_hz) {
            IN_BAND_GAIN
        } else {
            self.out_of_band_gain
        }
    }
}

impl ImperfectionStage for FrequencyGain {
    fn kind(&self) -> StageKind {
        StageKind::FrequencyGain
    }

    fn applies_to(&self, reading: &GroundTruthReading) -> bool {
        reading
            .as_scalar()
            .is_some_and(|s| s.dominant_frequency_hz.is_some())
    }

    fn apply(&self, reading: GroundTruthReading, _ctx: &mut StageContext<'_>) -> GroundTruthReading {
        let Some(frequency) = reading.as_scalar().and_then(|s| s.dominant_frequency_hz) else {
            return reading;
        };

        let gain = self.gain_at(frequency);
        if gain == IN_BAND_GAIN {
            return reading;
        }
        reading.map_values(|v| v * gain)
    }
}
