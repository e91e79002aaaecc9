//! Time-proportional drift
//!
//! Drift is deterministic and measured from simulation time zero, not from
//! the sensor's first sample:
//!
//! ```text
//! output = input + rate_per_hour × simulation_seconds / 3600
//! ```
//!
//! Rates are keyed by field name. Image cells use the image's quantity name.

use std::collections::BTreeMap;

use crate::config::DriftConfig;
use crate::constants::physics::SECONDS_PER_HOUR;
use crate::reading::GroundTruthReading;

use super::{ImperfectionStage, StageContext, StageKind};

/// Linear baseline drift per field
#[derive(Debug, Clone, PartialEq)]
pub struct DriftAccumulator {
    rates_per_hour: BTreeMap<String, f64>,
}

impl DriftAccumulator {
    /// Build the stage, or `None` when no field drifts
    pub fn from_config(config: Option<&DriftConfig>) -> Option<Self> {
        let config = config?;
        if config.rates_per_hour.is_empty() {
            return None;
        }
        Some(Self {
            rates_per_hour: config.rates_per_hour.clone(),
        })
    }

    /// Offset accumulated by `field` at `simulation_seconds`
    pub fn offset_at(&self, field: &str, simulation_seconds: f64) -> f64 {
        self.rates_per_hour
            .get(field)
            .map_or(0.0, |rate| rate * simulation_seconds / SECONDS_PER_HOUR)
    }
}

impl ImperfectionStage for DriftAccumulator {
    fn kind(&self) -> StageKind {
        StageKind::Drift
    }

    fn apply(&self, mut reading: GroundTruthReading, ctx: &mut StageContext<'_>) -> GroundTruthReading {
        let Some(seconds) = ctx.environment.simulation_time_seconds() else {
            ctx.warn(
                StageKind::Drift,
                "environment lacks `simulation_time_seconds`, drift skipped",
            );
            return reading;
        };

        reading.for_each_value_mut(|name, value| {
            *value += self.offset_at(name, seconds);
        });
        reading
    }
}
