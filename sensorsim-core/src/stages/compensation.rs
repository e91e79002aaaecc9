//! Ambient-condition compensation error
//!
//! Models a sensor whose output shifts linearly with an ambient condition
//! such as air temperature:
//!
//! ```text
//! output = input + (ambient − reference_value) × rate_per_unit
//! ```
//!
//! The stage is stateless. When the environment cannot report the ambient
//! value the stage is skipped with a warning.

use crate::config::CompensationConfig;
use crate::reading::GroundTruthReading;

use super::{ImperfectionStage, StageContext, StageKind};

/// Linear ambient compensation on all or selected fields
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentalCompensation {
    config: CompensationConfig,
}

impl EnvironmentalCompensation {
    /// Build the stage from its configuration section
    pub fn from_config(config: Option<&CompensationConfig>) -> Option<Self> {
        config.cloned().map(|config| Self { config })
    }

    fn compensates(&self, field: &str) -> bool {
        match &self.config.fields {
            Some(fields) => fields.iter().any(|f| f == field),
            None => true,
        }
    }
}

impl ImperfectionStage for EnvironmentalCompensation {
    fn kind(&self) -> StageKind {
        StageKind::Compensation
    }

    fn apply(&self, mut reading: GroundTruthReading, ctx: &mut StageContext<'_>) -> GroundTruthReading {
        let quantity = self.config.ambient;
        let Some(ambient) = ctx.environment.ambient(quantity) else {
            ctx.warn(
                StageKind::Compensation,
                format!("environment lacks `{}`, compensation skipped", quantity.accessor()),
            );
            return reading;
        };

        let delta = (ambient - self.config.reference_value) * self.config.rate_per_unit;
        reading.for_each_value_mut(|name, value| {
            if self.compensates(name) {
                *value += delta;
            }
        });
        reading
    }
}
