//! EMF meter adapter

use crate::config::SensorConfig;
use crate::constants::physics::FIELD_MAGNITUDE_FLOOR;
use crate::constants::sensors::{DOMINANT_FREQUENCY, FIELD_STRENGTH};
use crate::environment::Environment;
use crate::errors::AcquisitionError;
use crate::reading::{GroundTruthReading, ScalarReading};
use crate::validation::Capabilities;

use super::{ensure_finite, resolve, GroundTruthAdapter};

const SIGNAL: &str = "EMF field strength";

/// Scalar field-strength sensor with frequency response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmfAdapter;

impl GroundTruthAdapter for EmfAdapter {
    fn name(&self) -> &'static str {
        "EMF meter"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            image: false,
            frequency: true,
        }
    }

    fn lower_bound(&self) -> Option<f64> {
        Some(FIELD_MAGNITUDE_FLOOR)
    }

    fn acquire(
        &self,
        config: &SensorConfig,
        environment: &dyn Environment,
    ) -> Result<GroundTruthReading, AcquisitionError> {
        let fields = resolve(
            environment.emf_field_strength(config.position_3d, config.specific_params.frequency_range),
            "emf_field_strength",
            SIGNAL,
        )?;

        if !fields.contains_key(FIELD_STRENGTH) {
            return Err(AcquisitionError::Malformed {
                signal: SIGNAL,
                detail: format!("missing `{FIELD_STRENGTH}`"),
            });
        }

        let mut reading = ScalarReading::new();
        for (name, value) in fields {
            let value = ensure_finite(SIGNAL, &name, value)?;
            if name == DOMINANT_FREQUENCY {
                reading.dominant_frequency_hz = Some(value);
            } else {
                reading.fields.insert(name, value);
            }
        }
        Ok(reading.into())
    }
}
