//! Point temperature probe adapter

use crate::config::SensorConfig;
use crate::constants::physics::ABSOLUTE_ZERO_CELSIUS;
use crate::constants::sensors::TEMPERATURE_C;
use crate::environment::Environment;
use crate::errors::AcquisitionError;
use crate::reading::{GroundTruthReading, ScalarReading};
use crate::validation::Capabilities;

use super::{ensure_finite, resolve, GroundTruthAdapter};

const SIGNAL: &str = "point temperature";

/// Scalar temperature sensor without frequency response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeAdapter;

impl GroundTruthAdapter for ProbeAdapter {
    fn name(&self) -> &'static str {
        "temperature probe"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    fn lower_bound(&self) -> Option<f64> {
        Some(ABSOLUTE_ZERO_CELSIUS)
    }

    fn acquire(
        &self,
        config: &SensorConfig,
        environment: &dyn Environment,
    ) -> Result<GroundTruthReading, AcquisitionError> {
        let celsius = resolve(
            environment.point_temperature(config.position_3d),
            "point_temperature",
            SIGNAL,
        )?;
        let celsius = ensure_finite(SIGNAL, TEMPERATURE_C, celsius)?;
        Ok(ScalarReading::new().with_field(TEMPERATURE_C, celsius).into())
    }
}
