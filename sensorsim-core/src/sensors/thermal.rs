//! Thermal camera adapter
//!
//! The environment must return exactly `height` rows of `width` finite cells.
//! Any other shape is rejected so the image resolution can never change
//! during the life of a sensor.

use ndarray::Array2;

use crate::config::SensorConfig;
use crate::constants::physics::ABSOLUTE_ZERO_CELSIUS;
use crate::constants::sensors::TEMPERATURE_C;
use crate::environment::{Environment, RawGrid};
use crate::errors::AcquisitionError;
use crate::reading::{GroundTruthReading, ImageReading};
use crate::types::Resolution;
use crate::validation::Capabilities;

use super::{ensure_finite, resolve, GroundTruthAdapter};

const SIGNAL: &str = "thermal image";

/// Image-valued temperature sensor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThermalAdapter;

impl GroundTruthAdapter for ThermalAdapter {
    fn name(&self) -> &'static str {
        "thermal camera"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            image: true,
            frequency: false,
        }
    }

    fn lower_bound(&self) -> Option<f64> {
        Some(ABSOLUTE_ZERO_CELSIUS)
    }

    fn acquire(
        &self,
        config: &SensorConfig,
        environment: &dyn Environment,
    ) -> Result<GroundTruthReading, AcquisitionError> {
        let resolution = config
            .specific_params
            .resolution
            .ok_or_else(|| malformed("no resolution configured".to_string()))?;

        let rows = resolve(
            environment.thermal_image(config.position_3d, config.sampling_volume, resolution),
            "thermal_image",
            SIGNAL,
        )?;

        let grid = to_grid(rows, resolution)?;
        Ok(ImageReading::from_array(TEMPERATURE_C, grid).into())
    }
}

fn malformed(detail: String) -> AcquisitionError {
    AcquisitionError::Malformed { signal: SIGNAL, detail }
}

/// Check the row layout and cell values, then pack into `(height, width)`
fn to_grid(rows: RawGrid, resolution: Resolution) -> Result<Array2<f64>, AcquisitionError> {
    if rows.len() != resolution.height {
        return Err(malformed(format!(
            "expected {} rows, got {}",
            resolution.height,
            rows.len()
        )));
    }

    if let Some((y, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != resolution.width) {
        return Err(malformed(format!(
            "row {y} has {} cells, expected {}",
            row.len(),
            resolution.width
        )));
    }

    let cells = rows
        .into_iter()
        .flatten()
        .map(|value| ensure_finite(SIGNAL, "pixel", value))
        .collect::<Result<Vec<f64>, _>>()?;

    Array2::from_shape_vec((resolution.height, resolution.width), cells).map_err(|e| malformed(e.to_string()))
}
