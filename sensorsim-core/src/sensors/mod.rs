//! Ground-Truth Adapters
//!
//! ## Overview
//!
//! An adapter is the only piece of a sensor that knows which environment
//! accessor to call and what shape the answer must have. Everything after
//! acquisition is shape-driven and shared by all variants.
//!
//! | Variant | Accessor | Reading | Capabilities | Noise floor |
//! |---------|----------|---------|--------------|-------------|
//! | [`EmfAdapter`] | `emf_field_strength` | scalar `field_strength` + frequency | frequency | 0 V/m |
//! | [`ThermalAdapter`] | `thermal_image` | image `temperature_c` | image | −273.15 °C |
//! | [`ProbeAdapter`] | `point_temperature` | scalar `temperature_c` | none | −273.15 °C |
//!
//! ## Contract
//!
//! 1. A `None` from the environment is [`AcquisitionError::MissingAccessor`]
//! 2. An `Err` from the environment is [`AcquisitionError::QueryFailed`]
//! 3. Data of the wrong shape, or containing non-finite values, is
//!    [`AcquisitionError::Malformed`]
//! 4. Valid data is passed through unmodified

pub mod emf;
pub mod probe;
pub mod thermal;

pub use emf::EmfAdapter;
pub use probe::ProbeAdapter;
pub use thermal::ThermalAdapter;

use crate::config::SensorConfig;
use crate::environment::{Environment, Query};
use crate::errors::AcquisitionError;
use crate::reading::GroundTruthReading;
use crate::validation::Capabilities;

/// Per-variant ground-truth acquisition
pub trait GroundTruthAdapter {
    /// Variant name used in configuration errors
    fn name(&self) -> &'static str;

    /// What the variant requires from its configuration
    fn capabilities(&self) -> Capabilities;

    /// Physical floor for noisy output, if any
    fn lower_bound(&self) -> Option<f64>;

    /// Query the environment and check the shape of its answer
    fn acquire(
        &self,
        config: &SensorConfig,
        environment: &dyn Environment,
    ) -> Result<GroundTruthReading, AcquisitionError>;
}

/// Resolve a capability query into data or the matching acquisition error
pub(crate) fn resolve<T>(query: Query<T>, method: &'static str, signal: &'static str) -> Result<T, AcquisitionError> {
    query
        .ok_or(AcquisitionError::MissingAccessor { method })?
        .map_err(|fault| AcquisitionError::QueryFailed {
            signal,
            cause: fault.to_string(),
        })
}

/// Reject non-finite values
pub(crate) fn ensure_finite(signal: &'static str, what: &str, value: f64) -> Result<f64, AcquisitionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AcquisitionError::Malformed {
            signal,
            detail: format!("{what} is {value}"),
        })
    }
}
