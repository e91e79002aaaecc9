//! Error Types for Sensor Construction and Ground-Truth Acquisition
//!
//! ## Error Categories
//!
//! Failures fall into three categories, and each one is handled at a
//! different place:
//!
//! ### Configuration Errors
//! - Returned as [`ConfigError`] from sensor constructors.
//! - Fatal for that sensor: a malformed numeric parameter is never coerced
//!   into a default. Fix the configuration and construct again.
//!
//! ### Capability Errors
//! - [`AcquisitionError::NotSupported`]: the sensor was configured without
//!   ground-truth capability. Every `sample()` returns an error reading.
//!
//! ### Collaborator Contract Errors
//! - [`AcquisitionError::MissingAccessor`]: the environment does not expose
//!   the query this sensor needs.
//! - [`AcquisitionError::QueryFailed`]: the query itself failed.
//! - [`AcquisitionError::Malformed`]: the returned data broke the shape
//!   contract (missing keys, wrong grid size, non-finite values).
//!
//! Acquisition errors never escape `sample()`. The sensor converts them into
//! an [`ErrorReading`](crate::reading::ErrorReading) and records a
//! diagnostic:
//!
//! ```rust
//! use sensorsim_core::{EmfSensor, SensorConfig, StaticEnvironment};
//!
//! let config = SensorConfig::new("emf-1");
//! let mut sensor = EmfSensor::emf(config)?;
//!
//! // The empty environment has no EMF accessor
//! let output = sensor.sample(&StaticEnvironment::new());
//! assert!(output.is_error());
//! assert_eq!(sensor.diagnostics().len(), 1);
//! # Ok::<(), sensorsim_core::ConfigError>(())
//! ```
//!
//! Optional downstream stages never produce errors at all. A missing ambient
//! or clock accessor only skips the stage and records a warning.

use thiserror_no_std::Error;

/// Result type for sensor construction
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Invalid sensor configuration, detected at construction time
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Parameter must be a finite number
    #[error("Parameter `{name}` must be numeric, got {value}")]
    NotNumeric {
        /// Configuration key that failed
        name: &'static str,
        /// Offending value, rendered for display
        value: String,
    },

    /// Parameter outside its permitted interval
    #[error("Parameter `{name}` = {value} outside {expected}")]
    OutOfRange {
        /// Configuration key that failed
        name: &'static str,
        /// Offending value
        value: f64,
        /// Human-readable description of the accepted interval
        expected: &'static str,
    },

    /// Parameter required by this sensor variant is absent
    #[error("Missing required parameter `{name}` for {sensor}")]
    MissingParameter {
        /// Configuration key that is missing
        name: &'static str,
        /// Sensor variant requiring it
        sensor: &'static str,
    },

    /// Pixel coordinate does not fit the configured resolution
    #[error("Pixel ({x}, {y}) outside {width}x{height} sensor")]
    PixelOutOfBounds {
        /// Column of the coordinate
        x: usize,
        /// Row of the coordinate
        y: usize,
        /// Configured width
        width: usize,
        /// Configured height
        height: usize,
    },

    /// Sensor identifier is empty
    #[error("Sensor id must not be empty")]
    EmptySensorId,
}

impl ConfigError {
    /// Shorthand for a non-finite numeric parameter
    pub fn not_numeric(name: &'static str, value: f64) -> Self {
        Self::NotNumeric {
            name,
            value: format!("{value}"),
        }
    }
}

/// Failure while obtaining ground truth from the environment
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AcquisitionError {
    /// Sensor configured without ground-truth capability
    #[error("Ground truth acquisition not supported by sensor {sensor_id}")]
    NotSupported {
        /// Sensor that was sampled
        sensor_id: String,
    },

    /// Environment does not implement the required accessor
    #[error("Environment lacks required method `{method}`")]
    MissingAccessor {
        /// Accessor name
        method: &'static str,
    },

    /// The accessor reported a failure
    #[error("Failed to get {signal}: {cause}")]
    QueryFailed {
        /// Signal being acquired
        signal: &'static str,
        /// Failure description from the environment
        cause: String,
    },

    /// The returned data does not match the expected shape
    #[error("Malformed data for {signal}: {detail}")]
    Malformed {
        /// Signal being acquired
        signal: &'static str,
        /// What was wrong with it
        detail: String,
    },
}

/// Failure reported by an [`Environment`](crate::environment::Environment) accessor
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct EnvironmentFault(pub String);

impl EnvironmentFault {
    /// Create a fault from any message
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
