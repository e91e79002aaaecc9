//! Sensor imperfection pipeline for SensorSim
//!
//! Turns exact ground truth from a simulated environment into the kind of
//! readings a real instrument produces: compensation error, calibration
//! error, optics blur, dead and hot pixels, frequency response, lag, noise
//! and drift.
//!
//! Key properties:
//! - Each sensor owns its state, noise source and diagnostic log
//! - Missing optional capabilities skip a stage with a diagnostic, never fail
//! - Bad numeric configuration fails construction, never defaults silently
//!
//! ```no_run
//! use sensorsim_core::{SensorConfig, StaticEnvironment, ThermalCamera};
//! use sensorsim_core::config::{BlurConfig, NoiseConfig};
//! use sensorsim_core::types::Resolution;
//!
//! let config = SensorConfig::new("thermal-1")
//!     .with_resolution(32, 24)
//!     .with_blur(BlurConfig::gaussian(1.0))
//!     .with_noise(NoiseConfig::gaussian(0.0, 0.1))
//!     .with_dead_pixel(3, 4);
//!
//! let mut camera = ThermalCamera::thermal_camera(config).expect("valid config");
//! let env = StaticEnvironment::new().with_uniform_thermal(Resolution::new(32, 24), 21.0);
//!
//! match camera.sample(&env).image() {
//!     Some(image) => println!("mean {:.2}", image.sum() / 768.0),
//!     None => {} // Acquisition failed, see camera.diagnostics()
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod environment;
pub mod errors;
pub mod pipeline;
pub mod random;
pub mod reading;
pub mod sensor;
pub mod sensors;
pub mod stages;
pub mod state;
pub mod types;
pub mod validation;

// Public API
pub use config::SensorConfig;
pub use diagnostics::{Diagnostic, DiagnosticLog, Severity};
pub use environment::{Environment, StaticEnvironment};
pub use errors::{AcquisitionError, ConfigError, ConfigResult};
pub use random::{DefaultNoise, NoiseSource, RngNoise};
pub use reading::{ErrorReading, GroundTruthReading, ImageReading, ScalarReading, SensorOutput};
pub use sensor::{EmfSensor, Sensor, TemperatureProbe, ThermalCamera};
pub use sensors::GroundTruthAdapter;
pub use state::SensorState;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
