//! Configuration Validator
//!
//! Runs once, inside the sensor constructor. Every check here is about numeric
//! validity; absent sections are never rejected. A parameter that fails is
//! reported as a [`ConfigError`] and the sensor is not built, so a bad value
//! can never be silently replaced by a default.
//!
//! | Parameter | Rule |
//! |-----------|------|
//! | `response_time_alpha` | finite, in (0, 1] |
//! | `frequency_tolerance_hz` | finite, ≥ 0 (frequency sensors) |
//! | `default_frequency_gain` | finite (frequency sensors) |
//! | `frequency_range` | finite, min ≤ max |
//! | noise `stddev` | finite, ≥ 0 |
//! | calibration gain / offset | finite |
//! | drift rates | finite |
//! | blur `sigma` | finite, ≥ 0 |
//! | `resolution` | required by image sensors, non-zero |
//! | dead / hot pixels | inside `resolution` |

use crate::config::SensorConfig;
use crate::errors::{ConfigError, ConfigResult};

/// What a sensor variant requires from its configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Produces image readings
    pub image: bool,
    /// Reports a dominant frequency and supports frequency gain
    pub frequency: bool,
}

/// Validate a configuration for a sensor variant
pub fn validate(config: &SensorConfig, caps: Capabilities, sensor: &'static str) -> ConfigResult<()> {
    if config.sensor_id.trim().is_empty() {
        return Err(ConfigError::EmptySensorId);
    }

    validate_common(config)?;

    if caps.frequency {
        validate_frequency(config)?;
    }

    if caps.image {
        validate_image(config, sensor)?;
    }

    Ok(())
}

fn validate_common(config: &SensorConfig) -> ConfigResult<()> {
    let alpha = config.specific_params.response_time_alpha;
    finite("response_time_alpha", alpha)?;
    if alpha <= 0.0 || alpha > 1.0 {
        return Err(ConfigError::OutOfRange {
            name: "response_time_alpha",
            value: alpha,
            expected: "(0, 1]",
        });
    }

    if let Some(bound) = config.specific_params.lower_bound {
        finite("lower_bound", bound)?;
    }

    if let Some(noise) = &config.noise_characteristics {
        finite("noise_characteristics.mean", noise.mean)?;
        non_negative("noise_characteristics.stddev", noise.stddev)?;
    }

    if let Some(cal) = &config.calibration_artifacts {
        finite("calibration_artifacts.global_gain", cal.global_gain)?;
        finite("calibration_artifacts.global_offset", cal.global_offset)?;
    }

    if let Some(drift) = &config.drift_parameters {
        for rate in drift.rates_per_hour.values() {
            finite("drift_parameters", *rate)?;
        }
    }

    if let Some(comp) = &config.environmental_compensation_params {
        finite("environmental_compensation_params.reference_value", comp.reference_value)?;
        finite("environmental_compensation_params.rate_per_unit", comp.rate_per_unit)?;
    }

    if let Some(blur) = &config.optical_blur_config {
        non_negative("optical_blur_config.sigma", blur.sigma)?;
    }

    Ok(())
}

fn validate_frequency(config: &SensorConfig) -> ConfigResult<()> {
    let params = &config.specific_params;

    if let Some(tolerance) = params.frequency_tolerance_hz {
        non_negative("frequency_tolerance_hz", tolerance)?;
    }

    if let Some(gain) = params.default_frequency_gain {
        finite("default_frequency_gain", gain)?;
    }

    if let Some(range) = params.frequency_range {
        finite("frequency_range.min_hz", range.min_hz)?;
        finite("frequency_range.max_hz", range.max_hz)?;
        if range.min_hz > range.max_hz {
            return Err(ConfigError::OutOfRange {
                name: "frequency_range.min_hz",
                value: range.min_hz,
                expected: "min_hz <= max_hz",
            });
        }
    }

    Ok(())
}

fn validate_image(config: &SensorConfig, sensor: &'static str) -> ConfigResult<()> {
    let resolution = config.specific_params.resolution.ok_or(ConfigError::MissingParameter {
        name: "resolution",
        sensor,
    })?;

    if resolution.pixel_count() == 0 {
        return Err(ConfigError::OutOfRange {
            name: "resolution",
            value: 0.0,
            expected: "non-zero width and height",
        });
    }

    let hot = config
        .hot_pixels_config
        .iter()
        .flat_map(|hot| hot.coordinates.iter());

    for coord in config.dead_pixels.iter().chain(hot) {
        if !resolution.contains(*coord) {
            return Err(ConfigError::PixelOutOfBounds {
                x: coord.x,
                y: coord.y,
                width: resolution.width,
                height: resolution.height,
            });
        }
    }

    if let Some(hot) = &config.hot_pixels_config {
        finite("hot_pixels_config.value", hot.value)?;
    }

    Ok(())
}

fn finite(name: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::not_numeric(name, value))
    }
}

fn non_negative(name: &'static str, value: f64) -> ConfigResult<()> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            expected: "[0, inf)",
        });
    }
    Ok(())
}
