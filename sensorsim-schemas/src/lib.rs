//! JSON Configuration Documents for SensorSim Sensors
//!
//! ## Overview
//!
//! Sensor configurations usually live in files next to a simulation scenario
//! rather than in code. This crate turns those JSON documents into validated
//! [`SensorConfig`] values and ships a registry of named presets.
//!
//! ```text
//! JSON text ─▶ serde_json::Value
//!                 │
//!                 ├─ check_numeric_fields   non-numeric → SchemaError::InvalidParameter
//!                 ├─ hoist nested blur      specific_params.optical_blur → optical_blur_config
//!                 ├─ strip nulls            null keys read as absent
//!                 └─ serde deserialize      shape errors → SchemaError::ParseError
//!                      │
//!                      ▼
//!                 SensorConfig ─▶ Sensor::new (range checks → SchemaError::Config)
//! ```
//!
//! ## Document Format
//!
//! Keys match the fields of [`SensorConfig`]. Every section is optional and
//! an absent section disables its stage:
//!
//! ```json
//! {
//!   "sensor_id": "emf-kitchen",
//!   "position_3d": [1.0, 2.0, 0.5],
//!   "specific_params": {
//!     "frequency_range": {"min_hz": 50.0, "max_hz": 60.0},
//!     "frequency_tolerance_hz": 2.0,
//!     "default_frequency_gain": 0.1
//!   },
//!   "noise_characteristics": {"type": "gaussian", "mean": 0.0, "stddev": 0.05},
//!   "drift_parameters": {"field_strength": 0.01}
//! }
//! ```
//!
//! Blur may be given either as a top-level `optical_blur_config` or nested as
//! `specific_params.optical_blur`; the top-level form wins when both exist.
//!
//! ## Usage Example
//!
//! ```rust
//! use sensorsim_schemas::{parse_config, SensorRegistry};
//!
//! let config = parse_config(r#"{"sensor_id": "probe-1", "calibration_artifacts": {"global_gain": 1.1}}"#)?;
//! assert_eq!(config.sensor_id, "probe-1");
//!
//! let registry = SensorRegistry::with_defaults()?;
//! let camera = registry.build_thermal_camera("thermal_camera_v1", "cam-3")?;
//! assert_eq!(camera.id(), "cam-3");
//! # Ok::<(), sensorsim_schemas::SchemaError>(())
//! ```

use serde_json::Value;

use sensorsim_core::{ConfigError, SensorConfig};

pub mod registry;
pub mod schemas;
pub mod validation;

pub use registry::{SensorRegistry, SensorVariant};
pub use validation::check_numeric_fields;

/// Result type for document operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema-related errors
#[derive(Debug, Clone, PartialEq, thiserror_no_std::Error)]
pub enum SchemaError {
    /// Document is not valid JSON or has the wrong shape
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A numeric parameter holds a value of another JSON type
    #[error("Parameter `{path}` must be numeric, got {found}")]
    InvalidParameter {
        /// Dotted path of the offending key
        path: String,
        /// JSON type that was found
        found: &'static str,
    },

    /// Preset not registered
    #[error("Preset not found: {0}")]
    NotFound(String),

    /// Registry operation rejected
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Typed configuration rejected by the sensor constructor
    #[error("Invalid configuration: {0}")]
    Config(ConfigError),
}

impl From<ConfigError> for SchemaError {
    fn from(err: ConfigError) -> Self {
        SchemaError::Config(err)
    }
}

/// Parse a configuration document from JSON text
pub fn parse_config(json: &str) -> SchemaResult<SensorConfig> {
    let document: Value = serde_json::from_str(json).map_err(|e| SchemaError::ParseError(e.to_string()))?;
    config_from_value(document)
}

/// Build a configuration from an already parsed document
pub fn config_from_value(mut document: Value) -> SchemaResult<SensorConfig> {
    if !document.is_object() {
        return Err(SchemaError::ParseError("configuration must be a JSON object".to_string()));
    }

    check_numeric_fields(&document)?;
    hoist_nested_blur(&mut document);
    strip_nulls(&mut document);

    serde_json::from_value(document).map_err(|e| SchemaError::ParseError(e.to_string()))
}

/// Serialize a configuration back into a document
pub fn config_to_value(config: &SensorConfig) -> SchemaResult<Value> {
    serde_json::to_value(config).map_err(|e| SchemaError::ParseError(e.to_string()))
}

/// Move `specific_params.optical_blur` to `optical_blur_config`
fn hoist_nested_blur(document: &mut Value) {
    let nested = document
        .get_mut("specific_params")
        .and_then(Value::as_object_mut)
        .and_then(|params| params.remove("optical_blur"));

    let Some(nested) = nested else {
        return;
    };

    if let Some(root) = document.as_object_mut() {
        let slot = root.entry("optical_blur_config").or_insert(Value::Null);
        if slot.is_null() {
            *slot = nested;
        }
    }
}

/// Remove null-valued object keys at every depth so they read as absent
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sensorsim_core::config::{BlurConfig, CalibrationConfig, NoiseConfig, NoiseKind};
    use serde_json::json;

    #[test]
    fn parses_full_document() {
        let config = parse_config(
            r#"{
                "sensor_id": "emf-1",
                "position_3d": [1.0, 2.0, 3.0],
                "specific_params": {"frequency_tolerance_hz": 2, "default_frequency_gain": 0.5},
                "noise_characteristics": {"type": "uniform", "stddev": 0.1},
                "calibration_artifacts": {"global_offset": -1.5, "global_gain": 1.1},
                "ground_truth_capability": false
            }"#,
        )
        .unwrap();

        assert_eq!(config.position_3d, [1.0, 2.0, 3.0]);
        assert_eq!(config.specific_params.frequency_tolerance_hz, Some(2.0));
        assert_eq!(config.noise_characteristics.unwrap().kind, NoiseKind::Uniform);
        assert_eq!(config.calibration_artifacts.unwrap().global_gain, 1.1);
        assert!(!config.ground_truth_capability);
    }

    #[test]
    fn non_numeric_tolerance_is_a_config_error() {
        let err = parse_config(r#"{"sensor_id": "e", "specific_params": {"frequency_tolerance_hz": "wide"}}"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidParameter { found: "string", .. }));
    }

    #[test]
    fn nested_blur_is_hoisted() {
        let config = config_from_value(json!({
            "sensor_id": "cam",
            "specific_params": {"optical_blur": {"type": "gaussian", "sigma": 1.5}}
        }))
        .unwrap();
        assert_eq!(config.optical_blur_config, Some(BlurConfig::gaussian(1.5)));
    }

    #[test]
    fn top_level_blur_wins() {
        let config = config_from_value(json!({
            "sensor_id": "cam",
            "optical_blur_config": {"sigma": 2.0},
            "specific_params": {"optical_blur": {"sigma": 9.0}}
        }))
        .unwrap();
        assert_eq!(config.optical_blur_config.unwrap().sigma, 2.0);
    }

    #[test]
    fn null_reads_as_absent() {
        let config = config_from_value(json!({
            "sensor_id": "p",
            "specific_params": {"response_time_alpha": null, "frequency_tolerance_hz": null},
            "calibration_artifacts": {"global_gain": null, "global_offset": 0.5},
            "drift_parameters": null
        }))
        .unwrap();
        assert_eq!(config.specific_params.response_time_alpha, 1.0);
        assert_eq!(config.specific_params.frequency_tolerance_hz, None);
        assert_eq!(config.calibration_artifacts.unwrap().global_gain, 1.0);
        assert!(config.drift_parameters.is_none());
    }

    #[test]
    fn null_required_key_is_a_parse_error() {
        let err = config_from_value(json!({
            "sensor_id": "p",
            "noise_characteristics": {"type": "gaussian", "stddev": null}
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::ParseError(_)));
    }

    #[test]
    fn rejects_non_object_and_bad_json() {
        assert!(matches!(parse_config("[1, 2]"), Err(SchemaError::ParseError(_))));
        assert!(matches!(parse_config("{"), Err(SchemaError::ParseError(_))));
    }

    #[test]
    fn round_trips_through_value() {
        let config = parse_config(r#"{"sensor_id": "p", "drift_parameters": {"temperature_c": 0.5}}"#).unwrap();
        let value = config_to_value(&config).unwrap();
        assert_eq!(config_from_value(value).unwrap(), config);
    }

    fn finite() -> impl Strategy<Value = f64> {
        -1e6f64..1e6
    }

    proptest! {
        #[test]
        fn numeric_sections_round_trip(
            gain in finite(),
            offset in finite(),
            mean in finite(),
            stddev in 0.0f64..1e3,
            uniform in any::<bool>(),
            alpha in 0.01f64..=1.0,
            tolerance in proptest::option::of(0.0f64..100.0),
            drift in proptest::collection::btree_map("[a-z_]{1,12}", finite(), 0..4),
        ) {
            let noise = if uniform { NoiseConfig::uniform(mean, stddev) } else { NoiseConfig::gaussian(mean, stddev) };
            let mut config = SensorConfig::new("s")
                .with_calibration(CalibrationConfig { global_gain: gain, global_offset: offset })
                .with_noise(noise)
                .with_response_alpha(alpha);
            config.specific_params.frequency_tolerance_hz = tolerance;
            for (field, rate) in drift {
                config = config.with_drift(field, rate);
            }

            let value = config_to_value(&config).unwrap();
            prop_assert_eq!(config_from_value(value).unwrap(), config);
        }

        #[test]
        fn text_at_numeric_key_names_the_key(text in "[a-z]{0,8}", rate_field in "[a-z]{1,8}") {
            let err = config_from_value(json!({"calibration_artifacts": {"global_gain": text}})).unwrap_err();
            prop_assert_eq!(
                err,
                SchemaError::InvalidParameter { path: "calibration_artifacts.global_gain".to_string(), found: "string" }
            );

            let err = config_from_value(json!({"drift_parameters": {rate_field.clone(): "fast"}})).unwrap_err();
            let expected_path = format!("drift_parameters.{rate_field}");
            prop_assert!(err.to_string().contains(&expected_path));
        }
    }
}
