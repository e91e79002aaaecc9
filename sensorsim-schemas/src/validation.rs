//! Document-Level Validation
//!
//! JSON can express values a typed configuration cannot: a tolerance given as
//! `"abc"` or a gain given as `true`. Left to serde these surface as generic
//! parse errors. This pass runs first and reports them as
//! [`SchemaError::InvalidParameter`] naming the exact key, so a non-numeric
//! parameter is always a configuration error and never silently defaulted.
//!
//! `null` passes this check. The loader then drops null-valued keys, so a
//! `null` behaves exactly like a missing key: the default applies, and a
//! required key (such as `noise_characteristics.stddev`) fails to parse.
//!
//! Range rules (tolerance ≥ 0, alpha in (0, 1]) are not checked here; the
//! sensor constructor applies them to the typed configuration.

use serde_json::Value;

use crate::{SchemaError, SchemaResult};

/// Numeric leaves, as paths from the document root
const NUMERIC_PATHS: &[&[&str]] = &[
    &["specific_params", "response_time_alpha"],
    &["specific_params", "frequency_tolerance_hz"],
    &["specific_params", "default_frequency_gain"],
    &["specific_params", "lower_bound"],
    &["specific_params", "frequency_range", "min_hz"],
    &["specific_params", "frequency_range", "max_hz"],
    &["specific_params", "optical_blur", "sigma"],
    &["noise_characteristics", "mean"],
    &["noise_characteristics", "stddev"],
    &["calibration_artifacts", "global_offset"],
    &["calibration_artifacts", "global_gain"],
    &["environmental_compensation_params", "reference_value"],
    &["environmental_compensation_params", "rate_per_unit"],
    &["optical_blur_config", "sigma"],
    &["hot_pixels_config", "value"],
    &["sampling_volume", "radius_m"],
];

/// Reject non-numeric values at every numeric key of a configuration document
pub fn check_numeric_fields(document: &Value) -> SchemaResult<()> {
    for path in NUMERIC_PATHS {
        if let Some(value) = lookup(document, path) {
            require_number(&path.join("."), value)?;
        }
    }

    if let Some(Value::Object(rates)) = document.get("drift_parameters") {
        for (field, rate) in rates {
            require_number(&format!("drift_parameters.{field}"), rate)?;
        }
    }

    Ok(())
}

fn lookup<'a>(document: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(document, |node, key| node.get(key))
}

fn require_number(path: &str, value: &Value) -> SchemaResult<()> {
    match value {
        Value::Number(_) | Value::Null => Ok(()),
        other => Err(SchemaError::InvalidParameter {
            path: path.to_string(),
            found: type_name(other),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_tolerance_is_rejected_with_path() {
        let doc = json!({"specific_params": {"frequency_tolerance_hz": "abc"}});
        assert_eq!(
            check_numeric_fields(&doc),
            Err(SchemaError::InvalidParameter {
                path: "specific_params.frequency_tolerance_hz".to_string(),
                found: "string",
            })
        );
    }

    #[test]
    fn boolean_gain_is_rejected() {
        let doc = json!({"specific_params": {"default_frequency_gain": true}});
        assert!(check_numeric_fields(&doc).is_err());
    }

    #[test]
    fn drift_rates_are_checked_per_field() {
        let doc = json!({"drift_parameters": {"a": 0.1, "b": [1.0]}});
        let err = check_numeric_fields(&doc).unwrap_err();
        assert!(err.to_string().contains("drift_parameters.b"));
    }

    #[test]
    fn numbers_nulls_and_absent_keys_pass() {
        let doc = json!({
            "specific_params": {"frequency_tolerance_hz": 0, "default_frequency_gain": null},
            "noise_characteristics": {"stddev": 0.5}
        });
        assert!(check_numeric_fields(&doc).is_ok());
        assert!(check_numeric_fields(&json!({})).is_ok());
    }
}
