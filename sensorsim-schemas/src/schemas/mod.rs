//! Built-in sensor preset documents
//!
//! Each preset is a complete JSON configuration without a `sensor_id`; the
//! registry fills the id in when a sensor is built from it. Presets use the
//! same keys a hand-written document would, including the nested
//! `specific_params.optical_blur` form.

use serde_json::{json, Value};

/// Handheld EMF meter tuned for mains frequencies
pub fn emf_meter_v1() -> Value {
    json!({
        "position_3d": [0.0, 0.0, 1.0],
        "specific_params": {
            "response_time_alpha": 0.6,
            "frequency_range": {"min_hz": 50.0, "max_hz": 60.0},
            "frequency_tolerance_hz": 5.0,
            "default_frequency_gain": 0.2
        },
        "noise_characteristics": {"type": "gaussian", "mean": 0.0, "stddev": 0.02},
        "calibration_artifacts": {"global_offset": 0.01, "global_gain": 1.03},
        "drift_parameters": {"field_strength": 0.001},
        "environmental_compensation_params": {
            "ambient": "temperature",
            "reference_value": 20.0,
            "rate_per_unit": 0.002
        }
    })
}

/// Low-resolution thermal camera with a few factory defects
pub fn thermal_camera_v1() -> Value {
    json!({
        "position_3d": [0.0, 0.0, 2.5],
        "sampling_volume": {"radius_m": 5.0},
        "specific_params": {
            "resolution": {"width": 32, "height": 24},
            "response_time_alpha": 0.8,
            "optical_blur": {"type": "gaussian", "sigma": 0.8}
        },
        "noise_characteristics": {"type": "gaussian", "mean": 0.0, "stddev": 0.1},
        "calibration_artifacts": {"global_offset": -0.3, "global_gain": 1.0},
        "drift_parameters": {"temperature_c": 0.02},
        "dead_pixels": [{"x": 3, "y": 7}, {"x": 30, "y": 1}],
        "hot_pixels_config": {"coordinates": [{"x": 12, "y": 20}], "value": 85.0}
    })
}

/// Thermistor probe with slow response and uniform quantization noise
pub fn temperature_probe_v1() -> Value {
    json!({
        "specific_params": {"response_time_alpha": 0.25},
        "noise_characteristics": {"type": "uniform", "mean": 0.0, "stddev": 0.05},
        "calibration_artifacts": {"global_offset": 0.2, "global_gain": 1.0},
        "drift_parameters": {"temperature_c": -0.005}
    })
}
