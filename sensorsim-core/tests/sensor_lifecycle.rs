//! Integration tests for sensor construction, failure handling and state
//!
//! Covers fail-fast validation, ground-truth short-circuiting, the
//! diagnostics channel and per-instance isolation.

mod common;

use std::thread;

use sensorsim_core::config::{BlurConfig, CompensationConfig, NoiseConfig};
use sensorsim_core::stages::StageKind;
use sensorsim_core::types::FrequencyRange;
use sensorsim_core::{
    ConfigError, EmfSensor, SensorConfig, SensorOutput, Severity, StaticEnvironment, ThermalCamera,
};

use common::{emf, emf_env, field_strength, probe, thermal, thermal_config, THERMAL_RES};

fn frequency_config(tolerance: Option<f64>, gain: Option<f64>) -> SensorConfig {
    let mut config = SensorConfig::new("emf");
    config.specific_params.frequency_range = Some(FrequencyRange::new(50.0, 60.0));
    config.specific_params.frequency_tolerance_hz = tolerance;
    config.specific_params.default_frequency_gain = gain;
    config
}

#[test]
fn test_fail_fast_frequency_validation() {
    let rejected = [
        (Some(-0.5), None),
        (Some(f64::NAN), None),
        (Some(f64::INFINITY), None),
        (None, Some(f64::NAN)),
    ];
    for (tolerance, gain) in rejected {
        let result = EmfSensor::emf(frequency_config(tolerance, gain));
        assert!(
            matches!(
                result,
                Err(ConfigError::OutOfRange { .. }) | Err(ConfigError::NotNumeric { .. })
            ),
            "tolerance {tolerance:?} gain {gain:?}"
        );
    }

    for (tolerance, gain) in [(Some(0.0), Some(0.0)), (Some(2.5), Some(1.5)), (None, None)] {
        assert!(EmfSensor::emf(frequency_config(tolerance, gain)).is_ok());
    }
}

#[test]
fn test_disabled_capability_short_circuits() {
    let config = SensorConfig::new("emf")
        .with_drift("field_strength", 1.0)
        .with_noise(NoiseConfig::gaussian(0.0, 1.0))
        .without_ground_truth();
    let mut sensor = emf(config);

    let out = sensor.sample(&emf_env(1.0, None, 0.0));
    match out {
        SensorOutput::Error(err) => assert!(err.error.contains("not supported")),
        SensorOutput::Reading(r) => panic!("expected error, got {r:?}"),
    }
    assert!(!sensor.state().first_sample_taken);
}

#[test]
fn test_missing_accessor_short_circuits() {
    // Drift would warn about the missing clock if it ran
    let mut sensor = emf(SensorConfig::new("emf").with_drift("field_strength", 1.0));

    let out = sensor.sample(&StaticEnvironment::new());

    assert!(out.error().unwrap().contains("lacks required method"));
    let diags = sensor.drain_diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].stage, StageKind::Acquisition);
    assert_eq!(diags[0].severity, Severity::Warning);
    assert_eq!(diags[0].sensor_id, "emf");
}

#[test]
fn test_query_failure_is_wrapped() {
    let mut camera = thermal(thermal_config("cam"));
    let out = camera.sample(&StaticEnvironment::new().failing_thermal("renderer crashed"));
    assert_eq!(out.error(), Some("Failed to get thermal image: renderer crashed"));
    assert_eq!(camera.diagnostics().count(Severity::Warning), 1);
}

#[test]
fn test_malformed_grid_is_rejected() {
    let mut camera = thermal(thermal_config("cam"));
    let rows = vec![vec![20.0; THERMAL_RES.width + 1]; THERMAL_RES.height];
    let out = camera.sample(&StaticEnvironment::new().with_thermal_rows(rows));
    assert!(out.error().unwrap().contains("Malformed data"));
}

#[test]
fn test_huge_blur_sigma_builds_and_samples() {
    let config = thermal_config("cam").with_blur(BlurConfig::gaussian(1e18));
    let mut camera = ThermalCamera::thermal_camera(config).expect("finite sigma is valid");

    let out = camera.sample(&StaticEnvironment::new().with_uniform_thermal(THERMAL_RES, 20.0));
    let image = out.image().unwrap();
    let total = 20.0 * THERMAL_RES.pixel_count() as f64;
    assert!((image.sum() - total).abs() < 1e-9 * total);
}

#[cfg(feature = "serde")]
#[test]
fn test_error_output_serializes_to_error_key_only() {
    let mut sensor = emf(SensorConfig::new("emf").without_ground_truth());
    let json = serde_json::to_value(sensor.sample(&emf_env(1.0, None, 0.0))).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert!(object["error"].as_str().unwrap().contains("not supported"));
}

#[test]
fn test_failed_sample_keeps_lag_memory() {
    let mut sensor = emf(SensorConfig::new("emf").with_response_alpha(0.5));
    sensor.sample(&emf_env(10.0, None, 0.0));
    sensor.sample(&StaticEnvironment::new().failing_emf("glitch"));
    let out = sensor.sample(&emf_env(20.0, None, 0.0));
    assert_eq!(field_strength(&out), 15.0);
    assert_eq!(sensor.state().samples_taken, 2);
}

#[test]
fn test_sensors_do_not_share_state() {
    let mut a = emf(SensorConfig::new("a").with_response_alpha(0.5));
    let mut b = emf(SensorConfig::new("b").with_response_alpha(0.5));

    a.sample(&emf_env(100.0, None, 0.0));
    let out = b.sample(&emf_env(0.0, None, 0.0));

    assert_eq!(field_strength(&out), 0.0);
    assert!(b.diagnostics().is_empty());
}

#[test]
fn test_fleet_samples_in_parallel() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let mut sensor = probe(
                SensorConfig::new(format!("probe-{i}"))
                    .with_compensation(CompensationConfig::temperature(20.0, 0.5)),
            );
            thread::spawn(move || {
                let env = StaticEnvironment::new().with_point_temperature(i as f64);
                let errors = (0..10)
                    .map(|_| sensor.sample(&env))
                    .filter(SensorOutput::is_error)
                    .count();
                assert_eq!(errors, 0);
                sensor.diagnostics().count_stage(StageKind::Compensation)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 10);
    }
}

#[test]
fn test_diagnostic_log_is_bounded() {
    use sensorsim_core::constants::buffers::DIAGNOSTIC_CAPACITY;

    let mut sensor = emf(SensorConfig::new("emf").with_drift("field_strength", 1.0));
    let env = StaticEnvironment::new().with_emf(1.0, None);
    for _ in 0..DIAGNOSTIC_CAPACITY + 10 {
        sensor.sample(&env);
    }
    assert_eq!(sensor.diagnostics().len(), DIAGNOSTIC_CAPACITY);
    assert_eq!(sensor.diagnostics().dropped(), 10);
}
