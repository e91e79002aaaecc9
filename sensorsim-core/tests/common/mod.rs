//! Common test utilities for integration tests
//!
//! This module provides:
//! - Sensor configuration fixtures with every stage neutral
//! - Environment fixtures for the three sensor variants
//! - Sample statistics for noise assertions

#![allow(dead_code)]

use ndarray::Array2;
use sensorsim_core::types::Resolution;
use sensorsim_core::{
    EmfSensor, SensorConfig, SensorOutput, StaticEnvironment, TemperatureProbe, ThermalCamera,
};

pub mod stats;

/// Seed used wherever a test needs reproducible noise
pub const SEED: u64 = 0x5EED;

/// Resolution used by thermal fixtures
pub const THERMAL_RES: Resolution = Resolution::new(8, 6);

/// EMF meter with the given configuration and a fixed seed
pub fn emf(config: SensorConfig) -> EmfSensor {
    EmfSensor::emf(config).expect("valid EMF config").with_seed(SEED)
}

/// Thermal camera with the given configuration and a fixed seed
pub fn thermal(config: SensorConfig) -> ThermalCamera {
    ThermalCamera::thermal_camera(config)
        .expect("valid thermal config")
        .with_seed(SEED)
}

/// Temperature probe with the given configuration and a fixed seed
pub fn probe(config: SensorConfig) -> TemperatureProbe {
    TemperatureProbe::temperature_probe(config)
        .expect("valid probe config")
        .with_seed(SEED)
}

/// Base thermal configuration at [`THERMAL_RES`]
pub fn thermal_config(id: &str) -> SensorConfig {
    SensorConfig::new(id).with_resolution(THERMAL_RES.width, THERMAL_RES.height)
}

/// Environment reporting a fixed EMF field at `t` seconds
pub fn emf_env(field_strength: f64, frequency: Option<f64>, t: f64) -> StaticEnvironment {
    StaticEnvironment::new()
        .with_emf(field_strength, frequency)
        .with_time(t)
}

/// Thermal rows with a smooth gradient plus one hot spot
pub fn gradient_rows(res: Resolution) -> Vec<Vec<f64>> {
    (0..res.height)
        .map(|y| {
            (0..res.width)
                .map(|x| {
                    let base = 20.0 + x as f64 * 0.5 + y as f64 * 0.25;
                    if x == res.width / 2 && y == res.height / 2 {
                        base + 40.0
                    } else {
                        base
                    }
                })
                .collect()
        })
        .collect()
}

/// Rows packed into the `(height, width)` grid a camera reports
pub fn grid(rows: &[Vec<f64>]) -> Array2<f64> {
    let width = rows.first().map_or(0, Vec::len);
    let cells: Vec<f64> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((rows.len(), width), cells).expect("rectangular rows")
}

/// Field strength of a successful EMF output
pub fn field_strength(output: &SensorOutput) -> f64 {
    output
        .scalar_field("field_strength")
        .expect("successful scalar reading")
}
