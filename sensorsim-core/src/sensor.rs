//! Sensor Orchestration
//!
//! ## Overview
//!
//! A [`Sensor`] owns everything that belongs to one simulated instrument:
//! its configuration, its pipeline, its temporal state, its noise source and
//! its diagnostic log. Nothing is shared between instances, so a fleet of
//! sensors can be sampled from separate threads without coordination.
//!
//! ```text
//! sample(env)
//!   │
//!   ├─ ground_truth_capability == false ──▶ ErrorReading("not supported")
//!   │
//!   ├─ adapter.acquire(env) ── Err ──▶ warning + ErrorReading
//!   │        │
//!   │        ▼ Ok
//!   └─ pipeline.run(reading, state) ──▶ degraded reading, state replaced
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sensorsim_core::{EmfSensor, SensorConfig, StaticEnvironment};
//! use sensorsim_core::config::CalibrationConfig;
//!
//! let config = SensorConfig::new("emf-1")
//!     .with_calibration(CalibrationConfig { global_gain: 1.1, global_offset: -1.5 });
//! let mut sensor = EmfSensor::emf(config)?;
//!
//! let env = StaticEnvironment::new().with_emf(50.0, Some(60.0));
//! let v = sensor.sample(&env).scalar_field("field_strength").unwrap();
//! assert!((v - 53.5).abs() < 1e-9);
//! # Ok::<(), sensorsim_core::ConfigError>(())
//! ```

use crate::config::SensorConfig;
use crate::diagnostics::{Diagnostic, DiagnosticLog, DiagnosticSink};
use crate::environment::Environment;
use crate::errors::{AcquisitionError, ConfigResult};
use crate::pipeline::ImperfectionPipeline;
use crate::random::{DefaultNoise, NoiseSource};
use crate::reading::{ErrorReading, SensorOutput};
use crate::sensors::{EmfAdapter, GroundTruthAdapter, ProbeAdapter, ThermalAdapter};
use crate::stages::{StageContext, StageKind};
use crate::state::SensorState;
use crate::validation;

/// Scalar EMF meter with frequency response
pub type EmfSensor = Sensor<EmfAdapter>;

/// Image-valued thermal camera
pub type ThermalCamera = Sensor<ThermalAdapter>;

/// Scalar point temperature probe
pub type TemperatureProbe = Sensor<ProbeAdapter>;

/// One simulated instrument
pub struct Sensor<A> {
    config: SensorConfig,
    adapter: A,
    pipeline: ImperfectionPipeline,
    state: SensorState,
    noise: Box<dyn NoiseSource + Send>,
    diagnostics: DiagnosticLog,
}

impl<A: core::fmt::Debug> core::fmt::Debug for Sensor<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Sensor")
            .field("sensor_id", &self.config.sensor_id)
            .field("adapter", &self.adapter)
            .field("pipeline", &self.pipeline)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<A: GroundTruthAdapter> Sensor<A> {
    /// Validate the configuration and build the sensor
    ///
    /// The noise source is seeded from OS entropy; use [`Sensor::with_seed`]
    /// or [`Sensor::with_noise_source`] for reproducible runs.
    pub fn new(config: SensorConfig, adapter: A) -> ConfigResult<Self> {
        let caps = adapter.capabilities();
        validation::validate(&config, caps, adapter.name())?;

        let lower_bound = config.specific_params.lower_bound.or(adapter.lower_bound());
        let pipeline = ImperfectionPipeline::from_config(&config, caps, lower_bound);

        Ok(Self {
            config,
            adapter,
            pipeline,
            state: SensorState::new(),
            noise: Box::new(DefaultNoise::from_entropy()),
            diagnostics: DiagnosticLog::new(),
        })
    }

    /// Replace the noise source
    pub fn with_noise_source(mut self, noise: impl NoiseSource + Send + 'static) -> Self {
        self.noise = Box::new(noise);
        self
    }

    /// Use a reproducible default noise source
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_noise_source(DefaultNoise::seeded(seed))
    }

    /// Produce one degraded observation
    pub fn sample(&mut self, environment: &dyn Environment) -> SensorOutput {
        if !self.config.ground_truth_capability {
            let err = AcquisitionError::NotSupported {
                sensor_id: self.config.sensor_id.clone(),
            };
            return SensorOutput::Error(ErrorReading::new(err.to_string()));
        }

        let truth = match self.adapter.acquire(&self.config, environment) {
            Ok(reading) => reading,
            Err(err) => {
                let message = err.to_string();
                self.diagnostics.emit(Diagnostic::warning(
                    self.config.sensor_id.as_str(),
                    StageKind::Acquisition,
                    message.as_str(),
                ));
                return SensorOutput::Error(ErrorReading::new(message));
            }
        };

        let mut ctx = StageContext {
            sensor_id: &self.config.sensor_id,
            environment,
            noise: self.noise.as_mut(),
            diagnostics: &mut self.diagnostics,
        };
        let (reading, mut next) = self.pipeline.run(truth, &self.state, &mut ctx);

        next.samples_taken = self.state.samples_taken + 1;
        self.state = next;
        SensorOutput::Reading(reading)
    }

    /// Clear the lag memory so the next sample bootstraps again
    pub fn reset(&mut self) {
        self.state.first_sample_taken = false;
        self.state.last_filtered_value = None;
    }

    /// Current temporal state
    pub fn state(&self) -> &SensorState {
        &self.state
    }

    /// Configuration the sensor was built from
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Sensor identifier
    pub fn id(&self) -> &str {
        &self.config.sensor_id
    }

    /// Variant adapter
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Stages this sensor runs, in order
    pub fn stages(&self) -> Vec<StageKind> {
        self.pipeline.stage_kinds()
    }

    /// Recorded diagnostics
    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    /// Remove and return recorded diagnostics
    pub fn drain_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.drain()
    }
}

impl EmfSensor {
    /// EMF meter from a configuration
    pub fn emf(config: SensorConfig) -> ConfigResult<Self> {
        Self::new(config, EmfAdapter)
    }
}

impl ThermalCamera {
    /// Thermal camera from a configuration
    pub fn thermal_camera(config: SensorConfig) -> ConfigResult<Self> {
        Self::new(config, ThermalAdapter)
    }
}

impl TemperatureProbe {
    /// Temperature probe from a configuration
    pub fn temperature_probe(config: SensorConfig) -> ConfigResult<Self> {
        Self::new(config, ProbeAdapter)
    }
}
