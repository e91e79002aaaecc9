//! Imperfection Pipeline
//!
//! ## Overview
//!
//! The pipeline owns the stages built for one sensor and runs them in a fixed
//! order around the stateful lag filter:
//!
//! ```text
//! reading ─▶ [compensation] ─▶ [calibration] ─▶ [blur] ─▶ [pixels] ─▶ [frequency]
//!                                                                        │
//!        ┌───────────────────────────────────────────────────────────────┘
//!        ▼
//!   ResponseLag(state) ─▶ [noise] ─▶ [drift] ─▶ degraded reading, new state
//! ```
//!
//! Bracketed stages only exist when configured. Order is fixed by
//! [`StageKind`]: the builder sorts stages by kind, so insertion order never
//! changes the result. Compensation always runs before calibration.
//!
//! ## Applicability
//!
//! Each stage is asked [`ImperfectionStage::applies_to`] before it runs, so an
//! image-only stage silently ignores scalar readings. The sensor variant
//! additionally decides which stages are built at all (see
//! [`ImperfectionPipeline::from_config`]).
//!
//! ## Example
//!
//! ```rust
//! use sensorsim_core::pipeline::ImperfectionPipeline;
//! use sensorsim_core::stages::{Calibration, StageKind};
//! use sensorsim_core::config::CalibrationConfig;
//!
//! let calibration = Calibration::from_config(Some(&CalibrationConfig {
//!     global_gain: 2.0,
//!     global_offset: 0.0,
//! }));
//!
//! let pipeline = ImperfectionPipeline::builder()
//!     .add_stage_opt(calibration)
//!     .response_alpha(0.5)
//!     .build();
//!
//! assert_eq!(pipeline.stage_kinds(), vec![StageKind::Calibration, StageKind::ResponseLag]);
//! ```

use crate::config::SensorConfig;
use crate::reading::GroundTruthReading;
use crate::stages::{
    Calibration, DriftAccumulator, EnvironmentalCompensation, FrequencyGain, ImperfectionStage,
    NoiseInjector, OpticalBlur, PixelDefects, ResponseLag, StageContext, StageKind,
};
use crate::state::SensorState;
use crate::validation::Capabilities;

type BoxedStage = Box<dyn ImperfectionStage>;

/// Ordered stages of one sensor
pub struct ImperfectionPipeline {
    /// Stages that run before the lag filter
    before_lag: Vec<BoxedStage>,
    /// First-order response filter
    lag: ResponseLag,
    /// Stages that run after the lag filter
    after_lag: Vec<BoxedStage>,
}

impl core::fmt::Debug for ImperfectionPipeline {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ImperfectionPipeline")
            .field("stages", &self.stage_kinds())
            .field("alpha", &self.lag.alpha())
            .finish()
    }
}

impl ImperfectionPipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Build every stage a sensor configuration enables
    ///
    /// Image-only stages are built only for image sensors and frequency gain
    /// only for frequency-bearing ones. `lower_bound` is the noise floor.
    pub fn from_config(config: &SensorConfig, caps: Capabilities, lower_bound: Option<f64>) -> Self {
        let mut builder = Self::builder()
            .add_stage_opt(EnvironmentalCompensation::from_config(
                config.environmental_compensation_params.as_ref(),
            ))
            .add_stage_opt(Calibration::from_config(config.calibration_artifacts.as_ref()))
            .add_stage_opt(NoiseInjector::from_config(
                config.noise_characteristics.as_ref(),
                lower_bound,
            ))
            .add_stage_opt(DriftAccumulator::from_config(config.drift_parameters.as_ref()))
            .response_alpha(config.specific_params.response_time_alpha);

        if caps.image {
            builder = builder
                .add_stage_opt(
                    config
                        .specific_params
                        .resolution
                        .and_then(|res| OpticalBlur::from_config(config.optical_blur_config.as_ref(), res)),
                )
                .add_stage_opt(PixelDefects::from_config(
                    &config.dead_pixels,
                    config.hot_pixels_config.as_ref(),
                ));
        }

        if caps.frequency {
            builder = builder.add_stage_opt(FrequencyGain::from_params(&config.specific_params));
        }

        builder.build()
    }

    /// Kinds of the stages that will run, in execution order
    pub fn stage_kinds(&self) -> Vec<StageKind> {
        self.before_lag
            .iter()
            .map(|s| s.kind())
            .chain(core::iter::once(self.lag.kind()))
            .chain(self.after_lag.iter().map(|s| s.kind()))
            .collect()
    }

    /// Lag filter coefficient
    pub fn response_alpha(&self) -> f64 {
        self.lag.alpha()
    }

    /// Degrade one reading
    ///
    /// Returns the degraded reading and the state the sensor must keep.
    pub fn run(
        &self,
        reading: GroundTruthReading,
        state: &SensorState,
        ctx: &mut StageContext<'_>,
    ) -> (GroundTruthReading, SensorState) {
        let reading = run_stages(&self.before_lag, reading, ctx);
        let (reading, next) = self.lag.apply(reading, state);
        let reading = run_stages(&self.after_lag, reading, ctx);
        (reading, next)
    }
}

fn run_stages(
    stages: &[BoxedStage],
    mut reading: GroundTruthReading,
    ctx: &mut StageContext<'_>,
) -> GroundTruthReading {
    for stage in stages {
        if stage.applies_to(&reading) {
            reading = stage.apply(reading, ctx);
        }
    }
    reading
}

/// Builder for [`ImperfectionPipeline`]
pub struct PipelineBuilder {
    stages: Vec<BoxedStage>,
    alpha: f64,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineBuilder {
    /// Create a builder with no stages and a pass-through lag filter
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            alpha: 1.0,
        }
    }

    /// Add a processing stage
    pub fn add_stage<S: ImperfectionStage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Add a stage if it was built
    pub fn add_stage_opt<S: ImperfectionStage + 'static>(self, stage: Option<S>) -> Self {
        match stage {
            Some(stage) => self.add_stage(stage),
            None => self,
        }
    }

    /// Set the lag filter coefficient
    pub fn response_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Build the pipeline
    pub fn build(mut self) -> ImperfectionPipeline {
        self.stages.sort_by_key(|s| s.kind());
        let split = self
            .stages
            .iter()
            .position(|s| s.kind() > StageKind::ResponseLag)
            .unwrap_or(self.stages.len());
        let after_lag = self.stages.split_off(split);

        ImperfectionPipeline {
            before_lag: self.stages,
            lag: ResponseLag::new(self.alpha),
            after_lag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BlurConfig, CalibrationConfig, CompensationConfig, NoiseConfig};
    use crate::diagnostics::Diagnostic;
    use crate::environment::StaticEnvironment;
    use crate::reading::ScalarReading;
    use crate::stages::test_support::ZeroNoise;
    use crate::types::{AmbientQuantity, FrequencyRange};

    const SCALAR: Capabilities = Capabilities { image: false, frequency: false };

    fn run_once(pipeline: &ImperfectionPipeline, reading: GroundTruthReading, env: &StaticEnvironment) -> GroundTruthReading {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let mut noise = ZeroNoise;
        let mut ctx = StageContext {
            sensor_id: "p",
            environment: env,
            noise: &mut noise,
            diagnostics: &mut sink,
        };
        pipeline.run(reading, &SensorState::new(), &mut ctx).0
    }

    #[test]
    fn empty_config_builds_only_the_lag_filter() {
        let pipeline = ImperfectionPipeline::from_config(&SensorConfig::new("s"), SCALAR, None);
        assert_eq!(pipeline.stage_kinds(), vec![StageKind::ResponseLag]);
    }

    #[test]
    fn stage_order_is_fixed_regardless_of_insertion() {
        let config = SensorConfig::new("s")
            .with_noise(NoiseConfig::gaussian(0.0, 1.0))
            .with_drift("x", 1.0)
            .with_calibration(CalibrationConfig { global_gain: 2.0, global_offset: 0.0 })
            .with_compensation(CompensationConfig::temperature(0.0, 1.0));
        let pipeline = ImperfectionPipeline::from_config(&config, SCALAR, None);
        assert_eq!(
            pipeline.stage_kinds(),
            vec![
                StageKind::Compensation,
                StageKind::Calibration,
                StageKind::ResponseLag,
                StageKind::Noise,
                StageKind::Drift,
            ]
        );
    }

    #[test]
    fn image_and_frequency_stages_follow_capabilities() {
        let mut config = SensorConfig::new("s")
            .with_blur(BlurConfig::gaussian(1.0))
            .with_dead_pixel(0, 0);
        config.specific_params.frequency_range = Some(FrequencyRange::new(1.0, 2.0));

        let scalar = ImperfectionPipeline::from_config(&config, SCALAR, None);
        assert_eq!(scalar.stage_kinds(), vec![StageKind::ResponseLag]);

        let all = Capabilities { image: true, frequency: true };
        let full = ImperfectionPipeline::from_config(&config, all, None);
        assert_eq!(
            full.stage_kinds(),
            vec![
                StageKind::OpticalBlur,
                StageKind::PixelDefects,
                StageKind::FrequencyGain,
                StageKind::ResponseLag,
            ]
        );
    }

    #[test]
    fn compensation_is_applied_before_calibration() {
        let config = SensorConfig::new("s")
            .with_calibration(CalibrationConfig { global_gain: 2.0, global_offset: 0.0 })
            .with_compensation(CompensationConfig::temperature(20.0, 1.0));
        let pipeline = ImperfectionPipeline::from_config(&config, SCALAR, None);
        let env = StaticEnvironment::new().with_ambient(AmbientQuantity::Temperature, 21.0);

        let out = run_once(&pipeline, ScalarReading::new().with_field("x", 10.0).into(), &env);
        // (10 + 1) × 2, not 10 × 2 + 1
        assert_eq!(out.as_scalar().unwrap().get("x"), Some(22.0));
    }
}
