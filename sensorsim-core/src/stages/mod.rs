//! Imperfection Stages
//!
//! ## Overview
//!
//! Each stage is one independent transformation that pushes an exact reading
//! toward what a real instrument would report. Stages are built once from the
//! sensor configuration; a stage whose configuration is absent or neutral is
//! simply not built, so the pipeline only ever runs stages with work to do.
//!
//! ```text
//! ground truth
//!   │
//!   ├─ EnvironmentalCompensation   scalar + image
//!   ├─ Calibration                 scalar + image
//!   ├─ OpticalBlur                 image
//!   ├─ PixelDefects                image
//!   ├─ FrequencyGain               scalar with dominant frequency
//!   ├─ ResponseLag                 scalar + image, stateful
//!   ├─ NoiseInjector               scalar + image
//!   └─ DriftAccumulator            scalar + image
//!   ▼
//! degraded reading
//! ```
//!
//! Applicability is decided by [`ImperfectionStage::applies_to`], which looks
//! at the reading's shape and never at the sensor that produced it.
//!
//! ## Stateless vs Stateful
//!
//! All stages except the lag filter are pure functions of the current sample,
//! the environment and the injected noise source. The lag filter is kept out
//! of the [`ImperfectionStage`] trait: it is a pure function of
//! `(filter, state, input) -> (output, new_state)` and the sensor stores the
//! returned state.

pub mod blur;
pub mod calibration;
pub mod compensation;
pub mod drift;
pub mod frequency;
pub mod lag;
pub mod noise;
pub mod pixels;

pub use blur::OpticalBlur;
pub use calibration::Calibration;
pub use compensation::EnvironmentalCompensation;
pub use drift::DriftAccumulator;
pub use frequency::FrequencyGain;
pub use lag::ResponseLag;
pub use noise::NoiseInjector;
pub use pixels::PixelDefects;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::environment::Environment;
use crate::random::NoiseSource;
use crate::reading::GroundTruthReading;

/// Pipeline position that reported a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StageKind {
    /// Ground-truth acquisition
    Acquisition,
    /// Ambient-condition compensation
    Compensation,
    /// Gain and offset error
    Calibration,
    /// Gaussian optics blur
    OpticalBlur,
    /// Dead and hot pixels
    PixelDefects,
    /// Out-of-band attenuation
    FrequencyGain,
    /// First-order response lag
    ResponseLag,
    /// Additive noise
    Noise,
    /// Time-proportional drift
    Drift,
}

impl StageKind {
    /// Every stage in execution order
    pub const ORDER: [StageKind; 9] = [
        StageKind::Acquisition,
        StageKind::Compensation,
        StageKind::Calibration,
        StageKind::OpticalBlur,
        StageKind::PixelDefects,
        StageKind::FrequencyGain,
        StageKind::ResponseLag,
        StageKind::Noise,
        StageKind::Drift,
    ];

    /// Short name used in diagnostics
    pub const fn name(&self) -> &'static str {
        match self {
            StageKind::Acquisition => "acquisition",
            StageKind::Compensation => "compensation",
            StageKind::Calibration => "calibration",
            StageKind::OpticalBlur => "optical_blur",
            StageKind::PixelDefects => "pixel_defects",
            StageKind::FrequencyGain => "frequency_gain",
            StageKind::ResponseLag => "response_lag",
            StageKind::Noise => "noise",
            StageKind::Drift => "drift",
        }
    }
}

/// Everything a stage may consult besides the reading itself
pub struct StageContext<'a> {
    /// Sensor being sampled
    pub sensor_id: &'a str,
    /// Ground-truth provider for this call
    pub environment: &'a dyn Environment,
    /// Random source for stochastic stages
    pub noise: &'a mut dyn NoiseSource,
    /// Where recoverable problems are reported
    pub diagnostics: &'a mut dyn DiagnosticSink,
}

impl<'a> StageContext<'a> {
    /// Report that a stage was skipped or degraded
    pub fn warn(&mut self, stage: StageKind, message: impl Into<String>) {
        self.diagnostics
            .emit(Diagnostic::warning(self.sensor_id, stage, message));
    }
}

/// One composable degradation step
///
/// ## Example: Constant Bias
///
/// ```rust
/// use sensorsim_core::reading::GroundTruthReading;
/// use sensorsim_core::stages::{ImperfectionStage, StageContext, StageKind};
///
/// struct Bias(f64);
///
/// impl ImperfectionStage for Bias {
///     fn kind(&self) -> StageKind {
///         StageKind::Calibration
///     }
///
///     fn apply(&self, reading: GroundTruthReading, _ctx: &mut StageContext<'_>) -> GroundTruthReading {
///         reading.map_values(|v| v + self.0)
///     }
/// }
/// ```
pub trait ImperfectionStage: Send + Sync {
    /// Which pipeline position this stage occupies
    fn kind(&self) -> StageKind;

    /// Whether the stage acts on readings of this shape
    fn applies_to(&self, _reading: &GroundTruthReading) -> bool {
        true
    }

    /// Degrade one reading
    fn apply(&self, reading: GroundTruthReading, ctx: &mut StageContext<'_>) -> GroundTruthReading;
}
