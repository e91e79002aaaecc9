//! Affine calibration error

use crate::config::CalibrationConfig;
use crate::reading::GroundTruthReading;

use super::{ImperfectionStage, StageContext, StageKind};

/// `output = input × gain + offset` on every field and cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    gain: f64,
    offset: f64,
}

impl Calibration {
    /// Build the stage, or `None` when the calibration is the identity
    pub fn from_config(config: Option<&CalibrationConfig>) -> Option<Self> {
        let config = config?;
        if config.is_identity() {
            return None;
        }
        Some(Self {
            gain: config.global_gain,
            offset: config.global_offset,
        })
    }
}

impl ImperfectionStage for Calibration {
    fn kind(&self) -> StageKind {
        StageKind::Calibration
    }

    fn apply(&self, reading: GroundTruthReading, _ctx: &mut StageContext<'_>) -> GroundTruthReading {
        reading.map_values(|v| v * self.gain + self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::StaticEnvironment;
    use crate::reading::{ImageReading, ScalarReading};
    use crate::stages::test_support::run_stage;
    use crate::types::Resolution;

    #[test]
    fn neutral_or_absent_config_builds_nothing() {
        assert!(Calibration::from_config(None).is_none());
        assert!(Calibration::from_config(Some(&CalibrationConfig::default())).is_none());
    }

    #[test]
    fn affine_law_on_scalar() {
        let stage = Calibration::from_config(Some(&CalibrationConfig {
            global_gain: 1.1,
            global_offset: -1.5,
        }))
        .unwrap();
        let input = ScalarReading::new().with_field("field_strength", 50.0).into();
        let (out, diags) = run_stage(&stage, input, &StaticEnvironment::new());
        let v = out.as_scalar().unwrap().get("field_strength").unwrap();
        assert!((v - 53.5).abs() < 1e-9);
        assert!(diags.is_empty());
    }

    #[test]
    fn affine_law_on_every_pixel() {
        let stage = Calibration::from_config(Some(&CalibrationConfig {
            global_gain: 2.0,
            global_offset: 1.0,
        }))
        .unwrap();
        let input = ImageReading::filled("temperature_c", Resolution::new(3, 2), 10.0).into();
        let (out, _) = run_stage(&stage, input, &StaticEnvironment::new());
        assert!(out.as_image().unwrap().pixels().iter().all(|&p| p == 21.0));
    }
}
