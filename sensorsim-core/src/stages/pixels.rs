//! Dead and hot pixel injection
//!
//! Physical sensor defects sit behind the optics, so this stage runs after
//! blur and overwrites cells regardless of what upstream stages produced.
//! Hot pixels are written after dead ones; a coordinate listed in both ends up
//! hot.

use crate::config::HotPixelConfig;
use crate::constants::sensors::DEAD_PIXEL_VALUE;
use crate::reading::GroundTruthReading;
use crate::types::PixelCoord;

use super::{ImperfectionStage, StageContext, StageKind};

/// Image-only stuck-cell injection
#[derive(Debug, Clone, PartialEq)]
pub struct PixelDefects {
    dead: Vec<PixelCoord>,
    hot: Vec<PixelCoord>,
    hot_value: f64,
}

impl PixelDefects {
    /// Build the stage, or `None` when no pixel is defective
    pub fn from_config(dead: &[PixelCoord], hot: Option<&HotPixelConfig>) -> Option<Self> {
        let (hot, hot_value) = match hot {
            Some(cfg) => (cfg.coordinates.clone(), cfg.value),
            None => (Vec::new(), 0.0),
        };
        if dead.is_empty() && hot.is_empty() {
            return None;
        }
        Some(Self {
            dead: dead.to_vec(),
            hot,
            hot_value,
        })
    }
}

impl ImperfectionStage for PixelDefects {
    fn kind(&self) -> StageKind {
        StageKind::PixelDefects
    }

    fn applies_to(&self, reading: &GroundTruthReading) -> bool {
        reading.as_image().is_some()
    }

    fn apply(&self, reading: GroundTruthReading, ctx: &mut StageContext<'_>) -> GroundTruthReading {
        let GroundTruthReading::Image(mut image) = reading else {
            return reading;
        };

        let writes = self
            .dead
            .iter()
            .map(|c| (*c, DEAD_PIXEL_VALUE))
            .chain(self.hot.iter().map(|c| (*c, self.hot_value)));

        let mut missed = 0usize;
        for (coord, value) in writes {
            if !image.set(coord, value) {
                missed += 1;
            }
        }

        if missed > 0 {
            let res = image.resolution();
            ctx.warn(
                StageKind::PixelDefects,
                format!("{missed} defect coordinate(s) outside {}x{} image", res.width, res.height),
            );
        }

        GroundTruthReading::Image(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::StaticEnvironment;
    use crate::reading::ImageReading;
    use crate::stages::test_support::run_stage;
    use crate::types::Resolution;

    #[test]
    fn no_defects_builds_nothing() {
        assert!(PixelDefects::from_config(&[], None).is_none());
        let empty_hot = HotPixelConfig { coordinates: vec![], value: 80.0 };
        assert!(PixelDefects::from_config(&[], Some(&empty_hot)).is_none());
    }

    #[test]
    fn overwrites_dead_and_hot_cells() {
        let hot = HotPixelConfig { coordinates: vec![PixelCoord::new(2, 1)], value: 95.0 };
        let stage = PixelDefects::from_config(&[PixelCoord::new(0, 0)], Some(&hot)).unwrap();
        let input = ImageReading::filled("temperature_c", Resolution::new(3, 2), 25.0).into();

        let (out, diags) = run_stage(&stage, input, &StaticEnvironment::new());
        let img = out.as_image().unwrap();

        assert!(diags.is_empty());
        assert_eq!(img.get(PixelCoord::new(0, 0)), Some(DEAD_PIXEL_VALUE));
        assert_eq!(img.get(PixelCoord::new(2, 1)), Some(95.0));
        assert_eq!(img.get(PixelCoord::new(1, 1)), Some(25.0));
    }

    #[test]
    fn hot_wins_over_dead() {
        let coord = PixelCoord::new(1, 0);
        let hot = HotPixelConfig { coordinates: vec![coord], value: 60.0 };
        let stage = PixelDefects::from_config(&[coord], Some(&hot)).unwrap();
        let input = ImageReading::filled("t", Resolution::new(2, 1), 1.0).into();
        let (out, _) = run_stage(&stage, input, &StaticEnvironment::new());
        assert_eq!(out.as_image().unwrap().get(coord), Some(60.0));
    }

    #[test]
    fn out_of_bounds_coordinate_is_reported() {
        let stage = PixelDefects::from_config(&[PixelCoord::new(5, 5)], None).unwrap();
        let input = ImageReading::filled("t", Resolution::new(2, 2), 1.0).into();
        let (out, diags) = run_stage(&stage, input, &StaticEnvironment::new());
        assert_eq!(out.as_image().unwrap().sum(), 4.0);
        assert_eq!(diags.len(), 1);
    }
}
