//! Response-Time Lag Filter
//!
//! ## Filter
//!
//! First-order exponential smoothing per field and per cell:
//!
//! ```text
//! first call:   y₀ = x₀
//! later calls:  yₙ = α·xₙ + (1 − α)·yₙ₋₁
//! ```
//!
//! `α = 1` is an exact pass-through. Fields that have no previous value (a
//! new scalar key, or an image whose shape changed) bootstrap from the input.
//!
//! ## State
//!
//! The filter owns no memory. [`ResponseLag::apply`] takes the current
//! [`SensorState`] and returns the state the sensor must keep for the next
//! call, so the filter can be exercised in isolation:
//!
//! ```rust
//! use sensorsim_core::reading::{GroundTruthReading, ScalarReading};
//! use sensorsim_core::stages::ResponseLag;
//! use sensorsim_core::state::SensorState;
//!
//! let lag = ResponseLag::new(0.5);
//! let x = |v| GroundTruthReading::from(ScalarReading::new().with_field("t", v));
//!
//! let (y0, s1) = lag.apply(x(10.0), &SensorState::new());
//! let (y1, _) = lag.apply(x(20.0), &s1);
//!
//! assert_eq!(y0.as_scalar().unwrap().get("t"), Some(10.0));
//! assert_eq!(y1.as_scalar().unwrap().get("t"), Some(15.0));
//! ```

use crate::reading::GroundTruthReading;
use crate::state::SensorState;

use super::StageKind;

/// Stateful first-order lag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseLag {
    alpha: f64,
}

impl ResponseLag {
    /// Filter with coefficient `alpha` in (0, 1]
    pub const fn new(alpha: f64) -> Self {
        Self { alpha }
    }

    /// Smoothing coefficient
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Pipeline position
    pub const fn kind(&self) -> StageKind {
        StageKind::ResponseLag
    }

    /// Filter one reading, returning the output and the state to keep
    pub fn apply(&self, input: GroundTruthReading, state: &SensorState) -> (GroundTruthReading, SensorState) {
        let output = match (&state.last_filtered_value, state.first_sample_taken) {
            (Some(previous), true) if self.alpha < 1.0 => self.blend(input, previous),
            _ => input,
        };

        let next = SensorState {
            first_sample_taken: true,
            last_filtered_value: Some(output.clone()),
            samples_taken: state.samples_taken,
        };
        (output, next)
    }

    fn blend(&self, input: GroundTruthReading, previous: &GroundTruthReading) -> GroundTruthReading {
        let a = self.alpha;
        let mix = |x: f64, prev: f64| a * x + (1.0 - a) * prev;

        match (input, previous) {
            (GroundTruthReading::Scalar(mut current), GroundTruthReading::Scalar(prev)) => {
                for (name, value) in current.fields.iter_mut() {
                    if let Some(p) = prev.get(name) {
                        *value = mix(*value, p);
                    }
                }
                GroundTruthReading::Scalar(current)
            }
            (GroundTruthReading::Image(mut current), GroundTruthReading::Image(prev))
                if current.resolution() == prev.resolution() =>
            {
                current
                    .pixels_mut()
                    .zip_mut_with(prev.pixels(), |value, &p| *value = mix(*value, p));
                GroundTruthReading::Image(current)
            }
            (input, _) => input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::{ImageReading, ScalarReading};
    use crate::types::Resolution;
    use proptest::prelude::*;

    fn scalar(v: f64) -> GroundTruthReading {
        ScalarReading::new().with_field("field_strength", v).into()
    }

    fn value(r: &GroundTruthReading) -> f64 {
        r.as_scalar().unwrap().get("field_strength").unwrap()
    }

    #[test]
    fn bootstrap_returns_input_and_sets_flag() {
        let (out, state) = ResponseLag::new(0.1).apply(scalar(42.0), &SensorState::new());
        assert_eq!(value(&out), 42.0);
        assert!(state.first_sample_taken);
        assert_eq!(state.last_filtered_value, Some(scalar(42.0)));
    }

    #[test]
    fn blend_follows_exponential_law() {
        let lag = ResponseLag::new(0.25);
        let (_, s1) = lag.apply(scalar(0.0), &SensorState::new());
        let (y1, s2) = lag.apply(scalar(100.0), &s1);
        let (y2, _) = lag.apply(scalar(100.0), &s2);
        assert_eq!(value(&y1), 25.0);
        assert_eq!(value(&y2), 0.25 * 100.0 + 0.75 * 25.0);
    }

    #[test]
    fn cleared_flag_bootstraps_again() {
        let lag = ResponseLag::new(0.5);
        let (_, mut state) = lag.apply(scalar(10.0), &SensorState::new());
        state.first_sample_taken = false;
        let (out, _) = lag.apply(scalar(30.0), &state);
        assert_eq!(value(&out), 30.0);
    }

    #[test]
    fn images_blend_per_cell() {
        let lag = ResponseLag::new(0.5);
        let res = Resolution::new(2, 2);
        let (_, s1) = lag.apply(ImageReading::filled("t", res, 0.0).into(), &SensorState::new());
        let (out, _) = lag.apply(ImageReading::filled("t", res, 8.0).into(), &s1);
        assert!(out.as_image().unwrap().pixels().iter().all(|&p| p == 4.0));
    }

    #[test]
    fn new_fields_bootstrap_individually() {
        let lag = ResponseLag::new(0.5);
        let (_, s1) = lag.apply(scalar(10.0), &SensorState::new());
        let input = ScalarReading::new()
            .with_field("field_strength", 20.0)
            .with_field("extra", 3.0)
            .into();
        let (out, _) = lag.apply(input, &s1);
        let out = out.as_scalar().unwrap();
        assert_eq!(out.get("field_strength"), Some(15.0));
        assert_eq!(out.get("extra"), Some(3.0));
    }

    proptest! {
        #[test]
        fn unit_alpha_is_pass_through(prev in -1e6f64..1e6, next in -1e6f64..1e6) {
            let lag = ResponseLag::new(1.0);
            let (_, s1) = lag.apply(scalar(prev), &SensorState::new());
            let (out, _) = lag.apply(scalar(next), &s1);
            prop_assert_eq!(value(&out), next);
        }

        #[test]
        fn output_lies_between_previous_and_input(
            alpha in 0.01f64..1.0,
            prev in -1e3f64..1e3,
            next in -1e3f64..1e3,
        ) {
            let lag = ResponseLag::new(alpha);
            let (_, s1) = lag.apply(scalar(prev), &SensorState::new());
            let (out, _) = lag.apply(scalar(next), &s1);
            let y = value(&out);
            prop_assert!(y >= prev.min(next) - 1e-9 && y <= prev.max(next) + 1e-9);
        }
    }
}
