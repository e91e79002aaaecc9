//! Sensor Configuration
//!
//! ## Overview
//!
//! A [`SensorConfig`] is built once and never mutated afterwards. Every
//! imperfection stage reads its parameters from here, and every stage is
//! optional: an absent section disables the stage, it is never an error.
//!
//! ```text
//! SensorConfig
//! ├── sensor_id, position_3d, sampling_volume
//! ├── specific_params            resolution, lag alpha, frequency band
//! ├── noise_characteristics      → NoiseInjector
//! ├── calibration_artifacts      → Calibration
//! ├── drift_parameters           → DriftAccumulator
//! ├── environmental_compensation_params → EnvironmentalCompensation
//! ├── optical_blur_config        → OpticalBlur        (image only)
//! ├── dead_pixels, hot_pixels_config → PixelDefects   (image only)
//! └── ground_truth_capability
//! ```
//!
//! Only numeric validity is checked, and it is checked at construction time
//! by [`crate::validation`]. With the `serde` feature every type here
//! deserializes from the key names above, which is what the
//! `sensorsim-schemas` crate uses to load JSON documents.
//!
//! ## Example
//!
//! ```rust
//! use sensorsim_core::config::{SensorConfig, CalibrationConfig, NoiseConfig};
//!
//! let config = SensorConfig::new("emf-7")
//!     .with_calibration(CalibrationConfig { global_gain: 1.1, global_offset: -1.5 })
//!     .with_noise(NoiseConfig::gaussian(0.0, 0.05));
//!
//! assert!(config.noise_characteristics.is_some());
//! ```

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{AmbientQuantity, FrequencyRange, PixelCoord, Position3, Resolution, SamplingVolume};

/// Complete configuration for one sensor instance
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorConfig {
    /// Unique sensor identifier, used in diagnostics
    pub sensor_id: String,
    /// World position of the sensor
    pub position_3d: Position3,
    /// Region the sensor integrates over
    pub sampling_volume: Option<SamplingVolume>,
    /// Sensor-type parameters
    pub specific_params: SpecificParams,
    /// Additive noise model
    pub noise_characteristics: Option<NoiseConfig>,
    /// Factory calibration error
    pub calibration_artifacts: Option<CalibrationConfig>,
    /// Long-term drift per field
    pub drift_parameters: Option<DriftConfig>,
    /// Ambient-condition compensation
    pub environmental_compensation_params: Option<CompensationConfig>,
    /// Optics blur (image sensors)
    pub optical_blur_config: Option<BlurConfig>,
    /// Pixels stuck at the dead value (image sensors)
    pub dead_pixels: Vec<PixelCoord>,
    /// Pixels stuck at a hot value (image sensors)
    pub hot_pixels_config: Option<HotPixelConfig>,
    /// Whether the sensor can acquire ground truth at all
    pub ground_truth_capability: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            sensor_id: String::new(),
            position_3d: [0.0; 3],
            sampling_volume: None,
            specific_params: SpecificParams::default(),
            noise_characteristics: None,
            calibration_artifacts: None,
            drift_parameters: None,
            environmental_compensation_params: None,
            optical_blur_config: None,
            dead_pixels: Vec::new(),
            hot_pixels_config: None,
            ground_truth_capability: true,
        }
    }
}

impl SensorConfig {
    /// Configuration with every stage disabled
    pub fn new(sensor_id: impl Into<String>) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            ..Self::default()
        }
    }

    /// Set the sensor position
    pub fn at(mut self, position: Position3) -> Self {
        self.position_3d = position;
        self
    }

    /// Replace the sensor-type parameters
    pub fn with_specific_params(mut self, params: SpecificParams) -> Self {
        self.specific_params = params;
        self
    }

    /// Set the image resolution
    pub fn with_resolution(mut self, width: usize, height: usize) -> Self {
        self.specific_params.resolution = Some(Resolution::new(width, height));
        self
    }

    /// Set the response-time filter coefficient
    pub fn with_response_alpha(mut self, alpha: f64) -> Self {
        self.specific_params.response_time_alpha = alpha;
        self
    }

    /// Enable additive noise
    pub fn with_noise(mut self, noise: NoiseConfig) -> Self {
        self.noise_characteristics = Some(noise);
        self
    }

    /// Enable calibration artifacts
    pub fn with_calibration(mut self, calibration: CalibrationConfig) -> Self {
        self.calibration_artifacts = Some(calibration);
        self
    }

    /// Enable drift for one field
    pub fn with_drift(mut self, field: impl Into<String>, rate_per_hour: f64) -> Self {
        self.drift_parameters
            .get_or_insert_with(DriftConfig::default)
            .rates_per_hour
            .insert(field.into(), rate_per_hour);
        self
    }

    /// Enable environmental compensation
    pub fn with_compensation(mut self, compensation: CompensationConfig) -> Self {
        self.environmental_compensation_params = Some(compensation);
        self
    }

    /// Enable optical blur
    pub fn with_blur(mut self, blur: BlurConfig) -> Self {
        self.optical_blur_config = Some(blur);
        self
    }

    /// Mark a pixel as dead
    pub fn with_dead_pixel(mut self, x: usize, y: usize) -> Self {
        self.dead_pixels.push(PixelCoord::new(x, y));
        self
    }

    /// Mark pixels as stuck hot
    pub fn with_hot_pixels(mut self, hot: HotPixelConfig) -> Self {
        self.hot_pixels_config = Some(hot);
        self
    }

    /// Disable ground-truth acquisition
    pub fn without_ground_truth(mut self) -> Self {
        self.ground_truth_capability = false;
        self
    }
}

/// Parameters whose meaning depends on the sensor variant
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpecificParams {
    /// Image resolution (required by image sensors)
    pub resolution: Option<Resolution>,
    /// Lag filter coefficient in (0, 1]; 1 disables smoothing
    pub response_time_alpha: f64,
    /// Design band of a frequency-bearing sensor
    pub frequency_range: Option<FrequencyRange>,
    /// Band widening on both sides, Hz
    pub frequency_tolerance_hz: Option<f64>,
    /// Gain applied outside the widened band
    pub default_frequency_gain: Option<f64>,
    /// Override of the variant's physical lower bound for noise clamping
    pub lower_bound: Option<f64>,
}

impl Default for SpecificParams {
    fn default() -> Self {
        Self {
            resolution: None,
            response_time_alpha: 1.0,
            frequency_range: None,
            frequency_tolerance_hz: None,
            default_frequency_gain: None,
            lower_bound: None,
        }
    }
}

/// Noise distribution family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NoiseKind {
    /// Normal distribution
    #[default]
    Gaussian,
    /// Uniform distribution scaled to the configured standard deviation
    Uniform,
}

/// Additive noise parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NoiseConfig {
    /// Distribution family
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: NoiseKind,
    /// Mean of the added noise
    #[cfg_attr(feature = "serde", serde(default))]
    pub mean: f64,
    /// Standard deviation of the added noise
    pub stddev: f64,
}

impl NoiseConfig {
    /// Gaussian noise
    pub const fn gaussian(mean: f64, stddev: f64) -> Self {
        Self { kind: NoiseKind::Gaussian, mean, stddev }
    }

    /// Uniform noise with the given standard deviation
    pub const fn uniform(mean: f64, stddev: f64) -> Self {
        Self { kind: NoiseKind::Uniform, mean, stddev }
    }
}

/// Affine calibration error
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalibrationConfig {
    /// Added after the gain
    pub global_offset: f64,
    /// Multiplies the input
    pub global_gain: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            global_offset: 0.0,
            global_gain: 1.0,
        }
    }
}

impl CalibrationConfig {
    /// Whether this calibration leaves values untouched
    pub fn is_identity(&self) -> bool {
        self.global_gain == 1.0 && self.global_offset == 0.0
    }
}

/// Drift rate per field, in field units per hour
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DriftConfig {
    /// Field name → rate per hour
    pub rates_per_hour: BTreeMap<String, f64>,
}

/// Linear ambient-condition compensation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompensationConfig {
    /// Ambient quantity the sensor is sensitive to
    #[cfg_attr(feature = "serde", serde(default))]
    pub ambient: AmbientQuantity,
    /// Ambient value at which the sensor reads true
    pub reference_value: f64,
    /// Output change per unit of ambient deviation
    pub rate_per_unit: f64,
    /// Fields to compensate; all fields when absent
    #[cfg_attr(feature = "serde", serde(default))]
    pub fields: Option<Vec<String>>,
}

impl CompensationConfig {
    /// Temperature compensation applied to every field
    pub fn temperature(reference_value: f64, rate_per_unit: f64) -> Self {
        Self {
            ambient: AmbientQuantity::Temperature,
            reference_value,
            rate_per_unit,
            fields: None,
        }
    }
}

/// Optics blur parameters
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlurConfig {
    /// Kernel family, only `gaussian` is recognized
    #[cfg_attr(feature = "serde", serde(rename = "type", default = "default_blur_kind"))]
    pub kind: String,
    /// Kernel standard deviation in pixels
    pub sigma: f64,
}

#[cfg(feature = "serde")]
fn default_blur_kind() -> String {
    BlurConfig::GAUSSIAN.to_string()
}

impl BlurConfig {
    /// Name of the Gaussian kernel family
    pub const GAUSSIAN: &'static str = "gaussian";

    /// Gaussian blur with the given sigma
    pub fn gaussian(sigma: f64) -> Self {
        Self {
            kind: Self::GAUSSIAN.to_string(),
            sigma,
        }
    }
}

/// Pixels stuck at a hot value
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HotPixelConfig {
    /// Stuck coordinates
    pub coordinates: Vec<PixelCoord>,
    /// Value they report
    pub value: f64,
}
