//! Geometry and unit types shared by configuration, adapters and stages

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sensor position in world coordinates (meters)
pub type Position3 = [f64; 3];

/// Image sensor resolution in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Resolution {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
}

impl Resolution {
    /// Create a resolution
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of pixels
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Whether the coordinate lies inside the sensor
    pub const fn contains(&self, coord: PixelCoord) -> bool {
        coord.x < self.width && coord.y < self.height
    }
}

/// Pixel coordinate, `x` is the column and `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelCoord {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
}

impl PixelCoord {
    /// Create a coordinate
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Frequency band a sensor is designed for
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrequencyRange {
    /// Lower band edge in Hz
    pub min_hz: f64,
    /// Upper band edge in Hz
    pub max_hz: f64,
}

impl FrequencyRange {
    /// Create a band
    pub const fn new(min_hz: f64, max_hz: f64) -> Self {
        Self { min_hz, max_hz }
    }

    /// Whether `frequency_hz` lies inside the band widened by `tolerance_hz` on both sides
    pub fn contains_with_tolerance(&self, frequency_hz: f64, tolerance_hz: f64) -> bool {
        frequency_hz >= self.min_hz - tolerance_hz && frequency_hz <= self.max_hz + tolerance_hz
    }
}

/// Sampling volume around the sensor position
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplingVolume {
    /// Radius of the sensed region in meters
    pub radius_m: f64,
}

/// Ambient quantity an environmental compensation is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AmbientQuantity {
    /// Air temperature in °C
    #[default]
    Temperature,
    /// Relative humidity in %
    Humidity,
    /// Barometric pressure in hPa
    Pressure,
}

impl AmbientQuantity {
    /// Accessor name used in diagnostics
    pub const fn accessor(&self) -> &'static str {
        match self {
            AmbientQuantity::Temperature => "ambient_temperature_celsius",
            AmbientQuantity::Humidity => "ambient_humidity_percent",
            AmbientQuantity::Pressure => "ambient_pressure_hpa",
        }
    }
}
