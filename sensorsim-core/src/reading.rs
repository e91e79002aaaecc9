//! Reading Types Flowing Through the Imperfection Pipeline
//!
//! ## Overview
//!
//! Ground truth arrives from the environment in one of two shapes, and every
//! stage decides whether it applies by looking at that shape, never at the
//! sensor type that produced it:
//!
//! ```text
//! GroundTruthReading
//! ├── Scalar  { fields: name → value, dominant_frequency_hz }
//! └── Image   { quantity, pixels: Array2 (height × width) }
//! ```
//!
//! Scalar readings carry named fields (`field_strength`, `temperature_c`).
//! The optional dominant frequency is metadata: stages read it but never
//! degrade it. Image readings carry a single measured quantity over a fixed
//! grid; every cell is treated as an independent field with that name.
//!
//! The sensor hands back a [`SensorOutput`], which is either the degraded
//! reading or an [`ErrorReading`]. Consumers detect failure by the presence
//! of the `error` key alone:
//!
//! ```json
//! {"error": "Environment lacks required method `thermal_image`"}
//! ```

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use ndarray::Array2;

use crate::types::{PixelCoord, Resolution};

/// Named scalar fields with optional frequency metadata
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScalarReading {
    /// Measured fields by name
    pub fields: BTreeMap<String, f64>,
    /// Dominant frequency of the sensed signal, when the source reports one
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub dominant_frequency_hz: Option<f64>,
}

impl ScalarReading {
    /// Empty reading
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion
    pub fn with_field(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Builder-style frequency metadata
    pub fn with_dominant_frequency(mut self, frequency_hz: f64) -> Self {
        self.dominant_frequency_hz = Some(frequency_hz);
        self
    }

    /// Value of a field
    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields.get(name).copied()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are present
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Image of a single measured quantity
///
/// Pixels are stored as an `(height, width)` array, so the shape is the
/// resolution and cannot disagree with it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ImageRecord", into = "ImageRecord"))]
pub struct ImageReading {
    quantity: String,
    pixels: Array2<f64>,
}

impl ImageReading {
    /// Build an image from row-major pixels
    ///
    /// Returns `None` when the pixel count does not match the resolution.
    pub fn new(quantity: impl Into<String>, resolution: Resolution, pixels: Vec<f64>) -> Option<Self> {
        let pixels = Array2::from_shape_vec((resolution.height, resolution.width), pixels).ok()?;
        Some(Self::from_array(quantity, pixels))
    }

    /// Wrap an `(height, width)` array
    pub fn from_array(quantity: impl Into<String>, pixels: Array2<f64>) -> Self {
        Self {
            quantity: quantity.into(),
            pixels,
        }
    }

    /// Image with every pixel set to `value`
    pub fn filled(quantity: impl Into<String>, resolution: Resolution, value: f64) -> Self {
        Self::from_array(quantity, Array2::from_elem((resolution.height, resolution.width), value))
    }

    /// Name of the measured quantity
    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    /// Image dimensions
    pub fn resolution(&self) -> Resolution {
        let (height, width) = self.pixels.dim();
        Resolution::new(width, height)
    }

    /// Pixel grid indexed `[[y, x]]`
    pub fn pixels(&self) -> &Array2<f64> {
        &self.pixels
    }

    /// Mutable pixel grid
    pub fn pixels_mut(&mut self) -> &mut Array2<f64> {
        &mut self.pixels
    }

    /// Pixel value at a coordinate
    pub fn get(&self, coord: PixelCoord) -> Option<f64> {
        self.pixels.get((coord.y, coord.x)).copied()
    }

    /// Overwrite a pixel; returns false when the coordinate is outside the image
    pub fn set(&mut self, coord: PixelCoord, value: f64) -> bool {
        match self.pixels.get_mut((coord.y, coord.x)) {
            Some(pixel) => {
                *pixel = value;
                true
            }
            None => false,
        }
    }

    /// Sum over all pixels
    pub fn sum(&self) -> f64 {
        self.pixels.sum()
    }
}

/// Flat wire form of an image, checked on the way in
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct ImageRecord {
    quantity: String,
    resolution: Resolution,
    pixels: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<ImageRecord> for ImageReading {
    type Error = String;

    fn try_from(record: ImageRecord) -> Result<Self, Self::Error> {
        let count = record.pixels.len();
        let resolution = record.resolution;
        ImageReading::new(record.quantity, resolution, record.pixels).ok_or_else(|| {
            format!(
                "{count} pixels do not fill a {}x{} image",
                resolution.width, resolution.height
            )
        })
    }
}

#[cfg(feature = "serde")]
impl From<ImageReading> for ImageRecord {
    fn from(image: ImageReading) -> Self {
        Self {
            resolution: image.resolution(),
            pixels: image.pixels.iter().copied().collect(),
            quantity: image.quantity,
        }
    }
}

/// Reading shape used for stage applicability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingShape {
    /// Named scalar fields
    Scalar,
    /// 2-D grid
    Image,
}

/// Exact or degraded physical reading
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum GroundTruthReading {
    /// Named scalar fields
    Scalar(ScalarReading),
    /// 2-D grid
    Image(ImageReading),
}

impl GroundTruthReading {
    /// Shape tag of this reading
    pub fn shape(&self) -> ReadingShape {
        match self {
            GroundTruthReading::Scalar(_) => ReadingShape::Scalar,
            GroundTruthReading::Image(_) => ReadingShape::Image,
        }
    }

    /// Scalar payload, if any
    pub fn as_scalar(&self) -> Option<&ScalarReading> {
        match self {
            GroundTruthReading::Scalar(s) => Some(s),
            GroundTruthReading::Image(_) => None,
        }
    }

    /// Image payload, if any
    pub fn as_image(&self) -> Option<&ImageReading> {
        match self {
            GroundTruthReading::Image(img) => Some(img),
            GroundTruthReading::Scalar(_) => None,
        }
    }

    /// Visit every degradable value with the name of the field it belongs to
    ///
    /// Image cells all report the image quantity as their field name.
    pub fn for_each_value_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut f64),
    {
        match self {
            GroundTruthReading::Scalar(scalar) => {
                for (name, value) in scalar.fields.iter_mut() {
                    f(name, value);
                }
            }
            GroundTruthReading::Image(image) => {
                let ImageReading { quantity, pixels } = image;
                for value in pixels.iter_mut() {
                    f(quantity.as_str(), value);
                }
            }
        }
    }

    /// Apply `f` to every degradable value
    pub fn map_values<F>(mut self, mut f: F) -> Self
    where
        F: FnMut(f64) -> f64,
    {
        self.for_each_value_mut(|_, v| *v = f(*v));
        self
    }
}

impl From<ScalarReading> for GroundTruthReading {
    fn from(reading: ScalarReading) -> Self {
        GroundTruthReading::Scalar(reading)
    }
}

impl From<ImageReading> for GroundTruthReading {
    fn from(reading: ImageReading) -> Self {
        GroundTruthReading::Image(reading)
    }
}

/// Failed sample, carrying only a human-readable message
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErrorReading {
    /// What went wrong
    pub error: String,
}

impl ErrorReading {
    /// Create an error reading
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Result of one `sample()` call
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum SensorOutput {
    /// Failed acquisition
    Error(ErrorReading),
    /// Degraded reading
    Reading(GroundTruthReading),
}

impl SensorOutput {
    /// Whether the sample failed
    pub fn is_error(&self) -> bool {
        matches!(self, SensorOutput::Error(_))
    }

    /// Degraded reading, if the sample succeeded
    pub fn reading(&self) -> Option<&GroundTruthReading> {
        match self {
            SensorOutput::Reading(r) => Some(r),
            SensorOutput::Error(_) => None,
        }
    }

    /// Error message, if the sample failed
    pub fn error(&self) -> Option<&str> {
        match self {
            SensorOutput::Error(e) => Some(&e.error),
            SensorOutput::Reading(_) => None,
        }
    }

    /// Scalar field of a successful scalar reading
    pub fn scalar_field(&self, name: &str) -> Option<f64> {
        self.reading()?.as_scalar()?.get(name)
    }

    /// Image of a successful image reading
    pub fn image(&self) -> Option<&ImageReading> {
        self.reading()?.as_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_rejects_wrong_pixel_count() {
        let res = Resolution::new(3, 2);
        assert!(ImageReading::new("t", res, vec![0.0; 5]).is_none());
        assert!(ImageReading::new("t", res, vec![0.0; 6]).is_some());
    }

    #[test]
    fn image_indexing_is_row_major() {
        let res = Resolution::new(3, 2);
        let img = ImageReading::new("t", res, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(img.get(PixelCoord::new(2, 0)), Some(2.0));
        assert_eq!(img.get(PixelCoord::new(0, 1)), Some(3.0));
        assert_eq!(img.get(PixelCoord::new(3, 1)), None);
    }

    #[test]
    fn frequency_metadata_is_not_a_degradable_value() {
        let reading: GroundTruthReading = ScalarReading::new()
            .with_field("field_strength", 2.0)
            .with_dominant_frequency(60.0)
            .into();

        let doubled = reading.map_values(|v| v * 2.0);
        let scalar = doubled.as_scalar().unwrap();
        assert_eq!(scalar.get("field_strength"), Some(4.0));
        assert_eq!(scalar.dominant_frequency_hz, Some(60.0));
    }

    #[test]
    fn image_cells_report_quantity_name() {
        let mut reading: GroundTruthReading =
            ImageReading::filled("temperature_c", Resolution::new(2, 2), 1.0).into();
        let mut names = Vec::new();
        reading.for_each_value_mut(|name, _| names.push(name.to_string()));
        assert_eq!(names.len(), 4);
        assert!(names.iter().all(|n| n == "temperature_c"));
    }

    #[test]
    fn resolution_follows_array_shape() {
        let img = ImageReading::from_array("t", Array2::zeros((2, 5)));
        assert_eq!(img.resolution(), Resolution::new(5, 2));
        assert_eq!(img.pixels()[[1, 4]], 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn image_serializes_flat_and_rejects_short_pixel_lists() {
        let img = ImageReading::new("t", Resolution::new(2, 1), vec![1.0, 2.0]).unwrap();
        let json = serde_json::to_value(&img).unwrap();
        assert_eq!(json["pixels"], serde_json::json!([1.0, 2.0]));
        assert_eq!(serde_json::from_value::<ImageReading>(json).unwrap(), img);

        let short = serde_json::json!({
            "quantity": "t",
            "resolution": {"width": 3, "height": 3},
            "pixels": [1.0]
        });
        assert!(serde_json::from_value::<ImageReading>(short).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn error_output_serializes_to_error_key_only() {
        let out = SensorOutput::Error(ErrorReading::new("boom"));
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json, serde_json::json!({"error": "boom"}));
    }
}
