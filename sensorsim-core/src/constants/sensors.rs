//! Sensor Variant Defaults
//!
//! Field names the adapters publish and the values stuck pixels report.

// ===== FIELD NAMES =====

/// Field carrying EMF magnitude (V/m).
pub const FIELD_STRENGTH: &str = "field_strength";

/// Environment key carrying the dominant EMF frequency (Hz).
///
/// Lifted into reading metadata by the EMF adapter; never degraded.
pub const DOMINANT_FREQUENCY: &str = "dominant_frequency";

/// Field carrying temperature (°C), for probes and thermal images.
pub const TEMPERATURE_C: &str = "temperature_c";

// ===== IMAGE DEFECTS =====

/// Value reported by a dead pixel.
///
/// A dead photosite produces no signal, which reads as zero on the raw
/// output regardless of the scene.
pub const DEAD_PIXEL_VALUE: f64 = 0.0;

// ===== OPTICS =====

/// Gaussian kernel radius in multiples of sigma.
///
/// Weights beyond 4σ are below 0.04% of the peak and are truncated.
///
/// Source: SciPy `gaussian_filter` default `truncate=4.0`
pub const GAUSSIAN_TRUNCATE_SIGMAS: f64 = 4.0;

// ===== FREQUENCY RESPONSE =====

/// Gain inside the widened design band.
pub const IN_BAND_GAIN: f64 = 1.0;

/// Default band widening when none is configured (Hz).
pub const DEFAULT_FREQUENCY_TOLERANCE_HZ: f64 = 0.0;

/// Default gain outside the band when none is configured.
pub const DEFAULT_OUT_OF_BAND_GAIN: f64 = 1.0;
