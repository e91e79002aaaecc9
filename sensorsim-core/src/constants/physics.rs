//! Physical Constants and Unit Conversions
//!
//! Limits used to clamp degraded readings to physically valid values, plus
//! the conversions the time-indexed stages rely on.

// ===== FUNDAMENTAL LIMITS =====

/// Absolute zero in Celsius (°C).
///
/// Lower bound for every temperature-valued sensor after noise injection.
///
/// Source: NIST Special Publication 330 (2019)
pub const ABSOLUTE_ZERO_CELSIUS: f64 = -273.15;

/// Lower bound for field magnitudes (V/m).
///
/// A field strength is a magnitude and cannot be negative, however much
/// noise is added to a weak field.
pub const FIELD_MAGNITUDE_FLOOR: f64 = 0.0;

// ===== TIME CONVERSIONS =====

/// Seconds in one hour.
///
/// Drift rates are configured per hour while the environment clock runs in
/// seconds.
pub const SECONDS_PER_HOUR: f64 = 3600.0;
