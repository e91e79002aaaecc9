//! Constants for SensorSim Core
//!
//! Centralized numeric values used by the adapters and stages. Every value
//! documents its unit and where it comes from.
//!
//! ## Organization
//!
//! - **Physics**: physical limits and unit conversions
//! - **Sensors**: sensor-variant defaults (field names, defect values)
//! - **Buffers**: bounded buffer capacities
//!
//! ## Usage Guidelines
//!
//! 1. Use these constants instead of magic numbers
//! 2. Include the unit in the name
//! 3. Group related constants together

/// Physical constants, limits and unit conversions.
pub mod physics;

/// Sensor-variant defaults such as field names and defect values.
pub mod sensors;

/// Buffer capacities for bounded logs.
pub mod buffers;
