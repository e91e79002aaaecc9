//! Ground-Truth Environment Interface
//!
//! ## Overview
//!
//! The environment is an external collaborator that knows the exact physical
//! state of the simulated world. Sensors only ever see it through the
//! [`Environment`] trait, and every accessor on that trait is optional:
//!
//! ```text
//! accessor returns         meaning                         sensor reaction
//! ───────────────────────  ──────────────────────────────  ─────────────────────────
//! None                     capability not provided         error reading / skip stage
//! Some(Err(fault))         query failed                    error reading + warning
//! Some(Ok(data))           data, shape not yet checked     adapter validates shape
//! ```
//!
//! Ground-truth accessors return the raw data shape (a field map or a grid of
//! rows) so that adapters can enforce the shape contract. Ambient and clock
//! accessors return plain numbers because the stages using them have nothing
//! to validate.
//!
//! ## Implementing an Environment
//!
//! Implement only what your world can answer; the defaults report the
//! capability as absent:
//!
//! ```rust
//! use sensorsim_core::environment::Environment;
//! use sensorsim_core::types::AmbientQuantity;
//!
//! struct Lab { t: f64 }
//!
//! impl Environment for Lab {
//!     fn simulation_time_seconds(&self) -> Option<f64> {
//!         Some(self.t)
//!     }
//!
//!     fn ambient(&self, quantity: AmbientQuantity) -> Option<f64> {
//!         match quantity {
//!             AmbientQuantity::Temperature => Some(21.5),
//!             _ => None,
//!         }
//!     }
//! }
//! ```

use std::collections::BTreeMap;

use crate::constants::sensors::{DOMINANT_FREQUENCY, FIELD_STRENGTH};
use crate::errors::EnvironmentFault;
use crate::types::{AmbientQuantity, FrequencyRange, Position3, Resolution, SamplingVolume};

/// Raw named fields returned by scalar ground-truth queries
pub type FieldMap = BTreeMap<String, f64>;

/// Raw image rows returned by image ground-truth queries
pub type RawGrid = Vec<Vec<f64>>;

/// Result of a capability-specific query
pub type Query<T> = Option<Result<T, EnvironmentFault>>;

/// Opaque ground-truth provider
pub trait Environment {
    /// Absolute simulation time in seconds
    fn simulation_time_seconds(&self) -> Option<f64> {
        None
    }

    /// Current value of an ambient condition
    fn ambient(&self, _quantity: AmbientQuantity) -> Option<f64> {
        None
    }

    /// EMF field at a position
    ///
    /// Expected keys: `field_strength` (required, V/m) and
    /// `dominant_frequency` (optional, Hz).
    fn emf_field_strength(
        &self,
        _position: Position3,
        _frequency_range: Option<FrequencyRange>,
    ) -> Query<FieldMap> {
        None
    }

    /// Thermal image seen from a position, in °C, `resolution.height` rows of
    /// `resolution.width` cells
    fn thermal_image(
        &self,
        _position: Position3,
        _sampling_volume: Option<SamplingVolume>,
        _resolution: Resolution,
    ) -> Query<RawGrid> {
        None
    }

    /// Temperature at a point, in °C
    fn point_temperature(&self, _position: Position3) -> Query<f64> {
        None
    }
}

/// In-memory environment with fixed answers
///
/// Every capability starts absent. Builder methods switch capabilities on,
/// and the `failing_*` variants make the query report a fault.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    time_seconds: Option<f64>,
    ambient: BTreeMap<AmbientQuantity, f64>,
    emf: Option<Result<FieldMap, EnvironmentFault>>,
    thermal: Option<Result<RawGrid, EnvironmentFault>>,
    point_temperature: Option<Result<f64, EnvironmentFault>>,
}

impl StaticEnvironment {
    /// Environment with no capabilities
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide an absolute clock
    pub fn with_time(mut self, seconds: f64) -> Self {
        self.time_seconds = Some(seconds);
        self
    }

    /// Advance or set the clock in place
    pub fn set_time(&mut self, seconds: f64) {
        self.time_seconds = Some(seconds);
    }

    /// Provide an ambient value
    pub fn with_ambient(mut self, quantity: AmbientQuantity, value: f64) -> Self {
        self.ambient.insert(quantity, value);
        self
    }

    /// Provide an EMF field with optional dominant frequency
    pub fn with_emf(mut self, field_strength: f64, dominant_frequency: Option<f64>) -> Self {
        let mut fields = FieldMap::new();
        fields.insert(FIELD_STRENGTH.to_string(), field_strength);
        if let Some(freq) = dominant_frequency {
            fields.insert(DOMINANT_FREQUENCY.to_string(), freq);
        }
        self.emf = Some(Ok(fields));
        self
    }

    /// Provide arbitrary EMF fields, including malformed ones
    pub fn with_emf_fields(mut self, fields: FieldMap) -> Self {
        self.emf = Some(Ok(fields));
        self
    }

    /// Make the EMF query fail
    pub fn failing_emf(mut self, cause: impl Into<String>) -> Self {
        self.emf = Some(Err(EnvironmentFault::new(cause)));
        self
    }

    /// Provide a thermal image
    pub fn with_thermal_rows(mut self, rows: RawGrid) -> Self {
        self.thermal = Some(Ok(rows));
        self
    }

    /// Provide a uniform thermal image
    pub fn with_uniform_thermal(self, resolution: Resolution, celsius: f64) -> Self {
        self.with_thermal_rows(vec![vec![celsius; resolution.width]; resolution.height])
    }

    /// Make the thermal query fail
    pub fn failing_thermal(mut self, cause: impl Into<String>) -> Self {
        self.thermal = Some(Err(EnvironmentFault::new(cause)));
        self
    }

    /// Provide a point temperature
    pub fn with_point_temperature(mut self, celsius: f64) -> Self {
        self.point_temperature = Some(Ok(celsius));
        self
    }

    /// Make the point temperature query fail
    pub fn failing_point_temperature(mut self, cause: impl Into<String>) -> Self {
        self.point_temperature = Some(Err(EnvironmentFault::new(cause)));
        self
    }
}

impl Environment for StaticEnvironment {
    fn simulation_time_seconds(&self) -> Option<f64> {
        self.time_seconds
    }

    fn ambient(&self, quantity: AmbientQuantity) -> Option<f64> {
        self.ambient.get(&quantity).copied()
    }

    fn emf_field_strength(&self, _position: Position3, _range: Option<FrequencyRange>) -> Query<FieldMap> {
        self.emf.clone()
    }

    fn thermal_image(
        &self,
        _position: Position3,
        _sampling_volume: Option<SamplingVolume>,
        _resolution: Resolution,
    ) -> Query<RawGrid> {
        self.thermal.clone()
    }

    fn point_temperature(&self, _position: Position3) -> Query<f64> {
        self.point_temperature.clone()
    }
}
