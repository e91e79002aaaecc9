//! Named Sensor Presets
//!
//! A registry maps preset names to configuration documents and the kind of
//! sensor each document describes. Building a sensor from a preset stamps the
//! caller's `sensor_id` into a copy of the document, runs it through the same
//! loader as hand-written JSON, and hands the result to the sensor constructor.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

use sensorsim_core::{EmfSensor, SensorConfig, TemperatureProbe, ThermalCamera};

use crate::{config_from_value, schemas, SchemaError, SchemaResult};

/// Kind of sensor a preset configures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorVariant {
    /// Scalar EMF meter
    Emf,
    /// Image-producing thermal camera
    Thermal,
    /// Point temperature probe
    Probe,
}

impl SensorVariant {
    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            SensorVariant::Emf => "EMF meter",
            SensorVariant::Thermal => "thermal camera",
            SensorVariant::Probe => "temperature probe",
        }
    }
}

#[derive(Debug, Clone)]
struct Preset {
    variant: SensorVariant,
    document: Value,
}

/// Thread-safe preset registry
pub struct SensorRegistry {
    presets: RwLock<HashMap<String, Preset>>,
}

impl SensorRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            presets: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry holding the built-in presets
    pub fn with_defaults() -> SchemaResult<Self> {
        let registry = Self::new();
        registry.load_defaults()?;
        Ok(registry)
    }

    /// Register a preset document under `name`
    ///
    /// The document is checked by parsing it once with a placeholder id, so
    /// a preset that can never build is rejected here rather than at use.
    pub fn register(&self, name: &str, variant: SensorVariant, document: Value) -> SchemaResult<()> {
        config_from_value(with_sensor_id(document.clone(), name))?;

        let mut presets = self.presets.write().map_err(|_| lock_poisoned())?;
        if presets.contains_key(name) {
            return Err(SchemaError::ValidationError(format!("Preset {name} already registered")));
        }
        presets.insert(name.to_string(), Preset { variant, document });
        Ok(())
    }

    /// Raw document of a preset
    pub fn get(&self, name: &str) -> SchemaResult<Value> {
        self.preset(name).map(|preset| preset.document)
    }

    /// Sensor kind of a preset
    pub fn variant(&self, name: &str) -> SchemaResult<SensorVariant> {
        self.preset(name).map(|preset| preset.variant)
    }

    /// Registered preset names, sorted
    pub fn names(&self) -> SchemaResult<Vec<String>> {
        let presets = self.presets.read().map_err(|_| lock_poisoned())?;
        let mut names: Vec<String> = presets.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Typed configuration for `sensor_id` built from a preset
    pub fn config(&self, name: &str, sensor_id: &str) -> SchemaResult<SensorConfig> {
        let preset = self.preset(name)?;
        config_from_value(with_sensor_id(preset.document, sensor_id))
    }

    /// Build an EMF meter from a preset
    pub fn build_emf(&self, name: &str, sensor_id: &str) -> SchemaResult<EmfSensor> {
        let config = self.typed_config(name, sensor_id, SensorVariant::Emf)?;
        Ok(EmfSensor::emf(config)?)
    }

    /// Build a thermal camera from a preset
    pub fn build_thermal_camera(&self, name: &str, sensor_id: &str) -> SchemaResult<ThermalCamera> {
        let config = self.typed_config(name, sensor_id, SensorVariant::Thermal)?;
        Ok(ThermalCamera::thermal_camera(config)?)
    }

    /// Build a temperature probe from a preset
    pub fn build_temperature_probe(&self, name: &str, sensor_id: &str) -> SchemaResult<TemperatureProbe> {
        let config = self.typed_config(name, sensor_id, SensorVariant::Probe)?;
        Ok(TemperatureProbe::temperature_probe(config)?)
    }

    /// Load the built-in presets
    pub fn load_defaults(&self) -> SchemaResult<()> {
        self.register("emf_meter_v1", SensorVariant::Emf, schemas::emf_meter_v1())?;
        self.register("thermal_camera_v1", SensorVariant::Thermal, schemas::thermal_camera_v1())?;
        self.register("temperature_probe_v1", SensorVariant::Probe, schemas::temperature_probe_v1())?;
        Ok(())
    }

    fn preset(&self, name: &str) -> SchemaResult<Preset> {
        let presets = self.presets.read().map_err(|_| lock_poisoned())?;
        presets
            .get(name)
            .cloned()
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))
    }

    fn typed_config(&self, name: &str, sensor_id: &str, expected: SensorVariant) -> SchemaResult<SensorConfig> {
        let found = self.variant(name)?;
        if found != expected {
            return Err(SchemaError::ValidationError(format!(
                "Preset {name} configures a {}, not a {}",
                found.name(),
                expected.name()
            )));
        }
        self.config(name, sensor_id)
    }
}

impl Default for SensorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn with_sensor_id(mut document: Value, sensor_id: &str) -> Value {
    if let Some(root) = document.as_object_mut() {
        root.insert("sensor_id".to_string(), Value::String(sensor_id.to_string()));
    }
    document
}

fn lock_poisoned() -> SchemaError {
    SchemaError::ValidationError("Lock poisoned".to_string())
}
