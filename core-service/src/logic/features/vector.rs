//! Feature Vector - Core data structure for model input
//!
//! Versioned feature vector; ordering comes from `layout.rs`.

use serde::{Deserialize, Serialize};

use super::input::ManualInputs;
use super::layout::{feature_index, layout_hash, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
use crate::logic::sensors::SensorReadings;

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create a new zeroed feature vector with current version
    pub fn new() -> Self {
        Self::from_values([0.0; FEATURE_COUNT])
    }

    /// Create from raw values with current version
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Assemble the model input from user inputs and sensor readings
    pub fn from_parts(manual: &ManualInputs, sensors: &SensorReadings) -> Self {
        FeatureVectorBuilder::new()
            .nitrogen(manual.nitrogen)
            .phosphorus(manual.phosphorus)
            .potassium(manual.potassium)
            .ph(manual.ph)
            .rainfall(manual.rainfall)
            .temperature(sensors.temperature)
            .humidity(sensors.humidity)
            .soil_moisture(sensors.soil_moisture)
            .water_level(sensors.water_level)
            .build()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// Set feature by name
    pub fn set_by_name(&mut self, name: &str, value: f64) -> bool {
        match feature_index(name) {
            Some(index) => {
                self.values[index] = value;
                true
            }
            None => false,
        }
    }

    /// Check if this vector was built against the current layout
    pub fn is_compatible(&self) -> bool {
        self.version == FEATURE_VERSION && self.layout_hash == layout_hash()
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), serde_json::Value::from(*value)))
                .collect::<serde_json::Map<_, _>>(),
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector with named setters
pub struct FeatureVectorBuilder {
    vector: FeatureVector,
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self { vector: FeatureVector::new() }
    }

    pub fn nitrogen(self, value: f64) -> Self {
        self.set("N", value)
    }

    pub fn phosphorus(self, value: f64) -> Self {
        self.set("P", value)
    }

    pub fn potassium(self, value: f64) -> Self {
        self.set("K", value)
    }

    pub fn temperature(self, value: f64) -> Self {
        self.set("temperature", value)
    }

    pub fn humidity(self, value: f64) -> Self {
        self.set("humidity", value)
    }

    pub fn ph(self, value: f64) -> Self {
        self.set("ph", value)
    }

    pub fn rainfall(self, value: f64) -> Self {
        self.set("rainfall", value)
    }

    pub fn soil_moisture(self, value: f64) -> Self {
        self.set("soil_moisture", value)
    }

    pub fn water_level(self, value: f64) -> Self {
        self.set("water_level", value)
    }

    /// Set feature by name dynamically
    pub fn set(mut self, name: &str, value: f64) -> Self {
        self.vector.set_by_name(name, value);
        self
    }

    pub fn build(self) -> FeatureVector {
        self.vector
    }
}

impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
