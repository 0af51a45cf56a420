//! Prediction Input - parsing the nine request fields
//!
//! Fields arrive either as form strings or as JSON values. Each one must be
//! a finite number; the first offending field (in submission order) wins.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::vector::FeatureVector;
use crate::logic::sensors::SensorReadings;

/// Order in which the dashboard form submits its fields
pub const FIELD_ORDER: &[&str] = &[
    "N", "P", "K", "ph", "rainfall",
    "temperature", "humidity", "soil_moisture", "water_level",
];

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("missing field `{field}`")]
    MissingField { field: &'static str },

    #[error("field `{field}` is not a valid number")]
    InvalidNumber { field: &'static str },
}

// ============================================================================
// RAW FIELD VALUES
// ============================================================================

/// A single submitted value, before conversion
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl FieldValue {
    /// Convert to a finite number, if possible
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => s.trim().parse::<f64>().ok()?,
            FieldValue::Other(_) => return None,
        };

        value.is_finite().then_some(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

// ============================================================================
// PARSED INPUT
// ============================================================================

/// Values typed in by the user
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ManualInputs {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub ph: f64,
    pub rainfall: f64,
}

/// Everything needed for one prediction
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionInput {
    pub manual: ManualInputs,
    pub sensors: SensorReadings,
}

impl PredictionInput {
    /// Parse from a field map (form or JSON body)
    pub fn from_fields(fields: &HashMap<String, FieldValue>) -> Result<Self, InputError> {
        let mut values = [0.0f64; 9];

        for (slot, &field) in values.iter_mut().zip(FIELD_ORDER.iter()) {
            let raw = fields
                .get(field)
                .ok_or(InputError::MissingField { field })?;
            *slot = raw.as_number().ok_or(InputError::InvalidNumber { field })?;
        }

        let [n, p, k, ph, rainfall, temperature, humidity, soil_moisture, water_level] = values;

        Ok(Self {
            manual: ManualInputs {
                nitrogen: n,
                phosphorus: p,
                potassium: k,
                ph,
                rainfall,
            },
            sensors: SensorReadings {
                soil_moisture,
                water_level,
                temperature,
                humidity,
            },
        })
    }

    pub fn feature_vector(&self) -> FeatureVector {
        FeatureVector::from_parts(&self.manual, &self.sensors)
    }
}
