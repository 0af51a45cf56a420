//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the order of the model's inputs.**
//!
//! The regression model was trained on exactly this column order. Any
//! change here (add, remove, reorder) must bump `FEATURE_VERSION` and needs
//! a re-exported model artifact.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Soil nutrients (manual) ===
    "N",             // 0: Nitrogen
    "P",             // 1: Phosphorus
    "K",             // 2: Potassium

    // === Climate (sensor) ===
    "temperature",   // 3: Air temperature, °C
    "humidity",      // 4: Relative humidity, %

    // === Soil / weather (manual) ===
    "ph",            // 5: Soil pH
    "rainfall",      // 6: Rainfall, mm

    // === Field (sensor) ===
    "soil_moisture", // 7: Soil moisture, %
    "water_level",   // 8: Water level, %
];

/// Total number of features
pub const FEATURE_COUNT: usize = 9;

/// Features typed in by the user
pub const MANUAL_FEATURES: &[&str] = &["N", "P", "K", "ph", "rainfall"];

/// Features filled from the sensor readings
pub const SENSOR_FEATURES: &[&str] = &["temperature", "humidity", "soil_moisture", "water_level"];

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }

    hasher.finalize()
}

/// Get layout hash
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
    pub manual_features: Vec<String>,
    pub sensor_features: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
            manual_features: MANUAL_FEATURES.iter().map(|s| s.to_string()).collect(),
            sensor_features: SENSOR_FEATURES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when a model declares a different feature layout
#[derive(Debug, Clone, thiserror::Error)]
#[error("Feature layout mismatch: expected [{}], got [{}]", .expected.join(", "), .actual.join(", "))]
pub struct LayoutMismatchError {
    pub expected: Vec<String>,
    pub actual: Vec<String>,
}

/// Validate feature names declared by a model artifact against the layout
pub fn validate_names(names: &[String]) -> Result<(), LayoutMismatchError> {
    let matches = names.len() == FEATURE_COUNT
        && names.iter().zip(FEATURE_LAYOUT.iter()).all(|(a, b)| a == b);

    if !matches {
        return Err(LayoutMismatchError {
            expected: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
            actual: names.to_vec(),
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
        assert_eq!(MANUAL_FEATURES.len() + SENSOR_FEATURES.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_every_feature_is_manual_or_sensor() {
        for name in FEATURE_LAYOUT {
            assert!(MANUAL_FEATURES.contains(name) ^ SENSOR_FEATURES.contains(name), "{name}");
        }
    }

    #[test]
    fn test_layout_hash_consistency() {
        assert_eq!(compute_layout_hash(), compute_layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(feature_index("N"), Some(0));
        assert_eq!(feature_index("temperature"), Some(3));
        assert_eq!(feature_index("ph"), Some(5));
        assert_eq!(feature_index("water_level"), Some(8));
        assert_eq!(feature_index("nonexistent"), None);
    }

    #[test]
    fn test_feature_name() {
        assert_eq!(feature_name(0), Some("N"));
        assert_eq!(feature_name(7), Some("soil_moisture"));
        assert_eq!(feature_name(9), None);
    }

    #[test]
    fn test_validate_names() {
        let good: Vec<String> = FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect();
        assert!(validate_names(&good).is_ok());

        let mut swapped = good.clone();
        swapped.swap(3, 4);
        assert!(validate_names(&swapped).is_err());

        assert!(validate_names(&good[..8]).is_err());
    }
}
