//! Model Artifact - reading and verifying the exported model file

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::forest::ForestRegressor;
use super::inference::{ModelError, Regressor};
use super::linear::LinearRegressor;
use crate::logic::features::layout::validate_names;

/// On-disk formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Onnx,
}

impl ArtifactFormat {
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(Self::Json),
            "onnx" => Ok(Self::Onnx),
            _ => Err(ModelError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// JSON export of a fitted estimator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    #[serde(flatten)]
    pub model: ModelParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelParams {
    Linear(LinearRegressor),
    Forest(ForestRegressor),
}

impl JsonArtifact {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ModelError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Check declared names and structure, then hand out the regressor
    pub fn into_regressor(self) -> Result<Box<dyn Regressor>, ModelError> {
        if let Some(names) = &self.feature_names {
            validate_names(names)?;
        }

        match self.model {
            ModelParams::Linear(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
            ModelParams::Forest(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
        }
    }
}

/// Hex SHA-256 of the artifact bytes
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Compare against an expected digest (case-insensitive)
pub fn verify_checksum(bytes: &[u8], expected: &str) -> Result<String, ModelError> {
    let actual = sha256_hex(bytes);

    if !actual.eq_ignore_ascii_case(expected.trim()) {
        return Err(ModelError::ChecksumMismatch {
            expected: expected.trim().to_ascii_lowercase(),
            actual,
        });
    }

    Ok(actual)
}
