//! Inference Engine - the loaded crop-yield model
//!
//! The artifact is read once at startup and never changes afterwards.
//! Prediction is a single call into the regressor; this module adds
//! checksum/layout checks at load and latency stats at predict.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::artifact::{sha256_hex, verify_checksum, ArtifactFormat, JsonArtifact};
use crate::constants::{round_to, DEFAULT_MODEL_PATH, PREDICTION_DECIMALS};
use crate::logic::features::{FeatureVector, LayoutMismatchError, FEATURE_COUNT};

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model not found: {0}")]
    NotFound(String),

    #[error("Failed to read model: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid model JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported model format: {0}")]
    UnsupportedFormat(String),

    #[error("Model checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),

    #[error("X has {actual} features, but the model is expecting {expected} features as input")]
    FeatureCount { expected: usize, actual: usize },

    #[error("Feature vector was built for a different layout")]
    IncompatibleVector,

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("Model produced a non-finite value: {0}")]
    NonFinite(f64),

    #[error("Inference runtime error: {0}")]
    Runtime(String),
}

// ============================================================================
// REGRESSOR TRAIT
// ============================================================================

/// Trait for regression backends (linear, tree ensemble, ONNX)
pub trait Regressor: Send + Sync {
    fn kind(&self) -> &'static str;
    fn n_features(&self) -> usize;
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError>;
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Where to load the model from
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub path: PathBuf,
    /// Expected SHA-256 (hex) of the artifact; unchecked when `None`
    pub sha256: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_MODEL_PATH),
            sha256: None,
        }
    }
}

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub model_kind: String,
    pub features: usize,
    pub sha256: Option<String>,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Engine status for the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_kind: String,
    pub prediction_count: u64,
    pub error_count: u64,
    pub avg_latency_ms: f64,
}

/// Prediction output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Raw regressor output
    pub value: f64,
    /// Rounded to 2 decimals
    pub rounded: f64,
    pub inference_time_us: u64,
    pub method: String,
}

#[derive(Debug, Default)]
struct EngineStats {
    predictions: AtomicU64,
    errors: AtomicU64,
    latency_sum_us: AtomicU64,
}

// ============================================================================
// YIELD MODEL
// ============================================================================

pub struct YieldModel {
    regressor: Box<dyn Regressor>,
    metadata: ModelMetadata,
    stats: EngineStats,
}

impl YieldModel {
    /// Load, verify and validate the artifact described by `config`
    pub fn load(config: &ModelConfig) -> Result<Self, ModelError> {
        let path = config.path.as_path();
        log::info!("Loading model from: {}", path.display());

        if !path.exists() {
            return Err(ModelError::NotFound(path.display().to_string()));
        }

        let format = ArtifactFormat::from_path(path)?;
        let bytes = std::fs::read(path)?;

        let digest = match &config.sha256 {
            Some(expected) => verify_checksum(&bytes, expected)?,
            None => sha256_hex(&bytes),
        };

        let regressor = match format {
            ArtifactFormat::Json => JsonArtifact::from_bytes(&bytes)?.into_regressor()?,
            ArtifactFormat::Onnx => load_onnx(path)?,
        };

        let mut model = Self::from_regressor(regressor, &path.display().to_string())?;
        model.metadata.sha256 = Some(digest);

        log::info!(
            "Model loaded: {} ({} features)",
            model.metadata.model_kind,
            model.metadata.features
        );

        Ok(model)
    }

    /// Wrap an in-memory regressor
    pub fn from_regressor(regressor: Box<dyn Regressor>, source: &str) -> Result<Self, ModelError> {
        if regressor.n_features() != FEATURE_COUNT {
            return Err(ModelError::FeatureCount {
                expected: regressor.n_features(),
                actual: FEATURE_COUNT,
            });
        }

        let metadata = ModelMetadata {
            model_path: source.to_string(),
            model_kind: regressor.kind().to_string(),
            features: regressor.n_features(),
            sha256: None,
            loaded_at: chrono::Utc::now(),
        };

        Ok(Self {
            regressor,
            metadata,
            stats: EngineStats::default(),
        })
    }

    /// Run the model on one feature vector
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError> {
        let result = self.run(features);

        if result.is_err() {
            self.stats.errors.fetch_add(1, Ordering::Relaxed);
        }

        result
    }

    fn run(&self, features: &FeatureVector) -> Result<Prediction, ModelError> {
        if !features.is_compatible() {
            return Err(ModelError::IncompatibleVector);
        }

        let start = Instant::now();
        let value = self.regressor.predict(features.as_slice())?;
        let inference_time_us = start.elapsed().as_micros() as u64;

        if !value.is_finite() {
            return Err(ModelError::NonFinite(value));
        }

        self.stats.predictions.fetch_add(1, Ordering::Relaxed);
        self.stats.latency_sum_us.fetch_add(inference_time_us, Ordering::Relaxed);

        log::debug!("Prediction {:.4} in {}us", value, inference_time_us);

        Ok(Prediction {
            value,
            rounded: round_to(value, PREDICTION_DECIMALS),
            inference_time_us,
            method: self.regressor.kind().to_string(),
        })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn status(&self) -> EngineStatus {
        let count = self.stats.predictions.load(Ordering::Relaxed);
        let sum = self.stats.latency_sum_us.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f64 / count as f64) / 1000.0 } else { 0.0 };

        EngineStatus {
            model_loaded: true,
            model_kind: self.metadata.model_kind.clone(),
            prediction_count: count,
            error_count: self.stats.errors.load(Ordering::Relaxed),
            avg_latency_ms: avg,
        }
    }
}

#[cfg(feature = "onnx")]
fn load_onnx(path: &Path) -> Result<Box<dyn Regressor>, ModelError> {
    Ok(Box::new(super::onnx::OnnxRegressor::load(path)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(path: &Path) -> Result<Box<dyn Regressor>, ModelError> {
    Err(ModelError::UnsupportedFormat(format!(
        "{} (built without the `onnx` feature)",
        path.display()
    )))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::LinearRegressor;
    use std::io::Write;

    fn linear_json() -> String {
        serde_json::json!({
            "kind": "linear",
            "feature_names": ["N", "P", "K", "temperature", "humidity", "ph", "rainfall", "soil_moisture", "water_level"],
            "coefficients": [0.01, 0.01, 0.01, 0.05, 0.02, 0.1, 0.005, 0.01, 0.01],
            "intercept": 0.25
        })
        .to_string()
    }

    fn write_artifact(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_and_predict() {
        let file = write_artifact(&linear_json(), ".json");
        let model = YieldModel::load(&ModelConfig {
            path: file.path().to_path_buf(),
            sha256: None,
        })
        .unwrap();

        assert_eq!(model.metadata().model_kind, "linear");
        assert_eq!(model.metadata().features, FEATURE_COUNT);
        assert!(model.metadata().sha256.is_some());

        let features = FeatureVector::from_values([100.0, 0.0, 0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0]);
        let prediction = model.predict(&features).unwrap();

        assert!((prediction.value - 2.25).abs() < 1e-9);
        assert_eq!(prediction.rounded, 2.25);
        assert_eq!(model.status().prediction_count, 1);
    }

    #[test]
    fn test_missing_file() {
        let result = YieldModel::load(&ModelConfig {
            path: PathBuf::from("/nonexistent/model.json"),
            sha256: None,
        });
        assert!(matches!(result, Err(ModelError::NotFound(_))));
    }

    #[test]
    fn test_checksum_mismatch() {
        let file = write_artifact(&linear_json(), ".json");
        let result = YieldModel::load(&ModelConfig {
            path: file.path().to_path_buf(),
            sha256: Some("00".repeat(32)),
        });
        assert!(matches!(result, Err(ModelError::ChecksumMismatch { .. })));
    }

    #[test]
    fn test_checksum_match() {
        let json = linear_json();
        let file = write_artifact(&json, ".json");
        let digest = sha256_hex(json.as_bytes());

        let model = YieldModel::load(&ModelConfig {
            path: file.path().to_path_buf(),
            sha256: Some(digest.clone()),
        })
        .unwrap();
        assert_eq!(model.metadata().sha256.as_deref(), Some(digest.as_str()));
    }

    #[test]
    fn test_wrong_width_rejected() {
        let result = YieldModel::from_regressor(Box::new(LinearRegressor::new(vec![1.0; 4], 0.0)), "mem");
        assert!(matches!(result, Err(ModelError::FeatureCount { .. })));
    }

    #[cfg(not(feature = "onnx"))]
    #[test]
    fn test_onnx_needs_feature() {
        let file = write_artifact("not really onnx", ".onnx");
        let result = YieldModel::load(&ModelConfig {
            path: file.path().to_path_buf(),
            sha256: None,
        });
        assert!(matches!(result, Err(ModelError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_non_finite_output_counts_as_error() {
        let model = YieldModel::from_regressor(
            Box::new(LinearRegressor::new(vec![f64::MAX; FEATURE_COUNT], 0.0)),
            "mem",
        )
        .unwrap();

        let features = FeatureVector::from_values([f64::MAX; FEATURE_COUNT]);
        assert!(matches!(model.predict(&features), Err(ModelError::NonFinite(_))));
        assert_eq!(model.status().error_count, 1);
    }

    #[test]
    fn test_huge_finite_output_stays_finite() {
        let model = YieldModel::from_regressor(
            Box::new(LinearRegressor::new(vec![0.0; FEATURE_COUNT], 1e307)),
            "mem",
        )
        .unwrap();

        let prediction = model.predict(&FeatureVector::from_values([1.0; FEATURE_COUNT])).unwrap();
        assert!(prediction.rounded.is_finite());
        assert_eq!(prediction.rounded, 1e307);
    }
}
