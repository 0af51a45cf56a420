//! Model Module - crop-yield regression
//!
//! Loads the exported estimator once and runs single-row predictions.
//! Backends: linear and tree-ensemble JSON exports, ONNX (feature `onnx`).

pub mod inference;
pub mod artifact;
pub mod linear;
pub mod forest;
#[cfg(feature = "onnx")]
pub mod onnx;

// Re-export common types
pub use inference::{
    EngineStatus, ModelConfig, ModelError, ModelMetadata, Prediction, Regressor, YieldModel,
};
pub use artifact::{ArtifactFormat, JsonArtifact, ModelParams};
pub use linear::LinearRegressor;
pub use forest::{ForestRegressor, RegressionTree};
#[cfg(feature = "onnx")]
pub use onnx::OnnxRegressor;
