//! ONNX Regressor - ONNX Runtime Integration
//!
//! Runs a regressor exported to ONNX (float input `[1, n_features]`, first
//! output read as the prediction).

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::inference::{ModelError, Regressor};
use crate::logic::features::FEATURE_COUNT;

pub struct OnnxRegressor {
    session: Mutex<Session>,
    output_name: String,
}

impl OnnxRegressor {
    /// Load ONNX model from file
    pub fn load(model_path: &Path) -> Result<Self, ModelError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        let session = Session::builder()
            .map_err(|e| ModelError::Runtime(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::Runtime(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| ModelError::Runtime(format!("Failed to load model: {}", e)))?;

        let output_name = session.outputs.first()
            .map(|o| o.name.clone())
            .ok_or_else(|| ModelError::Runtime("No output defined".to_string()))?;

        log::info!("ONNX model loaded successfully (output: {})", output_name);

        Ok(Self {
            session: Mutex::new(session),
            output_name,
        })
    }
}

impl Regressor for OnnxRegressor {
    fn kind(&self) -> &'static str {
        "onnx"
    }

    fn n_features(&self) -> usize {
        FEATURE_COUNT
    }

    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        let input: Vec<f32> = features.iter().map(|&x| x as f32).collect();

        let input_array = Array2::<f32>::from_shape_vec((1, features.len()), input)
            .map_err(|e| ModelError::Runtime(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ModelError::Runtime(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| ModelError::Runtime(format!("Inference failed: {}", e)))?;

        let output = outputs.get(&self.output_name)
            .ok_or_else(|| ModelError::Runtime("No output".to_string()))?;

        let (_, data) = output.try_extract_tensor::<f32>()
            .map_err(|e| ModelError::Runtime(format!("Extract error: {}", e)))?;

        data.first()
            .map(|&y| y as f64)
            .ok_or_else(|| ModelError::Runtime("Empty output tensor".to_string()))
    }
}
