//! Crop Yield Core
//!
//! Everything behind the HTTP surface: the feature layout the model was
//! trained on, model loading and inference, and sensor acquisition.

pub mod constants;
pub mod logic;

pub use logic::features::{FeatureVector, InputError, PredictionInput};
pub use logic::model::{ModelConfig, ModelError, Prediction, YieldModel};
pub use logic::sensors::{SensorHub, SensorReadings, SensorSnapshot, SensorSource};
