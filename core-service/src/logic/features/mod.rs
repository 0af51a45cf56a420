//! Features Module - Model input assembly
//!
//! Owns the feature order the model was trained on, request field parsing,
//! and the versioned vector handed to the model.

pub mod layout;
pub mod vector;
pub mod input;

// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, LayoutInfo, LayoutMismatchError};
pub use vector::{FeatureVector, FeatureVectorBuilder};
pub use input::{FieldValue, InputError, ManualInputs, PredictionInput};
