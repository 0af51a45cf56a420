//! Logic Module - Business Logic & Engines
//!
//! - `features/` - Feature layout, request parsing, model input vector
//! - `model/` - Regression inference (JSON exports, ONNX)
//! - `sensors/` - Sensor sources, shared state, background poller

pub mod features;
pub mod model;
pub mod sensors;
