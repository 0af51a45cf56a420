//! HTTP handlers

pub mod health;
pub mod dashboard;
pub mod sensors;
pub mod predict;
pub mod model;
