//! Sensor handlers

use axum::{extract::State, Json};

use cropyield_core::{SensorReadings, SensorSnapshot};

use crate::AppState;

/// Latest readings; always the same four keys, zeroed before the first reading
pub async fn readings(State(state): State<AppState>) -> Json<SensorReadings> {
    Json(state.sensors.current())
}

/// Readings plus source bookkeeping (last update, packet counters)
pub async fn status(State(state): State<AppState>) -> Json<SensorSnapshot> {
    Json(state.sensors.snapshot())
}
