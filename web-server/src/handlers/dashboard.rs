//! Dashboard handler

use axum::{extract::State, response::Html};

use crate::page::render_dashboard;
use crate::AppState;

/// Serve the dashboard with one fresh set of readings
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let readings = state.sensors.current();
    render_dashboard(&readings, None)
}
