//! Model info handler

use axum::{extract::State, Json};
use serde::Serialize;

use cropyield_core::logic::features::LayoutInfo;
use cropyield_core::logic::model::{EngineStatus, ModelMetadata};

use crate::AppState;

#[derive(Serialize)]
pub struct ModelInfoResponse {
    status: EngineStatus,
    metadata: ModelMetadata,
    layout: LayoutInfo,
}

pub async fn info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    Json(ModelInfoResponse {
        status: state.model.status(),
        metadata: state.model.metadata().clone(),
        layout: LayoutInfo::current(),
    })
}
