//! Prediction handler
//!
//! Accepts the nine fields either as an HTML form post (answers with the
//! re-rendered dashboard) or as a JSON object (answers with JSON).

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Serialize;

use cropyield_core::constants::{prediction_text, YIELD_UNIT};
use cropyield_core::logic::features::FieldValue;
use cropyield_core::{Prediction, PredictionInput};

use crate::page::render_dashboard;
use crate::{AppError, AppResult, AppState};

// ============================================================================
// REQUEST
// ============================================================================

/// Prediction fields, tagged with how they were submitted
#[derive(Debug)]
pub enum PredictRequest {
    Form(HashMap<String, FieldValue>),
    Json(HashMap<String, FieldValue>),
}

#[async_trait]
impl<S> FromRequest<S> for PredictRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(fields) = Json::<HashMap<String, FieldValue>>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return Ok(Self::Json(fields));
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            let fields = fields.into_iter().map(|(k, v)| (k, FieldValue::from(v))).collect();
            return Ok(Self::Form(fields));
        }

        Err(AppError::UnsupportedMediaType(format!(
            "unsupported content type `{}`",
            content_type
        )))
    }
}

// ============================================================================
// RESPONSE
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: f64,
    pub unit: &'static str,
    pub prediction_text: String,
}

impl From<&Prediction> for PredictResponse {
    fn from(p: &Prediction) -> Self {
        Self {
            prediction: p.rounded,
            unit: YIELD_UNIT,
            prediction_text: prediction_text(p.rounded),
        }
    }
}

// ============================================================================
// HANDLER
// ============================================================================

/// POST /predict
pub async fn predict(State(state): State<AppState>, request: PredictRequest) -> Response {
    match request {
        PredictRequest::Json(fields) => match run_prediction(&state, &fields) {
            Ok(prediction) => Json(PredictResponse::from(&prediction)).into_response(),
            Err(e) => e.into_response(),
        },
        PredictRequest::Form(fields) => {
            let text = match run_prediction(&state, &fields) {
                Ok(prediction) => prediction_text(prediction.rounded),
                Err(e) => {
                    tracing::debug!("Prediction rejected: {}", e);
                    e.message()
                }
            };

            // Fresh readings so the dashboard is not empty after a post
            let readings = state.sensors.current();
            render_dashboard(&readings, Some(&text)).into_response()
        }
    }
}

fn run_prediction(state: &AppState, fields: &HashMap<String, FieldValue>) -> AppResult<Prediction> {
    let input = PredictionInput::from_fields(fields)?;
    let features = input.feature_vector();
    tracing::debug!("Features: {}", features.to_log_entry());

    let prediction = state.model.predict(&features)?;

    tracing::info!(
        "Prediction {} {} ({}, {}us)",
        prediction.rounded,
        YIELD_UNIT,
        prediction.method,
        prediction.inference_time_us
    );

    Ok(prediction)
}
