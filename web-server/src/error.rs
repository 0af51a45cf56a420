//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use cropyield_core::constants::{GENERIC_ERROR_PREFIX, INVALID_NUMBER_MESSAGE};
use cropyield_core::{InputError, ModelError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Prediction input errors
    InvalidNumber,
    BadRequest(String),

    // Request body could not be decoded
    UnsupportedMediaType(String),

    // Model errors
    Prediction(String),

    // Generic errors
    InternalError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidNumber | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Prediction(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the user, on the page or in the JSON body
    pub fn message(&self) -> String {
        match self {
            AppError::InvalidNumber => INVALID_NUMBER_MESSAGE.to_string(),
            AppError::BadRequest(msg)
            | AppError::UnsupportedMediaType(msg)
            | AppError::Prediction(msg) => format!("{}{}", GENERIC_ERROR_PREFIX, msg),
            AppError::InternalError(_) => format!("{}internal server error", GENERIC_ERROR_PREFIX),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Prediction(msg) => tracing::error!("Prediction error: {}", msg),
            AppError::InternalError(msg) => tracing::error!("Internal error: {}", msg),
            _ => tracing::debug!("Rejected request: {}", self.message()),
        }

        let body = Json(json!({
            "error": self.message(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<InputError> for AppError {
    fn from(err: InputError) -> Self {
        match err {
            InputError::InvalidNumber { .. } => AppError::InvalidNumber,
            InputError::MissingField { .. } => AppError::BadRequest(err.to_string()),
        }
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::Prediction(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_number_message_is_fixed() {
        let err = AppError::from(InputError::InvalidNumber { field: "ph" });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Error: Please ensure all fields contain valid numbers.");
    }

    #[test]
    fn test_missing_field_is_generic() {
        let err = AppError::from(InputError::MissingField { field: "N" });
        assert_eq!(err.message(), "An error occurred: missing field `N`");
    }

    #[test]
    fn test_model_error_is_server_error() {
        let err = AppError::from(ModelError::NonFinite(f64::INFINITY));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().starts_with("An error occurred: "));
    }
}
