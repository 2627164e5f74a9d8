use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Data-quality problems never surface here: the extraction and aggregation
/// core is intentionally permissive and degrades to skip/zero semantics.
/// These variants cover the non-data failures — bad requests, chart backend
/// errors, and the deck-rendering collaborator.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Chart rendering error: {0}")]
    Chart(String),

    #[error("Deck service error: {0}")]
    Deck(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Chart(msg) => {
                tracing::error!("Chart error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CHART_ERROR",
                    "Chart rendering failed".to_string(),
                )
            }
            AppError::Deck(msg) => {
                tracing::error!("Deck service error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "DECK_SERVICE_ERROR",
                    "The deck rendering service failed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
