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
/// Persistence failures never appear here: saving the document is best-effort
/// and handled (logged and swallowed) inside the store.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown document field path: {0}")]
    InvalidPath(String),

    #[error("Index {index} out of range for {list} (len {len})")]
    IndexOutOfRange {
        list: String,
        index: usize,
        len: usize,
    },

    #[error("An export is already in progress")]
    ExportInProgress,

    #[error("Export target region not found: {0}")]
    RegionNotFound(String),

    #[error("Rasterization failed: {0}")]
    Render(String),

    #[error("Page composition failed: {0}")]
    Composition(String),

    #[error("AI request failed: {0}")]
    AiRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidPath(path) => (
                StatusCode::BAD_REQUEST,
                "INVALID_PATH",
                format!("'{path}' does not address an editable field"),
            ),
            AppError::IndexOutOfRange { list, index, len } => (
                StatusCode::BAD_REQUEST,
                "INDEX_OUT_OF_RANGE",
                format!("index {index} is out of range for {list} with {len} entries"),
            ),
            AppError::ExportInProgress => (
                StatusCode::CONFLICT,
                "EXPORT_IN_PROGRESS",
                "An export is already running. Wait for it to finish and try again.".to_string(),
            ),
            AppError::RegionNotFound(msg) => {
                tracing::error!("Export region not found: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "REGION_NOT_FOUND",
                    "The resume preview could not be located for export.".to_string(),
                )
            }
            AppError::Render(msg) => {
                tracing::error!("Rasterization error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    format!("The resume could not be rasterized: {msg}"),
                )
            }
            AppError::Composition(msg) => {
                tracing::error!("Composition error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "COMPOSITION_ERROR",
                    format!("The PDF page could not be assembled: {msg}"),
                )
            }
            AppError::AiRequest(msg) => {
                tracing::error!("AI request error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "AI_REQUEST_ERROR",
                    "The AI assistant request failed. You can resubmit manually.".to_string(),
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
