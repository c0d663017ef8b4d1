use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    /// Extraction produced no text at all; no partial profile is ever built.
    #[error("Could not extract any text from the document")]
    UnreadableDocument,

    /// Rejected before any parsing is attempted.
    #[error("Document is {0} bytes, above the accepted ceiling")]
    DocumentTooLarge(usize),

    #[error("Unsupported media type")]
    UnsupportedMediaType,

    /// Ranking was requested with an absent or all-zero query embedding.
    #[error("No query embedding available")]
    MissingQueryVector,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Access denied".to_string(),
            ),
            AppError::UnreadableDocument => (
                StatusCode::BAD_REQUEST,
                "UNREADABLE_DOCUMENT",
                "Could not extract any text from the uploaded PDF".to_string(),
            ),
            AppError::DocumentTooLarge(size) => (
                StatusCode::BAD_REQUEST,
                "DOCUMENT_TOO_LARGE",
                format!(
                    "File too large. Maximum size is 2MB, received {:.2}MB",
                    *size as f64 / 1024.0 / 1024.0
                ),
            ),
            AppError::UnsupportedMediaType => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_MEDIA_TYPE",
                "Only PDF files are accepted".to_string(),
            ),
            AppError::MissingQueryVector => (
                StatusCode::BAD_REQUEST,
                "MISSING_QUERY_VECTOR",
                "No profile embedding available. Upload a CV first so we can match you".to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Embedding(msg) => {
                tracing::error!("Embedding error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EMBEDDING_ERROR",
                    "An embedding error occurred".to_string(),
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
