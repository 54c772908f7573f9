//! Application error type mapping to HTTP status codes.
//!
//! Every error body has the shape `{"detail": "<human-readable message>"}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use followup_types::error::{ChatError, RepositoryError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Nothing stored under the requested key.
    NotFound(String),
    /// Request body failed validation.
    Validation(String),
    /// Persistence failure outside a chat turn.
    Storage(RepositoryError),
    /// Failure inside a chat turn.
    Chat(ChatError),
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Storage(e)
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Storage(e) | AppError::Chat(ChatError::Storage(e)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {e}"))
            }
            AppError::Chat(ChatError::ModelInvocation(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error processing chat: {e}"),
            ),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), %detail, "Request failed");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
