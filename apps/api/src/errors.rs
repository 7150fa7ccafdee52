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
/// Every variant renders as `{"error": "<message>"}`. Server-side failures
/// expose their message to the caller as-is.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or unreadable input (400).
    #[error("{0}")]
    Validation(String),

    /// Lookup of a record that does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// A collaborator failed while analyzing the resume.
    #[error("{0}")]
    Analysis(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Analysis(_)
            | AppError::Database(_)
            | AppError::Serialization(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "Request failed: {:?}", self);
        } else {
            tracing::warn!(status = status.as_u16(), "Request rejected: {message}");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
