//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// Each variant maps onto one HTTP status via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// The path identifier is not a well-formed integer
    #[error("Invalid book id: {0}")]
    InvalidId(String),

    /// No book matches the requested identifier; 404 for both update and delete
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// Reading or writing the database file failed
    #[error("Persistence error: {0}")]
    Store(#[from] crate::state::StoreError),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AppError::BookNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
