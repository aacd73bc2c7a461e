use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::domain::DomainError;

/// Error payload inside the `{"success": false, "error": ...}` envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl DomainError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
            DomainError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            DomainError::MissingCredential(_) => {
                (StatusCode::PRECONDITION_FAILED, "MISSING_CREDENTIAL")
            }
            DomainError::Busy(_) => (StatusCode::CONFLICT, "SESSION_BUSY"),
            DomainError::Completion(_) => (StatusCode::BAD_GATEWAY, "COMPLETION_FAILED"),
            DomainError::Serialization(_) | DomainError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = serde_json::json!({
            "success": false,
            "error": ApiError {
                code: code.to_string(),
                message: self.to_string(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}
