use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::domain::error::DomainError;

/// REST-facing error wrapper; renders as `{"error": "..."}` with the status
/// for the domain error kind.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] DomainError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::UserNotFound { .. } | DomainError::ItemNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
            DomainError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Storage faults keep their detail in the logs, not the response.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "storage failure");
            return (status, Json(json!({ "error": "internal server error" }))).into_response();
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
