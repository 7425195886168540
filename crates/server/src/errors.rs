use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::warn;

/// Handler-level error: an HTTP status plus a one-line message, rendered
/// as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::AlreadyExists(_) => StatusCode::CONFLICT,
            // Upstream failures reject the request the same way a missing
            // reference does (fail closed).
            ServiceError::NotFound(_) | ServiceError::Upstream(_) => StatusCode::NOT_FOUND,
            ServiceError::Model(_) => StatusCode::BAD_REQUEST,
            ServiceError::Cache(_) => {
                warn!(error = %e, "cache operation failed");
                StatusCode::BAD_REQUEST
            }
        };
        Self::new(status, e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}
