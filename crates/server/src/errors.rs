use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use service::ServiceError;

/// HTTP mapping for service outcomes: validation errors become 400 with the
/// message in a JSON envelope, not-found becomes an empty 404, and anything
/// else (write conflicts, storage failures) surfaces as 500.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            ServiceError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
            e => {
                error!(error = %e, "unhandled service error");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
