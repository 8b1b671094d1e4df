use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::error;

/// HTTP-facing error wrapper around the service layer.
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
            ServiceError::Validation(fields) => {
                let body = serde_json::json!({
                    "error": "validation failed",
                    "fields": fields,
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            other => {
                error!(error = %other, "upstream request failed");
                let body = serde_json::json!({"error": other.to_string()});
                (StatusCode::BAD_GATEWAY, Json(body)).into_response()
            }
        }
    }
}
