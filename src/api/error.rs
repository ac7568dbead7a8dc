//! API error types with structured JSON responses.
//!
//! Every failure path returns a `{message, error: true}` body; internal
//! details are logged, never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::ai::AiError;
use crate::db::DatabaseError;
use crate::models::GeoError;
use crate::storage::StorageError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub error: bool,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unauthorized user")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized user".to_string()),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail.clone()),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail.clone()),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            message,
            error: true,
        };
        (status, Json(body)).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity_type, id } => {
                ApiError::NotFound(format!("{entity_type} {id} not found"))
            }
            DatabaseError::InvalidEnum { field, value } => {
                ApiError::BadRequest(format!("Invalid {field}: {value}"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<GeoError> for ApiError {
    fn from(err: GeoError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

// External-service failures are reported as client errors with the
// service-provided message when one exists; transport-level failures
// stay internal.
impl From<AiError> for ApiError {
    fn from(err: AiError) -> Self {
        let rendered = err.to_string();
        match err {
            AiError::Declared(message) => ApiError::BadRequest(message),
            AiError::Timeout(_)
            | AiError::EmptyResponse
            | AiError::JsonParsing(_)
            | AiError::SchemaMismatch(_) => ApiError::BadRequest(rendered),
            AiError::Connection(_) | AiError::Upstream { .. } | AiError::Http(_) => {
                ApiError::Internal(rendered)
            }
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Upstream { .. } => {
                ApiError::BadRequest("Failed to upload the image to storage".into())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn unauthorized_returns_401() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], true);
        assert_eq!(json["message"], "Unauthorized user");
    }

    #[tokio::test]
    async fn bad_request_carries_message() {
        let response = ApiError::BadRequest("Missing required fields".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Missing required fields");
    }

    #[tokio::test]
    async fn not_found_returns_404() {
        let response = ApiError::NotFound("Event not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let response = ApiError::Internal("db exploded".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "An unexpected error occurred");
    }

    #[test]
    fn declared_ai_error_maps_to_bad_request_with_message() {
        let api: ApiError = AiError::Declared("Not a prescription image".into()).into();
        assert!(matches!(&api, ApiError::BadRequest(m) if m == "Not a prescription image"));
    }

    #[test]
    fn ai_transport_errors_stay_internal() {
        let api: ApiError = AiError::Connection("http://ai.test".into()).into();
        assert!(matches!(api, ApiError::Internal(_)));
    }

    #[test]
    fn geo_error_maps_to_bad_request() {
        let api: ApiError = GeoError::WrongArity(1).into();
        assert!(matches!(api, ApiError::BadRequest(_)));
    }
}
