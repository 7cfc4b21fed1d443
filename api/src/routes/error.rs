//! Mapping of service failures onto HTTP responses

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::tweets::StoreError;
use crate::services::error::EntityNotFoundError;
use crate::services::tweets::TweetsError;

/// Error returned by route handlers.
///
/// Renders as `{"statusCode", "message", "error"}`; storage failures are
/// logged and reported as a bare 500 without their details.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid request: {}", .0.join(", "))]
    Validation(Vec<String>),
    /// The body could not be extracted; keeps the extractor's status
    #[error("rejected request ({status}): {message}")]
    Rejection { status: StatusCode, message: String },
    #[error(transparent)]
    NotFound(#[from] EntityNotFoundError),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<TweetsError> for ApiError {
    fn from(e: TweetsError) -> Self {
        match e {
            TweetsError::NotFound(e) => ApiError::NotFound(e),
            TweetsError::Storage(e) => ApiError::Storage(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejection {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(messages) => (StatusCode::BAD_REQUEST, json!(messages)),
            ApiError::Rejection { status, message } => (*status, json!([message])),
            ApiError::NotFound(e) => {
                tracing::debug!(kind = e.kind, id = %e.id, "entity not found");
                (StatusCode::NOT_FOUND, json!(e.to_string()))
            }
            ApiError::Storage(e) => {
                tracing::error!(error = %e, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!("Internal server error"),
                )
            }
        };

        let body = json!({
            "statusCode": status.as_u16(),
            "message": message,
            "error": status.canonical_reason().unwrap_or("Error"),
        });
        (status, Json(body)).into_response()
    }
}
