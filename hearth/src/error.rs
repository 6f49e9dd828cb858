use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::v1::response::ApiResponse;

#[derive(Error, Debug)]
pub enum HearthError {
    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for HearthError {
    fn from(errors: validator::ValidationErrors) -> Self {
        HearthError::Validation(errors.to_string())
    }
}

/// Errors leaving a handler directly use the v1 envelope, so extractor
/// rejections and handler failures look the same on the wire.
impl IntoResponse for HearthError {
    fn into_response(self) -> Response {
        ApiResponse::<()>::from(self).into_response()
    }
}

pub type Result<T> = std::result::Result<T, HearthError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_error_response_uses_envelope() {
        let response = HearthError::NotFound("Patient p404 not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "not_found");
        assert_eq!(json["error"]["message"], "Patient p404 not found");
    }

    #[test]
    fn test_validation_errors_convert() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(range(min = 1, max = 10))]
            mood: i64,
        }

        let err: HearthError = Probe { mood: 42 }.validate().unwrap_err().into();
        assert!(matches!(err, HearthError::Validation(msg) if msg.contains("mood")));
    }
}
