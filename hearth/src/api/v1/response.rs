//! # V1 API Response Envelope & Error Contract
//!
//! Every v1 endpoint returns an [`ApiResponse<T>`] envelope:
//!
//! ```json
//! {
//!   "data": { ... },                                  // present on success
//!   "meta": { "total": 3 },                           // optional, list endpoints
//!   "error": { "code": "not_found", "message": "..." } // present on error
//! }
//! ```
//!
//! ## ID Formats
//!
//! - **patientId**, **appointmentId**: identifiers from the practice dataset
//!   (e.g. `"p001"`, `"a002"`)
//! - **noteId**: `n` followed by a 12 character nanoid for notes created
//!   through the API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::HearthError;

/// Machine-readable error code included in every error response.
///
/// Serialized as a snake_case string on the wire (e.g. `"invalid_request"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed body, unknown selector or failed validation. HTTP 400.
    InvalidRequest,
    /// Missing or unknown API key. HTTP 401.
    Unauthorized,
    /// The patient or appointment does not exist. HTTP 404.
    NotFound,
    /// Unexpected server-side failure; details are only logged. HTTP 500.
    InternalError,
    /// A backing service (the database) cannot be reached. HTTP 503.
    Unavailable,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::NotFound => write!(f, "not_found"),
            Self::InternalError => write!(f, "internal_error"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Structured error payload within the API envelope.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    pub code: ErrorCode,
    /// Human-readable description. Internal details are never included.
    pub message: String,
}

/// Metadata attached to list responses.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// Number of items in `data` after filtering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl ResponseMeta {
    pub fn total(count: usize) -> Self {
        Self {
            total: Some(count as u64),
        }
    }
}

/// Canonical v1 API response envelope.
///
/// On success `data` is present and `error` absent; on error the reverse.
/// The HTTP status comes from the error code, or from the constructor used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            meta: None,
            error: None,
            status: StatusCode::OK,
        }
    }

    pub fn success_with_meta(data: T, meta: ResponseMeta) -> Self {
        Self {
            data: Some(data),
            meta: Some(meta),
            error: None,
            status: StatusCode::OK,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            data: Some(data),
            meta: None,
            error: None,
            status: StatusCode::CREATED,
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        let status = code.status();
        Self {
            data: None,
            meta: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
            status,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        match serde_json::to_value(&self) {
            Ok(body) => (status, Json(body)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize v1 response");
                let body = serde_json::json!({
                    "error": {
                        "code": "internal_error",
                        "message": "An internal error occurred"
                    }
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<HearthError> for ApiResponse<T> {
    /// Internal error details are never sent to the client; they are logged
    /// and replaced by a generic message.
    fn from(err: HearthError) -> Self {
        match err {
            HearthError::NotFound(ref msg) => ApiResponse::error(ErrorCode::NotFound, msg.clone()),

            HearthError::Validation(ref msg) => {
                ApiResponse::error(ErrorCode::InvalidRequest, msg.clone())
            }

            HearthError::Json(ref e) => {
                ApiResponse::error(ErrorCode::InvalidRequest, format!("Invalid JSON: {e}"))
            }

            HearthError::UpstreamUnavailable(ref msg) => {
                tracing::warn!(error = %msg, "Upstream unavailable");
                ApiResponse::error(ErrorCode::Unavailable, "Database is unavailable")
            }

            ref internal @ (HearthError::Database(_)
            | HearthError::Io(_)
            | HearthError::Internal(_)) => {
                tracing::error!(error = %internal, "Internal error mapped to v1 response");
                ApiResponse::error(ErrorCode::InternalError, "An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_response_serializes_without_error() {
        let resp = ApiResponse::success("hello");
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["data"], "hello");
        assert!(json.get("error").is_none());
        assert!(json.get("meta").is_none());
    }

    #[test]
    fn error_response_serializes_without_data() {
        let resp = ApiResponse::<()>::error(ErrorCode::NotFound, "gone");
        let json = serde_json::to_value(&resp).expect("serialize");
        assert!(json.get("data").is_none());
        assert_eq!(json["error"]["code"], "not_found");
        assert_eq!(json["error"]["message"], "gone");
    }

    #[test]
    fn list_meta_carries_total() {
        let resp = ApiResponse::success_with_meta(vec![1, 2, 3], ResponseMeta::total(3));
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["meta"]["total"], 3);
    }

    #[test]
    fn error_code_status_mapping() {
        assert_eq!(ErrorCode::InvalidRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::InternalError.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::Unavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn error_code_wire_names() {
        for code in [
            ErrorCode::InvalidRequest,
            ErrorCode::Unauthorized,
            ErrorCode::NotFound,
            ErrorCode::InternalError,
            ErrorCode::Unavailable,
        ] {
            let json = serde_json::to_value(&code).expect("serialize");
            assert_eq!(json, code.to_string());
        }
    }

    #[test]
    fn created_response_has_201_status() {
        let resp = ApiResponse::created("note");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[test]
    fn hearth_error_mapping() {
        let resp: ApiResponse<()> = HearthError::NotFound("Patient p9 not found".into()).into();
        assert_eq!(resp.error.as_ref().unwrap().code, ErrorCode::NotFound);

        let resp: ApiResponse<()> = HearthError::Validation("bad mood".into()).into();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp: ApiResponse<()> = HearthError::UpstreamUnavailable("refused".into()).into();
        assert_eq!(resp.error.as_ref().unwrap().code, ErrorCode::Unavailable);
    }

    #[test]
    fn internal_error_does_not_leak() {
        let resp: ApiResponse<()> = HearthError::Internal("secret debug info".into()).into();
        let err = resp.error.as_ref().unwrap();
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.message, "An internal error occurred");
    }
}
