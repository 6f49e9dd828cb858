//! Bearer token authentication for the v1 practice routes.
//!
//! Tokens are checked against `HEARTH_API_KEYS`. Failures come back in the
//! v1 `ApiResponse` envelope so clients see one error contract.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;

use super::response::{ApiResponse, ErrorCode};

/// Enforce `Authorization: Bearer <key>` on the wrapped routes.
///
/// With no keys configured every request is refused, so the server still
/// starts but patient data stays locked.
pub async fn v1_auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if state.config.server.api_keys.is_empty() {
        return ApiResponse::<()>::error(
            ErrorCode::Unauthorized,
            "API keys not configured. Set HEARTH_API_KEYS to enable access.",
        )
        .into_response();
    }

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(h) => match h.strip_prefix("Bearer ") {
            Some(token) => token.trim(),
            None => {
                return ApiResponse::<()>::error(
                    ErrorCode::Unauthorized,
                    "Invalid authorization header format. Expected: Bearer <token>",
                )
                .into_response();
            }
        },
        None => {
            return ApiResponse::<()>::error(
                ErrorCode::Unauthorized,
                "Missing authorization header",
            )
            .into_response();
        }
    };

    if state.config.server.api_keys.iter().any(|key| key == token) {
        next.run(request).await
    } else {
        tracing::debug!(path = %request.uri().path(), "Rejected request with unknown API key");
        ApiResponse::<()>::error(ErrorCode::Unauthorized, "Invalid API key").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::test_state;
    use axum::http::StatusCode;
    use axum::{middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn build_test_app(api_keys: Vec<String>) -> Router {
        let state = test_state(api_keys).await;

        async fn protected_handler() -> &'static str {
            "protected"
        }

        async fn health_handler() -> &'static str {
            "healthy"
        }

        let public_routes = Router::new().route("/health", get(health_handler));

        let protected_routes = Router::new()
            .route("/protected", get(protected_handler))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                v1_auth_middleware,
            ));

        Router::new()
            .merge(public_routes)
            .merge(protected_routes)
            .with_state(state)
    }

    async fn parse_error_body(response: Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        (status, json)
    }

    fn get_protected(auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/protected");
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_rejects_when_no_keys_configured() {
        let app = build_test_app(vec![]).await;
        let response = app.oneshot(get_protected(Some("Bearer x"))).await.unwrap();

        let (status, json) = parse_error_body(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"]["code"], "unauthorized");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("HEARTH_API_KEYS"));
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn test_allows_valid_key() {
        let app = build_test_app(vec!["k1".to_string(), "k2".to_string()]).await;
        let response = app.oneshot(get_protected(Some("Bearer k2"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_invalid_key() {
        let app = build_test_app(vec!["k1".to_string()]).await;
        let response = app
            .oneshot(get_protected(Some("Bearer wrong")))
            .await
            .unwrap();

        let (status, json) = parse_error_body(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"]["message"], "Invalid API key");
    }

    #[tokio::test]
    async fn test_rejects_missing_or_malformed_header() {
        let app = build_test_app(vec!["k1".to_string()]).await;
        let response = app.clone().oneshot(get_protected(None)).await.unwrap();
        let (status, json) = parse_error_body(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"]["message"], "Missing authorization header");

        let response = app.oneshot(get_protected(Some("Basic k1"))).await.unwrap();
        let (status, json) = parse_error_body(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Bearer <token>"));
    }

    #[tokio::test]
    async fn test_public_route_bypasses_auth() {
        let app = build_test_app(vec![]).await;
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
