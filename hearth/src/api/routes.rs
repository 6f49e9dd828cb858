use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::diagnostics;
use super::v1;
use super::AppState;

/// Largest accepted request body. Notes are capped well below this.
const MAX_BODY_BYTES: usize = 256 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let v1 = v1::router::v1_router(state.clone());

    Router::new()
        .route("/api/db-test", get(diagnostics::db_test))
        .route("/api/db-info", get(diagnostics::db_info))
        .nest("/api/v1", v1)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
