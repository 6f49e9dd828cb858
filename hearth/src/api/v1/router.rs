use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;
use super::middleware::v1_auth_middleware;

pub fn v1_router(state: AppState) -> Router<AppState> {
    let patients = Router::new()
        .route("/", get(handlers::patients::list_patients))
        .route("/{patientId}", get(handlers::patients::get_patient))
        .route("/{patientId}/notes", post(handlers::patients::create_note));

    let appointments = Router::new()
        .route("/", get(handlers::appointments::list_appointments))
        .route(
            "/{appointmentId}",
            get(handlers::appointments::get_appointment),
        )
        .route(
            "/{appointmentId}/countdown",
            get(handlers::appointments::get_countdown),
        )
        .route(
            "/{appointmentId}/countdown:stream",
            get(handlers::appointments::stream_countdown),
        );

    let financial = Router::new().route("/records", get(handlers::financial::list_records));

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router());

    let protected_routes = Router::new()
        .nest("/patients", patients)
        .nest("/appointments", appointments)
        .nest("/financial", financial)
        .route_layer(middleware::from_fn_with_state(state, v1_auth_middleware));

    Router::new().merge(public_routes).merge(protected_routes)
}
