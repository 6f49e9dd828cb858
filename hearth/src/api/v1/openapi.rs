use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hearth API",
        version = "1.0.0",
        description = "Self-hostable practice backend for therapists: patients, session notes, schedule and billing.",
    ),
    paths(
        handlers::health::health_check,
        handlers::patients::list_patients,
        handlers::patients::get_patient,
        handlers::patients::create_note,
        handlers::appointments::list_appointments,
        handlers::appointments::get_appointment,
        handlers::appointments::get_countdown,
        handlers::appointments::stream_countdown,
        handlers::financial::list_records,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        response::ResponseMeta,
        // Common
        dto::common::MoodPointResponse,
        dto::common::MoodTrendResponse,
        // Patients
        dto::patients::TagsInput,
        dto::patients::CreateNoteRequest,
        dto::patients::CreateNoteResponse,
        dto::patients::NoteResponse,
        dto::patients::MoodEntryResponse,
        dto::patients::ProgressEntryResponse,
        dto::patients::PatientSummaryResponse,
        dto::patients::PatientResponse,
        // Appointments
        dto::appointments::AppointmentResponse,
        dto::appointments::ScheduleResponse,
        dto::appointments::CountdownState,
        dto::appointments::CountdownResponse,
        dto::appointments::AppointmentFocusResponse,
        // Financial
        dto::financial::FinancialRecordResponse,
        dto::financial::RevenueSummaryResponse,
        dto::financial::FinancialRecordsResponse,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::DatabaseStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "patients", description = "Patient list, detail and session notes"),
        (name = "appointments", description = "Schedule, appointment focus and countdowns"),
        (name = "financial", description = "Billing records and revenue summary"),
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            utoipa::openapi::security::SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
