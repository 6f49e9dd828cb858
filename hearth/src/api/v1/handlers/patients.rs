//! v1 Patient handlers.

use axum::extract::{Path, State};
use axum_extra::extract::Query;

use crate::api::extractors::AppJson;
use crate::api::v1::dto::{
    CreateNoteRequest, CreateNoteResponse, PatientResponse, PatientSummaryResponse, PatientsQuery,
};
use crate::api::v1::response::{ApiError, ApiResponse, ResponseMeta};
use crate::api::AppState;

/// `GET /api/v1/patients`
#[utoipa::path(
    get,
    path = "/api/v1/patients",
    tag = "patients",
    operation_id = "patients.list",
    params(PatientsQuery),
    responses(
        (status = 200, description = "Patients whose name matches the search", body = Vec<PatientSummaryResponse>),
    )
)]
pub async fn list_patients(
    State(state): State<AppState>,
    Query(query): Query<PatientsQuery>,
) -> ApiResponse<Vec<PatientSummaryResponse>> {
    let term = query.search.unwrap_or_default();
    match state.practice.search_patients(&term).await {
        Ok(patients) => {
            let data: Vec<PatientSummaryResponse> =
                patients.iter().map(PatientSummaryResponse::from).collect();
            let meta = ResponseMeta::total(data.len());
            ApiResponse::success_with_meta(data, meta)
        }
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/patients/{patientId}`
#[utoipa::path(
    get,
    path = "/api/v1/patients/{patientId}",
    tag = "patients",
    operation_id = "patients.get",
    params(("patientId" = String, Path, description = "Patient ID")),
    responses(
        (status = 200, description = "Patient found", body = PatientResponse),
        (status = 404, description = "Patient not found", body = ApiError),
    )
)]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> ApiResponse<PatientResponse> {
    match state.practice.patient_detail(&patient_id).await {
        Ok(detail) => ApiResponse::success(PatientResponse::from(&detail)),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/patients/{patientId}/notes`
///
/// The note is dated today and placed first in the patient's notes.
#[utoipa::path(
    post,
    path = "/api/v1/patients/{patientId}/notes",
    tag = "patients",
    operation_id = "patients.notes.create",
    params(("patientId" = String, Path, description = "Patient ID")),
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note added", body = CreateNoteResponse),
        (status = 400, description = "Empty content or mood out of range", body = ApiError),
        (status = 404, description = "Patient not found", body = ApiError),
    )
)]
pub async fn create_note(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    AppJson(req): AppJson<CreateNoteRequest>,
) -> ApiResponse<CreateNoteResponse> {
    match state.practice.add_note(&patient_id, req.into()).await {
        Ok((patient, note)) => ApiResponse::created(CreateNoteResponse::new(&patient, &note)),
        Err(e) => e.into(),
    }
}
