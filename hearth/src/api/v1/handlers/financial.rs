//! v1 Billing handlers.

use axum::extract::State;
use axum_extra::extract::Query;

use crate::api::v1::dto::{FinancialQuery, FinancialRecordsResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ResponseMeta};
use crate::api::AppState;
use crate::services::parse_selectors;

/// `GET /api/v1/financial/records`
#[utoipa::path(
    get,
    path = "/api/v1/financial/records",
    tag = "financial",
    operation_id = "financial.records.list",
    params(FinancialQuery),
    responses(
        (status = 200, description = "Filtered records with their revenue summary", body = FinancialRecordsResponse),
        (status = 400, description = "Unknown status or period selector", body = ApiError),
    )
)]
pub async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<FinancialQuery>,
) -> ApiResponse<FinancialRecordsResponse> {
    let (status, period) =
        match parse_selectors(query.status.as_deref(), query.period.as_deref()) {
            Ok(selectors) => selectors,
            Err(e) => return e.into(),
        };

    match state.practice.financial_overview(status, period).await {
        Ok(overview) => {
            let meta = ResponseMeta::total(overview.records.len());
            ApiResponse::success_with_meta(FinancialRecordsResponse::from(&overview), meta)
        }
        Err(e) => e.into(),
    }
}
