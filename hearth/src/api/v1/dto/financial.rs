//! Billing DTOs for the v1 API.

use serde::{Deserialize, Serialize};

use super::common::format_date;
use crate::analytics::RevenueSummary;
use crate::models::FinancialRecord;
use crate::services::FinancialOverview;

/// Query parameters for `GET /v1/financial/records`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FinancialQuery {
    /// `all` (default), `paid`, `pending` or `overdue`.
    pub status: Option<String>,
    /// `all` (default), `week`, `month` or `quarter`, counted back from now.
    pub period: Option<String>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecordResponse {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub date: String,
    pub amount: f64,
    /// `session`, `consultation` or `assessment`.
    #[serde(rename = "type")]
    pub billing_type: String,
    /// `paid`, `pending` or `overdue`.
    pub status: String,
    pub session_type: String,
}

impl From<&FinancialRecord> for FinancialRecordResponse {
    fn from(record: &FinancialRecord) -> Self {
        Self {
            id: record.id.clone(),
            patient_id: record.patient_id.clone(),
            patient_name: record.patient_name.clone(),
            date: format_date(record.date),
            amount: record.amount,
            billing_type: record.billing_type.to_string(),
            status: record.status.to_string(),
            session_type: record.session_type.to_string(),
        }
    }
}

/// Totals over the filtered records. Percentages are 0 when the total is 0.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummaryResponse {
    pub total: f64,
    pub paid: f64,
    pub pending: f64,
    pub overdue: f64,
    pub record_count: usize,
    pub paid_count: usize,
    pub pending_count: usize,
    pub overdue_count: usize,
    pub paid_percentage: f64,
    pub pending_percentage: f64,
    pub overdue_percentage: f64,
}

impl From<&RevenueSummary> for RevenueSummaryResponse {
    fn from(summary: &RevenueSummary) -> Self {
        Self {
            total: summary.total,
            paid: summary.paid,
            pending: summary.pending,
            overdue: summary.overdue,
            record_count: summary.record_count,
            paid_count: summary.paid_count,
            pending_count: summary.pending_count,
            overdue_count: summary.overdue_count,
            paid_percentage: summary.paid_percentage(),
            pending_percentage: summary.pending_percentage(),
            overdue_percentage: summary.overdue_percentage(),
        }
    }
}

/// Response for `GET /v1/financial/records`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecordsResponse {
    /// The status selector that was applied.
    pub status: String,
    /// The period selector that was applied.
    pub period: String,
    pub records: Vec<FinancialRecordResponse>,
    pub summary: RevenueSummaryResponse,
}

impl From<&FinancialOverview> for FinancialRecordsResponse {
    fn from(overview: &FinancialOverview) -> Self {
        Self {
            status: overview.status.to_string(),
            period: overview.period.to_string(),
            records: overview
                .records
                .iter()
                .map(FinancialRecordResponse::from)
                .collect(),
            summary: RevenueSummaryResponse::from(&overview.summary),
        }
    }
}
