//! Database diagnostic endpoints: `/api/db-test` and `/api/db-info`.
//!
//! These keep their own `{success, ...}` body shape rather than the v1
//! envelope. Every failure is answered with a 500 carrying `success: false`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::db::{DatabaseBackend, DatabaseInfo, DiagnosticsStore};
use crate::error::HearthError;

use super::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DbTestResponse {
    pub success: bool,
    pub message: String,
    pub data: DatabaseInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    pub version: String,
    pub database: String,
    pub user: String,
    pub connected_at: String,
}

impl From<DatabaseInfo> for ConnectionInfo {
    fn from(info: DatabaseInfo) -> Self {
        Self {
            version: info.version,
            database: info.database,
            user: info.user,
            connected_at: info.timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DbInfoResponse {
    pub success: bool,
    pub database_info: ConnectionInfo,
    pub tables: Vec<String>,
    pub table_count: usize,
}

#[derive(Debug, Serialize)]
pub struct DiagnosticError {
    pub success: bool,
    pub message: String,
    pub error: String,
}

impl DiagnosticError {
    fn new(message: &str, err: &HearthError) -> Self {
        tracing::error!(error = %err, "{message}");
        Self {
            success: false,
            message: message.to_string(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for DiagnosticError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

/// `GET /api/db-test`
pub async fn db_test(
    State(state): State<AppState>,
) -> Result<Json<DbTestResponse>, DiagnosticError> {
    state
        .db
        .ping()
        .await
        .map_err(|e| DiagnosticError::new("Database connection failed", &e))?;

    let info = state
        .db
        .database_info()
        .await
        .map_err(|e| DiagnosticError::new("Database test failed", &e))?;

    Ok(Json(DbTestResponse {
        success: true,
        message: "Database connected successfully".to_string(),
        data: info,
    }))
}

/// `GET /api/db-info`
pub async fn db_info(
    State(state): State<AppState>,
) -> Result<Json<DbInfoResponse>, DiagnosticError> {
    let (info, tables) = tokio::try_join!(state.db.database_info(), state.db.list_tables())
        .map_err(|e| DiagnosticError::new("Failed to get database info", &e))?;

    Ok(Json(DbInfoResponse {
        success: true,
        database_info: ConnectionInfo::from(info),
        table_count: tables.len(),
        tables,
    }))
}
