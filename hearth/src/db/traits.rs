use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

/// Identity of the connected database as reported by the diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseInfo {
    pub version: String,
    pub database: String,
    pub user: String,
    /// The database server's current time, RFC 3339 UTC.
    pub timestamp: String,
}

/// Connectivity and catalogue queries.
#[async_trait]
pub trait DiagnosticsStore: Send + Sync {
    async fn database_info(&self) -> Result<DatabaseInfo>;
    async fn list_tables(&self) -> Result<Vec<String>>;
}

/// Key-value metadata store (e.g. schema version).
#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn get_meta(&self, key: &str) -> Result<Option<String>>;
    async fn set_meta(&self, key: &str, value: &str) -> Result<()>;
}

/// A complete database backend that combines all store traits plus lifecycle
/// operations (initialization, sync).
#[async_trait]
pub trait DatabaseBackend: DiagnosticsStore + MetadataStore {
    /// Sync with remote (e.g. Turso replication). No-op for local-only backends.
    async fn sync(&self) -> Result<()>;

    /// Round-trip a trivial query.
    async fn ping(&self) -> Result<()>;
}
