use crate::db::connection::Database;
use crate::db::repository::DiagnosticsRepository;
use crate::db::traits::{DatabaseBackend, DatabaseInfo, DiagnosticsStore, MetadataStore};
use crate::db::MetadataRepository;
use crate::error::{HearthError, Result};
use async_trait::async_trait;

pub struct LibSqlBackend {
    db: Database,
}

impl LibSqlBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Connection failures surface as the database being unreachable.
    fn connect(&self) -> Result<::libsql::Connection> {
        self.db.connect().map_err(|e| {
            HearthError::UpstreamUnavailable(format!("Cannot connect to {}: {e}", self.db.name()))
        })
    }
}

#[async_trait]
impl DiagnosticsStore for LibSqlBackend {
    async fn database_info(&self) -> Result<DatabaseInfo> {
        let conn = self.connect()?;
        let (version, timestamp) = DiagnosticsRepository::server_info(&conn).await?;
        Ok(DatabaseInfo {
            version,
            database: self.db.name().to_string(),
            user: self.db.user().to_string(),
            timestamp,
        })
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        let conn = self.connect()?;
        DiagnosticsRepository::list_tables(&conn).await
    }
}

#[async_trait]
impl MetadataStore for LibSqlBackend {
    async fn get_meta(&self, key: &str) -> Result<Option<String>> {
        let conn = self.connect()?;
        MetadataRepository::get(&conn, key).await
    }

    async fn set_meta(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.connect()?;
        MetadataRepository::set(&conn, key, value).await
    }
}

#[async_trait]
impl DatabaseBackend for LibSqlBackend {
    async fn sync(&self) -> Result<()> {
        self.db.sync().await
    }

    async fn ping(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.query("SELECT 1", ())
            .await
            .map_err(|e| HearthError::UpstreamUnavailable(e.to_string()))?;
        Ok(())
    }
}
