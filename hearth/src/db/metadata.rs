use crate::error::Result;
use chrono::Utc;
use libsql::{params, Connection};

pub struct MetadataRepository;

impl MetadataRepository {
    pub async fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        let mut rows = conn
            .query("SELECT value FROM hearth_meta WHERE key = ?", params![key])
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(row.get::<String>(0)?))
        } else {
            Ok(None)
        }
    }

    pub async fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO hearth_meta (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )
        .await?;
        Ok(())
    }

    pub async fn get_schema_version(conn: &Connection) -> Result<Option<String>> {
        Self::get(conn, "schema_version").await
    }

    pub async fn set_schema_version(conn: &Connection, version: &str) -> Result<()> {
        Self::set(conn, "schema_version", version).await
    }
}
