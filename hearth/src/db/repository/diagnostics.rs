use libsql::Connection;

use crate::error::{HearthError, Result};

/// Read-only queries behind the connectivity endpoints.
pub struct DiagnosticsRepository;

impl DiagnosticsRepository {
    /// Engine version and the database's own UTC clock.
    pub async fn server_info(conn: &Connection) -> Result<(String, String)> {
        let mut rows = conn
            .query(
                "SELECT sqlite_version(), strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                (),
            )
            .await?;

        let row = rows
            .next()
            .await?
            .ok_or_else(|| HearthError::Internal("Version query returned no rows".to_string()))?;
        Ok((row.get::<String>(0)?, row.get::<String>(1)?))
    }

    /// User tables by name, engine-internal tables excluded.
    pub async fn list_tables(conn: &Connection) -> Result<Vec<String>> {
        let mut rows = conn
            .query(
                "SELECT name FROM sqlite_master
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
                 ORDER BY name",
                (),
            )
            .await?;

        let mut tables = Vec::new();
        while let Some(row) = rows.next().await? {
            tables.push(row.get::<String>(0)?);
        }
        Ok(tables)
    }
}
