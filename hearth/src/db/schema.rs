use libsql::Connection;

use super::MetadataRepository;
use crate::error::Result;

pub const SCHEMA_VERSION: &str = "1";

/// Bootstrap tables. Practice data itself lives in memory.
pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS hearth_meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .await?;

    if MetadataRepository::get_schema_version(conn).await?.is_none() {
        MetadataRepository::set_schema_version(conn, SCHEMA_VERSION).await?;
        tracing::info!(version = SCHEMA_VERSION, "Initialized hearth schema");
    }

    Ok(())
}
