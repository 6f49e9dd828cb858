use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::db::DatabaseBackend;
use crate::services::{Clock, PracticeService};
use crate::store::PracticeStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// libSQL backend behind the diagnostics and health endpoints.
    pub db: Arc<dyn DatabaseBackend>,
    pub practice: PracticeService,
    /// Cancelled when the server shuts down; long-lived responses end on it.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(
        config: Config,
        db: Arc<dyn DatabaseBackend>,
        store: Arc<dyn PracticeStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let config = Arc::new(config);
        let practice = PracticeService::new(store, clock, config.practice.clone());

        Self {
            config,
            db,
            practice,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }
}

/// Router state over the embedded seed, a scratch database file and a clock
/// pinned to 2025-06-30T08:00:00Z.
#[cfg(test)]
pub(crate) async fn test_state(api_keys: Vec<String>) -> AppState {
    use crate::config::{DatabaseConfig, PracticeConfig, ServerConfig};
    use crate::db::{Database, LibSqlBackend};
    use crate::models::parse_timestamp;
    use crate::services::FixedClock;
    use crate::store::{InMemoryStore, SeedDataset};

    // every connection to a libsql `:memory:` database is a fresh one
    let db_path = tempfile::Builder::new()
        .prefix("hearth-test-")
        .suffix(".db")
        .tempfile()
        .unwrap()
        .into_temp_path()
        .keep()
        .unwrap();

    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_keys,
        },
        database: DatabaseConfig {
            url: format!("file:{}", db_path.display()),
            ..DatabaseConfig::default()
        },
        practice: PracticeConfig::default(),
    };

    let raw_db = Database::new(&config.database).await.unwrap();
    let db: Arc<dyn DatabaseBackend> = Arc::new(LibSqlBackend::new(raw_db));
    let store: Arc<dyn PracticeStore> =
        Arc::new(InMemoryStore::new(SeedDataset::embedded().unwrap()));
    let clock = Arc::new(FixedClock::new(
        parse_timestamp("2025-06-30T08:00:00Z").unwrap(),
    ));

    AppState::new(config, db, store, clock)
}
