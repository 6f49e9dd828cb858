// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Once};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::Router;
use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;
use tokio_util::sync::CancellationToken;

use hearth::api::{create_router, AppState};
use hearth::config::{Config, DatabaseConfig, PracticeConfig, ServerConfig};
use hearth::db::{
    Database, DatabaseBackend, DatabaseInfo, DiagnosticsStore, LibSqlBackend, MetadataStore,
};
use hearth::error::{HearthError, Result};
use hearth::models::parse_timestamp;
use hearth::services::{Clock, FixedClock};
use hearth::store::{InMemoryStore, PracticeStore, SeedDataset};

static INIT: Once = Once::new();

pub const API_KEY: &str = "integration-key";

/// The clock every test app starts at: one hour before the first session.
pub const TEST_NOW: &str = "2025-06-30T08:00:00Z";

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

pub struct TestApp {
    pub router: Router,
    pub clock: Arc<FixedClock>,
    /// Stands in for the server's cancellation token.
    pub shutdown: CancellationToken,
    // keeps the database file alive for the test's duration
    _db_file: Option<NamedTempFile>,
}

fn test_config(database: DatabaseConfig) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            api_keys: vec![API_KEY.to_string()],
        },
        database,
        practice: PracticeConfig::default(),
    }
}

fn router_with(
    db: Arc<dyn DatabaseBackend>,
    database: DatabaseConfig,
    clock: Arc<dyn Clock>,
    shutdown: CancellationToken,
) -> Router {
    let store: Arc<dyn PracticeStore> =
        Arc::new(InMemoryStore::new(SeedDataset::embedded().unwrap()));
    let state =
        AppState::new(test_config(database), db, store, clock).with_shutdown(shutdown);
    create_router(state)
}

fn test_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(parse_timestamp(TEST_NOW).unwrap()))
}

async fn libsql_backend() -> (Arc<dyn DatabaseBackend>, DatabaseConfig, NamedTempFile) {
    let db_file = NamedTempFile::new().unwrap();
    let database = DatabaseConfig {
        url: format!("file:{}", db_file.path().display()),
        ..DatabaseConfig::default()
    };
    let raw_db = Database::new(&database).await.unwrap();
    (Arc::new(LibSqlBackend::new(raw_db)), database, db_file)
}

/// Router over the embedded seed and a fresh on-disk libSQL database.
pub async fn spawn_app() -> TestApp {
    init_test_logger();

    let (db, database, db_file) = libsql_backend().await;
    let clock = test_clock();
    let shutdown = CancellationToken::new();
    let router = router_with(db, database, clock.clone(), shutdown.clone());
    TestApp {
        router,
        clock,
        shutdown,
        _db_file: Some(db_file),
    }
}

/// Like [`spawn_app`], reading time from `clock` instead of the pinned one.
/// The returned file must outlive the router.
pub async fn spawn_app_with_clock(clock: Arc<dyn Clock>) -> (Router, NamedTempFile) {
    init_test_logger();

    let (db, database, db_file) = libsql_backend().await;
    let router = router_with(db, database, clock, CancellationToken::new());
    (router, db_file)
}

/// Router whose database refuses every call.
pub fn spawn_app_with_broken_db() -> TestApp {
    init_test_logger();

    let clock = test_clock();
    let shutdown = CancellationToken::new();
    let router = router_with(
        Arc::new(UnreachableBackend),
        DatabaseConfig::default(),
        clock.clone(),
        shutdown.clone(),
    );
    TestApp {
        router,
        clock,
        shutdown,
        _db_file: None,
    }
}

/// Wall clock that advances with Tokio's (pausable) clock.
pub struct TokioClock {
    origin: DateTime<Utc>,
    started: tokio::time::Instant,
}

impl TokioClock {
    pub fn new(origin: DateTime<Utc>) -> Self {
        Self {
            origin,
            started: tokio::time::Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = self.started.elapsed();
        self.origin + chrono::Duration::milliseconds(elapsed.as_millis() as i64)
    }
}

/// Stands in for a database server that cannot be reached.
pub struct UnreachableBackend;

fn refused() -> HearthError {
    HearthError::UpstreamUnavailable("connection refused".to_string())
}

#[async_trait]
impl DiagnosticsStore for UnreachableBackend {
    async fn database_info(&self) -> Result<DatabaseInfo> {
        Err(refused())
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        Err(refused())
    }

}

#[async_trait]
impl MetadataStore for UnreachableBackend {
    async fn get_meta(&self, _key: &str) -> Result<Option<String>> {
        Err(refused())
    }

    async fn set_meta(&self, _key: &str, _value: &str) -> Result<()> {
        Err(refused())
    }
}

#[async_trait]
impl DatabaseBackend for UnreachableBackend {
    async fn sync(&self) -> Result<()> {
        Err(refused())
    }

    async fn ping(&self) -> Result<()> {
        Err(refused())
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn authed_get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {API_KEY}"))
        .body(Body::empty())
        .unwrap()
}

pub fn authed_post(uri: &str, json: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Authorization", format!("Bearer {API_KEY}"))
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

pub async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
