use std::sync::Arc;
use std::time::Duration;

use chrono::SecondsFormat;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hearth::api::{create_router, AppState};
use hearth::config::Config;
use hearth::db::{Database, DatabaseBackend, LibSqlBackend, MetadataStore};
use hearth::services::{Clock, SystemClock};
use hearth::store::{InMemoryStore, PracticeStore, SeedDataset};

/// How often an embedded replica pulls from its remote primary.
const REPLICA_SYNC_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Parser)]
#[command(name = "hearth")]
#[command(about = "Self-hostable practice backend for therapists")]
struct Args {
    /// Practice dataset to load instead of the embedded demo practice
    #[arg(long, value_name = "PATH")]
    seed: Option<String>,

    /// Validate the practice dataset and exit
    #[arg(long)]
    check_seed: bool,
}

fn load_dataset(path: Option<&str>) -> hearth::error::Result<SeedDataset> {
    match path {
        Some(path) => SeedDataset::from_path(path),
        None => SeedDataset::embedded(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hearth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(seed) = args.seed {
        config.practice.seed_path = Some(seed);
    }

    let dataset = load_dataset(config.practice.seed_path.as_deref())?;
    tracing::info!(
        patients = dataset.patients.len(),
        appointments = dataset.appointments.len(),
        financial_records = dataset.financial_records.len(),
        "Practice dataset loaded"
    );

    if args.check_seed {
        println!(
            "Dataset OK: {} patients, {} appointments, {} financial records",
            dataset.patients.len(),
            dataset.appointments.len(),
            dataset.financial_records.len()
        );
        return Ok(());
    }

    if config.server.api_keys.is_empty() {
        tracing::warn!(
            "HEARTH_API_KEYS is not set. Practice endpoints are locked; set HEARTH_API_KEYS to enable them."
        );
    }

    tracing::info!("Initializing database...");
    let raw_db = Database::new(&config.database).await?;
    let db: Arc<dyn DatabaseBackend> = Arc::new(LibSqlBackend::new(raw_db));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let started_at = clock.now().to_rfc3339_opts(SecondsFormat::Secs, true);
    if let Err(e) = db.set_meta("last_started_at", &started_at).await {
        tracing::warn!(error = %e, "Failed to record start time");
    }

    let cancel_token = CancellationToken::new();

    let store: Arc<dyn PracticeStore> = Arc::new(InMemoryStore::new(dataset));
    let state = AppState::new(config.clone(), db, store, clock)
        .with_shutdown(cancel_token.child_token());

    if config.database.local_path.is_some() {
        tracing::info!(
            "Starting replica sync... (interval={}s)",
            REPLICA_SYNC_INTERVAL.as_secs()
        );
        let db = state.db.clone();
        let token = cancel_token.child_token();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::info!("Replica sync shutting down...");
                        break;
                    }
                    _ = tokio::time::sleep(REPLICA_SYNC_INTERVAL) => {
                        if let Err(e) = db.sync().await {
                            tracing::error!("Replica sync error: {}", e);
                        }
                    }
                }
            }
        });
    }

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Hearth starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  DB check:     http://{}/api/db-test", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token))
        .await?;

    Ok(())
}

async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping background tasks...");
    cancel_token.cancel();
}
