//! FitLog Server binary
//!
//! Registers users and records timed exercise entries over a small
//! REST API. Storage backend is chosen at startup: SQLite when
//! DATABASE_PATH is set, in-memory otherwise.

use anyhow::{Context, Result};
use fitlog_core::TrackerStore;
use fitlog_server::config::Config;
use fitlog_server::services::TrackerService;
use fitlog_server::storage::{Database, MemoryStore};
use fitlog_server::{app, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting FitLog Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = Config::from_env();
    info!(
        "Config loaded: bind={}, storage={}, static={}",
        config.bind_address,
        config.storage_label(),
        config.static_dir
    );

    let store: Arc<dyn TrackerStore> = match &config.database_path {
        Some(path) => {
            info!("Using SQLite storage at: {}", path);
            Arc::new(Database::connect_with_retry(path, CONNECT_RETRY_DELAY).await)
        }
        None => {
            info!("DATABASE_PATH not set, using in-memory storage");
            Arc::new(MemoryStore::new())
        }
    };

    let tracker = Arc::new(TrackerService::new(store));
    let state = AppState { tracker };

    let app = app(state, &config.static_dir);

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
