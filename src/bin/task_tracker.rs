//! Runs the task tracker HTTP service.
//!
//! Usage:
//!
//! ```text
//! task-tracker [--config <path>] [--in-memory]
//! ```
//!
//! Configuration is read from built-in defaults, the optional TOML file, and
//! `TASK_TRACKER_*` environment variables, in that order.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use task_tracker::adapters::memory::InMemoryTrackerStore;
use task_tracker::adapters::postgres::{PostgresTrackerStore, apply_migrations, build_pool};
use task_tracker::api::{AppState, create_router};
use task_tracker::settings::{StorageBackend, TrackerConfig};
use task_tracker::telemetry::init_tracing;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "task-tracker", version, about = "Employee and task tracking service")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, env = "TASK_TRACKER_CONFIG")]
    config: Option<PathBuf>,

    /// Use the in-memory store regardless of configuration.
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let mut config = TrackerConfig::load(cli.config.as_deref())?;
    if cli.in_memory {
        config.storage.backend = StorageBackend::Memory;
    }
    init_tracing(&config.logging)?;

    let state = build_state(&config).await?;
    let listener = TcpListener::bind(config.server.bind_address).await?;
    info!(address = %listener.local_addr()?, "task tracker listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("task tracker stopped");
    Ok(())
}

async fn build_state(config: &TrackerConfig) -> Result<AppState, BoxError> {
    let policy = config.assignment.policy();
    match config.storage.backend {
        StorageBackend::Memory => {
            warn!("using the in-memory store; records are lost on exit");
            Ok(AppState::from_store(
                Arc::new(InMemoryTrackerStore::new()),
                policy,
            ))
        }
        StorageBackend::Postgres => {
            let storage = &config.storage;
            let pool = build_pool(
                &storage.url,
                storage.max_connections,
                storage.connect_timeout(),
            )?;
            if storage.run_migrations {
                apply_migrations(&pool).await?;
                info!("database schema applied");
            }
            Ok(AppState::from_store(
                Arc::new(PostgresTrackerStore::new(pool)),
                policy,
            ))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
