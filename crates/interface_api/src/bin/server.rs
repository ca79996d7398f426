//! Pokedex Catalog - API Server Binary
//!
//! This binary starts the HTTP API server for the pokedex catalog.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin pokedex-api
//!
//! # Load the sample catalog, then serve
//! cargo run --bin pokedex-api -- seeddata
//!
//! # Run against the in-memory store
//! API_STORE=memory cargo run --bin pokedex-api -- seeddata
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - PostgreSQL connection string (`DATABASE_URL` also accepted)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_STORE` - `postgres` or `memory` (default: postgres)
//! * `API_STRICT_REFERENCES` - Reject pokemon with unknown owner or category (default: false)

use std::net::SocketAddr;

use interface_api::config::{ApiConfig, StoreBackend};
use interface_api::{create_router, seed::seed_catalog};
use infra_db::{apply_schema, create_pool, Database, DatabaseConfig, MemoryDatabase};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, opens the configured store,
/// optionally seeds it and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - Database connection or schema setup fails
/// - Seeding fails
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config()?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        store = ?config.store,
        "Starting Pokedex Catalog API Server"
    );

    let database = open_database(&config).await?;

    if std::env::args().skip(1).any(|arg| arg.eq_ignore_ascii_case("seeddata")) {
        tracing::info!("Seeding sample catalog...");
        seed_catalog(&database).await?;
    }

    let app = create_router(database, config.clone());

    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from `API_*` environment variables.
///
/// A plain `DATABASE_URL` overrides `API_DATABASE_URL`.
fn load_config() -> Result<ApiConfig, config::ConfigError> {
    let mut config = ApiConfig::from_env()?;
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database_url = url;
    }
    Ok(config)
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Opens the configured backing store.
///
/// The postgres backend connects and applies the catalog schema.
async fn open_database(config: &ApiConfig) -> Result<Database, infra_db::DatabaseError> {
    match config.store {
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on shutdown");
            Ok(Database::from(MemoryDatabase::new()))
        }
        StoreBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = create_pool(DatabaseConfig::new(config.database_url.clone())).await?;
            apply_schema(&pool).await?;
            tracing::info!("Database ready");
            Ok(Database::from(pool))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
