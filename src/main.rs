//! FindIt Server: freelance marketplace backend
//!
//! Main entry point that loads configuration, prepares the database and
//! starts the HTTP + WebSocket server.

use tracing_subscriber::{EnvFilter, fmt};

use findit_core::config::AppConfig;
use findit_core::config::logging::LogFormat;
use findit_core::error::AppError;
use findit_database::DatabasePool;

#[tokio::main]
async fn main() {
    let env = std::env::var("FINDIT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FindIt v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = DatabasePool::connect(&config.database).await?.into_pool();

    tracing::info!("Running database migrations...");
    findit_database::migration::run_migrations(&db_pool).await?;
    tracing::info!("Database migrations complete");

    // ── Step 2: Serve until shutdown ─────────────────────────────
    findit_api::run_server(config, db_pool.clone()).await?;

    db_pool.close().await;
    tracing::info!("FindIt server stopped");
    Ok(())
}
