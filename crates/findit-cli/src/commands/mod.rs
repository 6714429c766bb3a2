//! CLI command definitions and dispatch.

pub mod migrate;
pub mod seed;
pub mod serve;

use clap::{Parser, Subcommand};

use findit_core::config::AppConfig;
use findit_core::error::AppError;
use findit_database::DatabasePool;

use crate::output::OutputFormat;

/// FindIt: freelance marketplace backend
#[derive(Debug, Parser)]
#[command(name = "findit", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (loads `config/{env}.toml` over the defaults)
    #[arg(short, long, env = "FINDIT_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the FindIt server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Insert default categories and the admin account
    Seed,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.env).await,
            Commands::Migrate(args) => migrate::execute(args, &self.env, self.format).await,
            Commands::Seed => seed::execute(&self.env, self.format).await,
        }
    }
}

/// Helper: load configuration for an environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<sqlx::PgPool, AppError> {
    let pool = DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}
