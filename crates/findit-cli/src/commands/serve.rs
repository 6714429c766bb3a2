//! Start the FindIt server.

use clap::Args;

use findit_core::error::AppError;
use findit_database::migration::run_migrations;

use crate::output;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Skip running migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, env: &str) -> Result<(), AppError> {
    let mut config = super::load_config(env)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    println!("Starting FindIt server...");
    output::print_kv("Environment", env);
    output::print_kv("Listen", config.server.bind_address());
    output::print_kv("Uploads", &config.upload.directory);

    let pool = super::create_db_pool(&config).await?;

    if !args.no_migrate {
        println!("Running database migrations...");
        run_migrations(&pool).await?;
        output::print_success("Migrations applied.");
    }

    findit_api::run_server(config, pool).await
}
