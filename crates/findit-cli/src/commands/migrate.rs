//! `migrate run` and `migrate status`.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use findit_core::error::AppError;
use findit_database::migration::{self, MigrationState};

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub command: MigrateCommand,
}

#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Apply pending migrations
    Run,
    /// List embedded migrations and whether each is applied
    Status,
}

#[derive(Debug, Serialize, Tabled)]
struct StatusRow {
    #[tabled(rename = "Version")]
    version: i64,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "State")]
    state: &'static str,
}

impl From<MigrationState> for StatusRow {
    fn from(m: MigrationState) -> Self {
        Self {
            version: m.version,
            description: m.description,
            state: if m.applied { "applied" } else { "pending" },
        }
    }
}

pub async fn execute(args: &MigrateArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;

    let outcome = match args.command {
        MigrateCommand::Run => migration::run_migrations(&pool).await.map(|()| {
            output::print_success("Schema is up to date.");
        }),
        MigrateCommand::Status => migration::migration_status(&pool).await.map(|states| {
            let pending = states.iter().filter(|m| !m.applied).count();
            let rows: Vec<StatusRow> = states.into_iter().map(StatusRow::from).collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table && pending > 0 {
                println!("{pending} pending, run `findit-cli migrate run`");
            }
        }),
    };

    pool.close().await;
    outcome
}
