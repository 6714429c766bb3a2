//! Console output for CLI commands.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    /// Pretty JSON, for scripts.
    Json,
}

/// Print rows as a table with a count footer, or as a JSON array.
pub fn print_list<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(rows) {
            Ok(json) => println!("{json}"),
            Err(e) => print_error(&format!("Could not encode output: {e}")),
        },
        OutputFormat::Table if rows.is_empty() => println!("(nothing to show)"),
        OutputFormat::Table => {
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{table}");
            println!("{} row(s)", rows.len());
        }
    }
}

pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Aligned `key: value` line used by `serve` before it starts.
pub fn print_kv(key: &str, value: impl std::fmt::Display) {
    println!("  {:<20} {value}", format!("{key}:"));
}
