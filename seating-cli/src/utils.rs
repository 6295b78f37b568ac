//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including data directory resolution, configuration loading, database
//! management, and time parsing.

use crate::error::CliError;
use chrono::{DateTime, NaiveDateTime};
use seating::config::OutputFormat;
use seating::database::{resolve_data_dir, DATABASE_FILE_NAME};
use seating::{Config, ConfigBuilder, Database, DatabaseConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Naive formats accepted by `--at`, tried in order after RFC 3339.
const NAIVE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory.
///
/// Priority: `--data-dir` (or `SEATING_DATA_DIR`) > `~/.seating`.
pub fn data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match &global.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => resolve_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. `<data_dir>/config.yaml`
/// 3. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = data_dir(global)?;
    ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = data_dir(global)?.join(DATABASE_FILE_NAME);
    let autoinit_disabled = global.disable_autoinit || config.disable_autoinit.unwrap_or(false);

    if !db_path.exists() && autoinit_disabled {
        return Err(CliError::NoDataDirectory);
    }

    let busy_timeout = global
        .busy_timeout
        .map_or_else(|| config.lock_wait(), Duration::from_secs);
    let db_config = DatabaseConfig::new(db_path).with_busy_timeout(busy_timeout);

    Database::open(db_config).map_err(CliError::from)
}

/// Pick the output format: explicit flag, then configuration.
pub fn output_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.unwrap_or_else(|| config.output_format())
}

/// Parse a reservation start time.
///
/// Accepts RFC 3339 (converted to UTC) or a naive `YYYY-MM-DD HH:MM[:SS]`.
pub fn parse_time(value: &str) -> Result<NaiveDateTime, CliError> {
    let value = value.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Ok(time.naive_utc());
    }

    NAIVE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| {
            CliError::InvalidArguments(format!(
                "invalid time '{value}' (expected RFC 3339 or 'YYYY-MM-DD HH:MM')"
            ))
        })
}

/// Format a timestamp for display.
pub fn format_timestamp(time: NaiveDateTime) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}

/// Format a set of ids as `1, 2, 3`.
pub fn format_ids<'a>(ids: impl IntoIterator<Item = &'a i64>) -> String {
    ids.into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

/// Write a value to stdout as pretty JSON followed by a newline.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    println!("{json}");
    Ok(())
}
