//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    BookCommand, CancelCommand, CompletionsCommand, FindCommand, InitCommand, ListCommand,
    LoadCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for finding and booking restaurant tables.
#[derive(Parser)]
#[command(name = "seating")]
#[command(version, about = "Find and book restaurant tables for groups of diners", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "SEATING_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "SEATING_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "SEATING_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Load restaurants and diners from CSV files
    Load(LoadCommand),

    /// Find restaurants that can seat a group
    Find(FindCommand),

    /// Book a table at a restaurant
    Book(BookCommand),

    /// Cancel a reservation
    Cancel(CancelCommand),

    /// List reservations
    List(ListCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
