//! Main entry point for the seating CLI.
//!
//! This is the command-line interface for the seating reservation engine.
//! It provides commands for managing table reservations:
//! - `init`: Create the data directory and database
//! - `load`: Import restaurants and diners from CSV
//! - `find`: Find restaurants that can seat a group
//! - `book`: Book a table
//! - `cancel`: Cancel a reservation
//! - `list`: List reservations

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _level = seating::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Load(cmd) => cmd.execute(&global),
        cli::Command::Find(cmd) => cmd.execute(&global),
        cli::Command::Book(cmd) => cmd.execute(&global),
        cli::Command::Cancel(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
