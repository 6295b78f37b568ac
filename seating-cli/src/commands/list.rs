//! List command implementation.
//!
//! This module implements the `list` command, which displays stored
//! reservations as a table or as JSON.

use crate::error::CliError;
use crate::utils::{
    format_ids, format_timestamp, load_configuration, open_database, output_format, print_json,
    GlobalOptions,
};
use clap::Args;
use seating::config::OutputFormat;
use seating::{Database, Reservation};
use std::io::Write;

/// Column headers for human output.
const COLUMN_HEADERS: [&str; 5] = ["id", "table", "start", "end", "diners"];

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format (human or json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let reservations = Database::list_reservations(db.connection()).map_err(CliError::from)?;

        match output_format(self.format, &config) {
            OutputFormat::Human => format_as_table(&reservations)?,
            OutputFormat::Json => print_json(&reservations)?,
        }

        Ok(())
    }
}

/// Format reservations as a human-readable table.
fn format_as_table(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for res in reservations {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}",
            res.id,
            res.table_id,
            format_timestamp(res.start),
            format_timestamp(res.end),
            format_ids(&res.diner_ids),
        )?;
    }

    Ok(())
}
