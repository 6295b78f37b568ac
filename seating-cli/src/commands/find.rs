//! Find command implementation.
//!
//! Lists the restaurants that can seat a group at a given time. An empty
//! result is a normal outcome and exits 0.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, output_format, parse_time, GlobalOptions};
use clap::Args;
use seating::config::OutputFormat;
use seating::operations::find_available;
use seating::{DinerId, ReservationRequest, Restaurant};
use serde::Serialize;
use std::io::Write;

/// Find restaurants that can seat a group.
#[derive(Args)]
pub struct FindCommand {
    /// Reservation start (RFC 3339 or "YYYY-MM-DD HH:MM")
    #[arg(long, value_name = "TIME")]
    pub at: String,

    /// Comma-separated diner ids
    #[arg(long, value_name = "IDS", value_delimiter = ',', required = true)]
    pub diners: Vec<DinerId>,

    /// Output format (human or json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

/// One search hit, as printed.
#[derive(Serialize)]
struct Match<'a> {
    id: i64,
    name: &'a str,
}

impl FindCommand {
    /// Execute the find command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let start = parse_time(&self.at)?;
        let request = ReservationRequest::new(start, self.diners)
            .map_err(seating::Error::from)?;

        let config = load_configuration(global)?;
        let policy = config.booking_policy().map_err(CliError::from)?;
        let mut db = open_database(global, &config)?;

        let snapshot = db.begin_read().map_err(CliError::from)?;
        let restaurants = find_available(&snapshot, &policy, &request).map_err(CliError::from)?;
        drop(snapshot);

        match output_format(self.format, &config) {
            OutputFormat::Human => print_human(&restaurants, global)?,
            OutputFormat::Json => {
                let matches: Vec<_> = restaurants
                    .iter()
                    .map(|r| Match {
                        id: r.id,
                        name: &r.name,
                    })
                    .collect();
                crate::utils::print_json(&matches)?;
            }
        }

        Ok(())
    }
}

fn print_human(restaurants: &[Restaurant], global: &GlobalOptions) -> Result<(), CliError> {
    if restaurants.is_empty() {
        if !global.quiet {
            eprintln!("No restaurants available");
        }
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "ID\tNAME")?;
    for restaurant in restaurants {
        writeln!(handle, "{}\t{}", restaurant.id, restaurant.name)?;
    }
    Ok(())
}
