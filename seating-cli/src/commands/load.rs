//! Load command implementation.
//!
//! Imports restaurants and diners from CSV files in a single transaction.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use seating::operations::load_data;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Load restaurants and diners from CSV files.
#[derive(Args)]
pub struct LoadCommand {
    /// Restaurants CSV (Name, Endorsements, No. of two/four/six-top tables)
    #[arg(long, value_name = "FILE")]
    pub restaurants: Option<PathBuf>,

    /// Diners CSV (Name, Home Location, Dietary Restrictions)
    #[arg(long, value_name = "FILE")]
    pub diners: Option<PathBuf>,
}

fn open_input(path: Option<&Path>) -> Result<Option<File>, CliError> {
    path.map(File::open).transpose().map_err(CliError::from)
}

impl LoadCommand {
    /// Execute the load command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.restaurants.is_none() && self.diners.is_none() {
            return Err(CliError::InvalidArguments(
                "Specify --restaurants, --diners, or both".to_string(),
            ));
        }

        let restaurants = open_input(self.restaurants.as_deref())?;
        let diners = open_input(self.diners.as_deref())?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let summary = load_data(&mut db, restaurants, diners).map_err(CliError::from)?;

        if !global.quiet {
            eprintln!(
                "Loaded {} restaurant(s) with {} table(s) and {} diner(s)",
                summary.restaurants, summary.tables, summary.diners
            );
        }

        Ok(())
    }
}
