//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_database, GlobalOptions};
use clap::Args;
use seating::operations::cancel;
use seating::ReservationId;

/// Cancel a reservation.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: ReservationId,
}

impl CancelCommand {
    /// Execute the cancel command.
    ///
    /// A missing reservation exits 1; cancelling twice is never a silent success.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let cancelled = cancel(&mut db, self.id).map_err(CliError::from)?;

        if !global.quiet {
            eprintln!(
                "Cancelled reservation {} (table {}, {})",
                cancelled.id,
                cancelled.table_id,
                format_timestamp(cancelled.start)
            );
        }

        Ok(())
    }
}
