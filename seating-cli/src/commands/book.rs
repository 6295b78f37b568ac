//! Book command implementation.
//!
//! Books the smallest free table that seats the group. Running out of tables
//! is reported as a semantic failure (exit 1), not an error in the store.

use crate::error::CliError;
use crate::utils::{
    format_ids, format_timestamp, load_configuration, open_database, output_format, parse_time,
    print_json, GlobalOptions,
};
use chrono::NaiveDateTime;
use clap::Args;
use seating::config::OutputFormat;
use seating::operations::{book, BookingOutcome};
use seating::{
    BookingRequest, DinerId, Reservation, ReservationId, ReservationRequest, RestaurantId, TableId,
};
use serde::Serialize;
use std::collections::BTreeSet;

/// Book a table at a restaurant.
#[derive(Args)]
pub struct BookCommand {
    /// Reservation start (RFC 3339 or "YYYY-MM-DD HH:MM")
    #[arg(long, value_name = "TIME")]
    pub at: String,

    /// Comma-separated diner ids
    #[arg(long, value_name = "IDS", value_delimiter = ',', required = true)]
    pub diners: Vec<DinerId>,

    /// Restaurant id, as returned by `find`
    #[arg(long, value_name = "ID")]
    pub restaurant: RestaurantId,

    /// Output format (human or json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

/// A confirmed booking, as printed.
#[derive(Serialize)]
struct Receipt<'a> {
    id: ReservationId,
    restaurant_id: RestaurantId,
    table_id: TableId,
    diner_ids: &'a BTreeSet<DinerId>,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl<'a> Receipt<'a> {
    fn new(restaurant_id: RestaurantId, reservation: &'a Reservation) -> Self {
        Self {
            id: reservation.id,
            restaurant_id,
            table_id: reservation.table_id,
            diner_ids: &reservation.diner_ids,
            start: reservation.start,
            end: reservation.end,
        }
    }
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let start = parse_time(&self.at)?;
        let request = BookingRequest::new(
            self.restaurant,
            ReservationRequest::new(start, self.diners).map_err(seating::Error::from)?,
        );

        let config = load_configuration(global)?;
        let policy = config.booking_policy().map_err(CliError::from)?;
        let mut db = open_database(global, &config)?;

        let reservation = match book(&mut db, &policy, &request).map_err(CliError::from)? {
            BookingOutcome::Booked(reservation) => reservation,
            BookingOutcome::NotAvailable => {
                return Err(CliError::SemanticFailure(format!(
                    "No table available at restaurant {} for {} diner(s) at {}",
                    self.restaurant,
                    request.reservation.party_size(),
                    format_timestamp(start)
                )));
            }
        };

        let receipt = Receipt::new(self.restaurant, &reservation);
        match output_format(self.format, &config) {
            OutputFormat::Human => {
                println!(
                    "Booked reservation {} at restaurant {}, table {}, {} to {} for diner(s) {}",
                    receipt.id,
                    receipt.restaurant_id,
                    receipt.table_id,
                    format_timestamp(receipt.start),
                    format_timestamp(receipt.end),
                    format_ids(receipt.diner_ids)
                );
            }
            OutputFormat::Json => print_json(&receipt)?,
        }

        Ok(())
    }
}
