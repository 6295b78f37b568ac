//! Reservation engine operations.
//!
//! The engine is stateless: every operation takes a store handle and a
//! [`BookingPolicy`](crate::BookingPolicy) and keeps nothing between calls.
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeSet;
//! use chrono::NaiveDate;
//! use seating::operations::{book, cancel, find_available, BookingOutcome};
//! use seating::{BookingPolicy, BookingRequest, Database, ReservationRequest};
//!
//! let mut db = Database::open_in_memory().unwrap();
//! let restaurant = Database::insert_restaurant(db.connection(), "Lardo", &BTreeSet::new()).unwrap();
//! Database::insert_table(db.connection(), restaurant, 2).unwrap();
//! let diner = Database::insert_diner(db.connection(), "Tobias", None, &BTreeSet::new()).unwrap();
//!
//! let policy = BookingPolicy::default();
//! let start = NaiveDate::from_ymd_opt(2024, 8, 24).unwrap().and_hms_opt(19, 0, 0).unwrap();
//! let request = ReservationRequest::new(start, vec![diner]).unwrap();
//!
//! // Search
//! let found = find_available(db.connection(), &policy, &request).unwrap();
//! assert_eq!(found.len(), 1);
//!
//! // Book
//! let outcome = book(&mut db, &policy, &BookingRequest::new(found[0].id, request)).unwrap();
//! let BookingOutcome::Booked(reservation) = outcome else { panic!("expected a table") };
//!
//! // Cancel
//! cancel(&mut db, reservation.id).unwrap();
//! assert!(cancel(&mut db, reservation.id).unwrap_err().is_not_found());
//! ```

pub mod book;
pub mod cancel;
pub mod find;
pub mod import;
pub mod init;

#[cfg(test)]
mod proptests;

use std::collections::BTreeSet;

use rusqlite::Connection;
use serde::Serialize;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::models::{DinerId, Reservation};

pub use book::{book, book_within, select_best_fit};
pub use cancel::{cancel, cancel_within};
pub use find::{find_available, qualifies};
pub use import::{
    import_diners, import_restaurants, load_data, seed_restrictions, ImportSummary,
};
pub use init::{init_database, InitOptions, InitResult};

/// Result of a booking attempt.
///
/// Running out of tables is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reservation", rename_all = "snake_case")]
pub enum BookingOutcome {
    /// A table was allocated and the reservation stored.
    Booked(Reservation),
    /// No table at the restaurant fits the party in the requested window.
    NotAvailable,
}

impl BookingOutcome {
    /// Returns the stored reservation, if any.
    #[must_use]
    pub const fn reservation(&self) -> Option<&Reservation> {
        match self {
            Self::Booked(reservation) => Some(reservation),
            Self::NotAvailable => None,
        }
    }

    /// Returns true if a table was allocated.
    #[must_use]
    pub const fn is_booked(&self) -> bool {
        matches!(self, Self::Booked(_))
    }
}

/// Rejects requests naming diners that are not in the store.
pub(crate) fn ensure_diners_exist(conn: &Connection, ids: &BTreeSet<DinerId>) -> Result<()> {
    let found: BTreeSet<DinerId> = Database::get_diners(conn, ids)?
        .into_iter()
        .map(|diner| diner.id)
        .collect();

    let missing: Vec<String> = ids.difference(&found).map(ToString::to_string).collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidRequest {
            field: "diner_ids".into(),
            message: format!("unknown diner id(s): {}", missing.join(", ")),
        })
    }
}
