//! Table allocation.
//!
//! Booking checks for conflicts and inserts the reservation inside one
//! `BEGIN IMMEDIATE` transaction. Two bookers racing for the last table are
//! serialized by the write lock, so the second one sees the first one's row
//! and gets [`BookingOutcome::NotAvailable`].

use std::collections::BTreeSet;

use rusqlite::Connection;

use crate::database::{Database, NewReservation};
use crate::error::{Error, Result};
use crate::models::{Table, TableId};
use crate::request::{BookingPolicy, BookingRequest};

use super::{ensure_diners_exist, BookingOutcome};

/// Picks the smallest free table seating `party_size`, ties broken by lowest id.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use seating::operations::select_best_fit;
/// use seating::Table;
///
/// let tables = [
///     Table { id: 1, restaurant_id: 1, capacity: 6 },
///     Table { id: 2, restaurant_id: 1, capacity: 4 },
///     Table { id: 3, restaurant_id: 1, capacity: 2 },
/// ];
///
/// assert_eq!(select_best_fit(&tables, &BTreeSet::new(), 1).unwrap().id, 3);
/// assert_eq!(select_best_fit(&tables, &BTreeSet::from([3]), 1).unwrap().id, 2);
/// assert!(select_best_fit(&tables, &BTreeSet::new(), 7).is_none());
/// ```
#[must_use]
pub fn select_best_fit(
    tables: &[Table],
    conflicting: &BTreeSet<TableId>,
    party_size: u32,
) -> Option<Table> {
    tables
        .iter()
        .filter(|table| table.capacity >= party_size && !conflicting.contains(&table.id))
        .min_by_key(|table| (table.capacity, table.id))
        .copied()
}

/// Books the best-fit table at the requested restaurant.
///
/// Runs [`book_within`] inside an immediate transaction and commits it.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown restaurant,
/// [`Error::InvalidRequest`] for unknown diners or a window ending out of
/// range, [`Error::LockTimeout`] if
/// another writer holds the lock past the busy timeout, or a database error.
pub fn book(
    db: &mut Database,
    policy: &BookingPolicy,
    request: &BookingRequest,
) -> Result<BookingOutcome> {
    let seconds = db.busy_timeout_secs();
    let tx = db.begin_transaction()?;

    let outcome =
        book_within(&tx, policy, request).map_err(|e| e.with_lock_timeout(seconds))?;
    tx.commit()
        .map_err(|e| Error::from(e).with_lock_timeout(seconds))?;

    Ok(outcome)
}

/// Books the best-fit table using a connection the caller already holds a
/// write transaction on.
///
/// Table-level exclusion: only tables with an overlapping reservation are
/// skipped, so a restaurant with one busy table can still seat the party at
/// another.
///
/// # Errors
///
/// See [`book`].
pub fn book_within(
    conn: &Connection,
    policy: &BookingPolicy,
    request: &BookingRequest,
) -> Result<BookingOutcome> {
    let restaurant_id = request.restaurant_id;
    let start = request.reservation.start();
    let end = policy.end_for(start)?;
    let party_size = request.reservation.party_size();
    let diner_ids = request.reservation.diner_set();

    if Database::get_restaurant(conn, restaurant_id)?.is_none() {
        return Err(Error::not_found(format!("restaurant {restaurant_id}")));
    }
    ensure_diners_exist(conn, &diner_ids)?;

    log::info!(
        "Booking restaurant {restaurant_id} for {party_size} diner(s) from {start} to {end}"
    );

    let conflicting = Database::conflicting_table_ids(conn, start, end)?;
    let tables = Database::get_tables_for_restaurant(conn, restaurant_id, party_size)?;

    let Some(table) = select_best_fit(&tables, &conflicting, party_size) else {
        log::warn!(
            "No table available at restaurant {restaurant_id} for {party_size} diner(s) at {start}"
        );
        return Ok(BookingOutcome::NotAvailable);
    };
    log::debug!(
        "Selected table {} (capacity {}) from {} candidate(s)",
        table.id,
        table.capacity,
        tables.len()
    );

    let reservation = Database::insert_reservation(
        conn,
        &NewReservation {
            table_id: table.id,
            start,
            end,
            diner_ids,
        },
    )?;

    log::info!(
        "Booked reservation {} on table {} at restaurant {restaurant_id}",
        reservation.id,
        table.id
    );
    Ok(BookingOutcome::Booked(reservation))
}
