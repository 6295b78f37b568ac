//! Reservation cancellation.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::models::{Reservation, ReservationId};

/// Cancels a reservation and returns what was removed.
///
/// Cancelling the same id twice succeeds once and then reports
/// [`Error::NotFound`].
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no such reservation exists,
/// [`Error::LockTimeout`] if the write lock cannot be acquired, or a database
/// error.
pub fn cancel(db: &mut Database, reservation_id: ReservationId) -> Result<Reservation> {
    let seconds = db.busy_timeout_secs();
    let tx = db.begin_transaction()?;

    let reservation =
        cancel_within(&tx, reservation_id).map_err(|e| e.with_lock_timeout(seconds))?;
    tx.commit()
        .map_err(|e| Error::from(e).with_lock_timeout(seconds))?;

    Ok(reservation)
}

/// Cancels a reservation using a connection the caller holds a transaction on.
///
/// # Errors
///
/// See [`cancel`].
pub fn cancel_within(conn: &Connection, reservation_id: ReservationId) -> Result<Reservation> {
    let Some(reservation) = Database::get_reservation(conn, reservation_id)? else {
        log::warn!("Reservation {reservation_id} not found");
        return Err(Error::not_found(format!("reservation {reservation_id}")));
    };

    Database::delete_reservation(conn, reservation_id)?;
    log::info!(
        "Cancelled reservation {reservation_id} on table {} ({} diner(s))",
        reservation.table_id,
        reservation.diner_ids.len()
    );
    Ok(reservation)
}
