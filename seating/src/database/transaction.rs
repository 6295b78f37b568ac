//! Transaction management utilities.
//!
//! Booking and cancellation take the `SQLite` write lock up front with
//! `BEGIN IMMEDIATE`, so a conflict check and the insert that depends on it
//! can never interleave with another writer.

use rusqlite::{Transaction, TransactionBehavior};

use crate::error::Result;

use super::connection::Database;

impl Database {
    /// Starts a write transaction that holds the database lock until commit.
    ///
    /// A competing writer waits up to the configured busy timeout and then
    /// fails with [`Error::LockTimeout`](crate::Error::LockTimeout).
    ///
    /// # Errors
    ///
    /// Returns an error if the lock cannot be acquired.
    ///
    /// # Examples
    ///
    /// ```
    /// use seating::Database;
    ///
    /// let mut db = Database::open_in_memory().unwrap();
    /// let tx = db.begin_transaction().unwrap();
    /// Database::insert_restriction(&tx, "Vegan").unwrap();
    /// tx.commit().unwrap();
    /// ```
    pub fn begin_transaction(&mut self) -> Result<Transaction<'_>> {
        let seconds = self.busy_timeout_secs();
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| crate::Error::from(e).with_lock_timeout(seconds))
    }

    /// Starts a deferred transaction for a consistent multi-query read.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    pub fn begin_read(&mut self) -> Result<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Deferred)?)
    }
}
