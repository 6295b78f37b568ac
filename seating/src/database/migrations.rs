//! Database schema management and migrations.
//!
//! This module handles database schema initialization and version checking.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    ALL_TABLES, CREATE_NO_OVERLAP_TRIGGER, CREATE_RESERVATION_WINDOW_INDEX,
    CREATE_TABLE_CAPACITY_INDEX, CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION,
    SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates all tables, indices, the overlap trigger and the version marker.
/// Every statement is idempotent.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use seating::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in ALL_TABLES {
        conn.execute(statement, [])?;
    }

    conn.execute(CREATE_RESERVATION_WINDOW_INDEX, [])?;
    conn.execute(CREATE_TABLE_CAPACITY_INDEX, [])?;
    conn.execute(CREATE_NO_OVERLAP_TRIGGER, [])?;

    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;

    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than a missing
/// metadata table or row (both of which mean version 0).
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let metadata_exists: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'metadata')",
        [],
        |row| row.get(0),
    )?;
    if !metadata_exists {
        return Ok(0);
    }

    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| row.get::<_, String>(0)) {
        Ok(value) => value.parse::<i32>().map_err(|e| Error::DatabaseCorruption {
            details: format!("schema_version '{value}' is not a number: {e}"),
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// A fresh database (version 0) is initialized. Any other version must match
/// [`CURRENT_SCHEMA_VERSION`] exactly.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] for older or newer databases,
/// or a database error if initialization fails.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        initialize_schema(conn)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}
