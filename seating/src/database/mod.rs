//! Data store gateway backed by `SQLite`.
//!
//! This module owns the connection, schema versioning and the named queries
//! the engine is written against. Matching logic never builds SQL itself; it
//! asks for id sets and works on them in memory.
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeSet;
//! use seating::Database;
//!
//! let db = Database::open_in_memory().unwrap();
//! let conn = db.connection();
//!
//! let vegan = Database::insert_restriction(conn, "Vegan").unwrap();
//! let restaurant = Database::insert_restaurant(conn, "Tetetlán", &BTreeSet::from([vegan])).unwrap();
//! Database::insert_table(conn, restaurant, 4).unwrap();
//!
//! assert_eq!(
//!     Database::restaurants_with_capacity(conn, 3).unwrap(),
//!     BTreeSet::from([restaurant])
//! );
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use operations::NewReservation;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use schema::CURRENT_SCHEMA_VERSION;
