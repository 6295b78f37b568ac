//! Shared test utilities for database and engine unit tests.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::models::{DinerId, RestaurantId, RestrictionId, TableId};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// `2024-08-24` at the given hour.
///
/// # Panics
///
/// Panics if `hour` is not a valid hour of the day.
#[must_use]
pub fn at(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 8, 24)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Inserts a restaurant with tables of the given capacities.
///
/// # Panics
///
/// Panics if any insert fails.
pub fn seed_restaurant(
    db: &Database,
    name: &str,
    restrictions: &[RestrictionId],
    capacities: &[u32],
) -> (RestaurantId, Vec<TableId>) {
    let conn = db.connection();
    let restrictions: BTreeSet<_> = restrictions.iter().copied().collect();
    let id = Database::insert_restaurant(conn, name, &restrictions).unwrap();
    let tables = capacities
        .iter()
        .map(|&capacity| Database::insert_table(conn, id, capacity).unwrap())
        .collect();
    (id, tables)
}

/// Inserts a diner without a home location.
///
/// # Panics
///
/// Panics if the insert fails.
pub fn seed_diner(db: &Database, name: &str, restrictions: &[RestrictionId]) -> DinerId {
    let restrictions: BTreeSet<_> = restrictions.iter().copied().collect();
    Database::insert_diner(db.connection(), name, None, &restrictions).unwrap()
}
