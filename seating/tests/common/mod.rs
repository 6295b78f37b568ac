//! Common test utilities for integration tests.
//!
//! Provides a store fixture backed by a temporary directory and helpers for
//! seeding restaurants, tables and diners.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use seating::database::{Database, DatabaseConfig, DATABASE_FILE_NAME};
use seating::{DinerId, RestaurantId, RestrictionId, TableId};

/// `2024-08-24` at `hour:minute`.
#[allow(dead_code)]
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 8, 24)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// A database file in its own temporary directory.
///
/// The directory is removed when the store is dropped.
pub struct TestStore {
    dir: TempDir,
    db: Database,
}

#[allow(dead_code)]
impl TestStore {
    /// Creates an empty, schema-initialized store.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(DatabaseConfig::new(dir.path().join(DATABASE_FILE_NAME))).unwrap();
        Self { dir, db }
    }

    /// Path of the database file, for opening extra connections.
    pub fn path(&self) -> PathBuf {
        self.dir.path().join(DATABASE_FILE_NAME)
    }

    /// The temporary data directory.
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Opens another handle on the same file.
    pub fn open_another(&self) -> Database {
        Database::open(DatabaseConfig::new(self.path())).unwrap()
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut Database {
        &mut self.db
    }

    /// Inserts (or reuses) a restriction by name.
    pub fn restriction(&self, name: &str) -> RestrictionId {
        Database::insert_restriction(self.db.connection(), name).unwrap()
    }

    /// Inserts a restaurant with tables of the given capacities.
    pub fn restaurant(
        &self,
        name: &str,
        restrictions: &[RestrictionId],
        capacities: &[u32],
    ) -> (RestaurantId, Vec<TableId>) {
        let conn = self.db.connection();
        let restrictions: BTreeSet<_> = restrictions.iter().copied().collect();
        let id = Database::insert_restaurant(conn, name, &restrictions).unwrap();
        let tables = capacities
            .iter()
            .map(|&capacity| Database::insert_table(conn, id, capacity).unwrap())
            .collect();
        (id, tables)
    }

    /// Inserts a diner without a home location.
    pub fn diner(&self, name: &str, restrictions: &[RestrictionId]) -> DinerId {
        let restrictions: BTreeSet<_> = restrictions.iter().copied().collect();
        Database::insert_diner(self.db.connection(), name, None, &restrictions).unwrap()
    }
}
