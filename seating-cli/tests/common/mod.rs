//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - CSV fixtures for restaurants and diners

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Two restaurants: Lardo (gluten-free, one two-top) and u.to.pi.a
/// (vegan and vegetarian, a two-top and a four-top).
pub const RESTAURANTS_CSV: &str = "\
Name,Endorsements,No. of two-top tables,No. of four-top tables,No. of six-top tables
Lardo,\"Gluten Free Options\",1,0,0
u.to.pi.a,\"Vegan-Friendly, Vegetarian-Friendly\",1,1,0
";

/// Four diners with ids 1 to 4 in a fresh database.
pub const DINERS_CSV: &str = "\
Name,Home Location,Dietary Restrictions
Michael,\"19.4153107,-99.1804722\",Vegetarian
George Michael,\"19.4058242,-99.1671942\",\"Vegetarian, Gluten-Free\"
Lucile,\"19.3634215,-99.1769323\",Gluten-Free
Gob,\"19.3318331,-99.2078983\",
";

/// Environment variables that would leak host configuration into a test.
const SEATING_ENV_VARS: [&str; 7] = [
    "SEATING_DATA_DIR",
    "SEATING_BUSY_TIMEOUT",
    "SEATING_DISABLE_AUTOINIT",
    "SEATING_RESERVATION_HOURS",
    "SEATING_MAXIMUM_LOCK_WAIT_SECONDS",
    "SEATING_OUTPUT_FORMAT",
    "SEATING_LOG_MODE",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the seating data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; seating creates it on demand.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("seating-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a bare command builder with host `SEATING_*` variables removed.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("seating").expect("Failed to find seating binary");
        for var in SEATING_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("seating.db")
    }

    /// Write a file under the temporary directory and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write `config.yaml` into the data directory.
    pub fn write_config(&self, contents: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join("config.yaml"), contents)
            .expect("Failed to write config");
    }

    /// Load the standard restaurant and diner fixtures.
    pub fn load_fixtures(&self) {
        let restaurants = self.write_file("restaurants.csv", RESTAURANTS_CSV);
        let diners = self.write_file("diners.csv", DINERS_CSV);
        self.command()
            .arg("load")
            .arg("--restaurants")
            .arg(&restaurants)
            .arg("--diners")
            .arg(&diners)
            .assert()
            .success();
    }

    /// Book through the CLI and return the reservation id.
    ///
    /// # Panics
    /// Panics if booking fails.
    pub fn book(&self, at: &str, diners: &str, restaurant: i64) -> i64 {
        let output = self
            .command()
            .args(["book", "--format", "json", "--at", at, "--diners", diners])
            .arg("--restaurant")
            .arg(restaurant.to_string())
            .output()
            .expect("Failed to run book command");

        assert!(
            output.status.success(),
            "Book failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let receipt: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("Book output is not JSON");
        receipt["id"].as_i64().expect("Receipt has no id")
    }

    /// Count rows in a table by opening the database directly.
    pub fn count_rows(&self, table: &str) -> i64 {
        let conn = rusqlite::Connection::open(self.database_path()).expect("Failed to open db");
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .expect("Failed to count rows")
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }
}
