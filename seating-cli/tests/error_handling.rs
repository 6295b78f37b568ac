//! Integration tests for error handling and exit codes.
//!
//! - Exit code 0: Success
//! - Exit code 1: Semantic failure (not found, not available)
//! - Exit code 2: Timeout (SQLite busy)
//! - Exit code 3: No data directory found
//! - Exit code 4: Invalid arguments or request
//! - Exit code 5: I/O error
//! - Exit code 6: Other library errors
//! - Exit code 7: Configuration error

mod common;

use common::TestEnv;
use predicates::prelude::*;

// ============================================================================
// No Data Directory (Exit Code 3)
// ============================================================================

#[test]
fn test_disable_autoinit_without_database() {
    let env = TestEnv::new();
    env.command()
        .args(["--disable-autoinit", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Data directory not found"));

    assert!(!env.database_path().exists());
}

#[test]
fn test_disable_autoinit_from_config() {
    let env = TestEnv::new();
    env.write_config("disable_autoinit: true\n");

    env.command().arg("list").assert().code(3);
}

#[test]
fn test_autoinit_creates_database() {
    let env = TestEnv::new();
    env.command().arg("list").assert().success();
    assert!(env.database_path().exists());
}

// ============================================================================
// Invalid Arguments and Requests (Exit Code 4)
// ============================================================================

#[test]
fn test_invalid_time() {
    let env = TestEnv::new();
    env.command()
        .args(["find", "--at", "tonight", "--diners", "1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("invalid time 'tonight'"));
}

#[test]
fn test_duplicate_diners() {
    let env = TestEnv::new();
    env.load_fixtures();
    env.command()
        .args(["find", "--at", "2024-08-24 19:00", "--diners", "1,1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("diner_ids"));
}

#[test]
fn test_unknown_diner() {
    let env = TestEnv::new();
    env.load_fixtures();
    env.command()
        .args(["book", "--at", "2024-08-24 19:00", "--diners", "4,77", "--restaurant", "1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("77"));
}

#[test]
fn test_window_past_latest_time() {
    let env = TestEnv::new();
    env.load_fixtures();
    env.command()
        .args(["find", "--at", "+262142-12-31 23:00", "--diners", "1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("'start'"));

    env.command()
        .args(["book", "--at", "+262142-12-31 23:00", "--diners", "1", "--restaurant", "2"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("'start'"));
    assert_eq!(env.count_rows("reservations"), 0);
}

#[test]
fn test_load_without_inputs() {
    let env = TestEnv::new();
    env.command()
        .arg("load")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("--restaurants"));
}

// ============================================================================
// Timeout (Exit Code 2)
// ============================================================================

/// Another writer holds the lock for longer than the busy timeout.
#[test]
fn test_book_while_store_locked() {
    let env = TestEnv::new();
    env.load_fixtures();

    let holder = rusqlite::Connection::open(env.database_path()).expect("Failed to open db");
    holder
        .execute_batch("BEGIN IMMEDIATE")
        .expect("Failed to take write lock");

    env.command()
        .args(["--busy-timeout", "1"])
        .args(["book", "--at", "2024-08-24 19:00", "--diners", "4", "--restaurant", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Timeout waiting for database lock"));

    holder.execute_batch("ROLLBACK").expect("Failed to release lock");
    assert_eq!(env.count_rows("reservations"), 0);
}

// ============================================================================
// Semantic Failures (Exit Code 1)
// ============================================================================

#[test]
fn test_book_unknown_restaurant() {
    let env = TestEnv::new();
    env.load_fixtures();
    env.command()
        .args(["book", "--at", "2024-08-24 19:00", "--diners", "4", "--restaurant", "42"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("restaurant 42"));
}

// ============================================================================
// I/O Errors (Exit Code 5)
// ============================================================================

#[test]
fn test_load_missing_file() {
    let env = TestEnv::new();
    env.command()
        .arg("load")
        .arg("--diners")
        .arg(env.path().join("missing.csv"))
        .assert()
        .code(5);
}

// ============================================================================
// Library Errors (Exit Code 6)
// ============================================================================

/// A malformed row aborts the whole load.
#[test]
fn test_load_malformed_row() {
    let env = TestEnv::new();
    let diners = env.write_file(
        "diners.csv",
        "Name,Home Location,Dietary Restrictions\nBuster,somewhere,\n",
    );

    env.command()
        .arg("load")
        .arg("--diners")
        .arg(&diners)
        .assert()
        .code(6)
        .stderr(predicate::str::contains("row 1"));

    assert_eq!(env.count_rows("diners"), 0);
}

// ============================================================================
// Configuration Errors (Exit Code 7)
// ============================================================================

#[test]
fn test_invalid_config_file() {
    let env = TestEnv::new();
    env.write_config("reservation_hours: 0\n");

    env.command()
        .arg("list")
        .assert()
        .code(7)
        .stderr(predicate::str::contains("reservation_hours"));
}

#[test]
fn test_unknown_config_key() {
    let env = TestEnv::new();
    env.write_config("party_size: 4\n");

    env.command().arg("list").assert().code(7);
}

#[test]
fn test_invalid_env_override() {
    let env = TestEnv::new();
    env.command()
        .env("SEATING_OUTPUT_FORMAT", "xml")
        .arg("list")
        .assert()
        .code(7);
}
