//! Multi-process booking tests.
//!
//! These tests spawn real `seating` processes against one database to check
//! that concurrent bookers never share a table.

mod common;

use common::TestEnv;
use std::thread;

/// Several processes race for Lardo's single table at the same time.
///
/// Exactly one booking may succeed; every other process must report
/// "no table available" (exit 1) rather than a store error.
#[test]
fn test_concurrent_bookings_single_table() {
    let env = TestEnv::new();
    env.load_fixtures();

    let handles: Vec<_> = ["1", "2", "3", "4"]
        .into_iter()
        .map(|diner| {
            let mut cmd = env.command();
            cmd.args(["--busy-timeout", "30"]).args([
                "book",
                "--at",
                "2024-08-24 19:00",
                "--diners",
                diner,
                "--restaurant",
                "1",
            ]);
            thread::spawn(move || cmd.output().expect("Failed to run book"))
        })
        .collect();

    let outputs: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let codes: Vec<_> = outputs.iter().map(|o| o.status.code()).collect();

    assert_eq!(
        codes.iter().filter(|c| **c == Some(0)).count(),
        1,
        "exactly one booking should succeed: {codes:?}"
    );
    assert_eq!(
        codes.iter().filter(|c| **c == Some(1)).count(),
        3,
        "the rest should be not available: {codes:?}"
    );
    assert_eq!(env.count_rows("reservations"), 1);
}

/// Concurrent bookers at a restaurant with enough tables all succeed on
/// distinct tables.
#[test]
fn test_concurrent_bookings_distinct_tables() {
    let env = TestEnv::new();
    env.load_fixtures();

    let handles: Vec<_> = ["1", "4"]
        .into_iter()
        .map(|diner| {
            let mut cmd = env.command();
            cmd.args(["--busy-timeout", "30"]).args([
                "book",
                "--format",
                "json",
                "--at",
                "2024-08-24 19:00",
                "--diners",
                diner,
                "--restaurant",
                "2",
            ]);
            thread::spawn(move || cmd.output().expect("Failed to run book"))
        })
        .collect();

    let mut tables: Vec<i64> = handles
        .into_iter()
        .map(|h| {
            let output = h.join().unwrap();
            assert!(
                output.status.success(),
                "booking failed: {}",
                String::from_utf8_lossy(&output.stderr)
            );
            let receipt: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
            receipt["table_id"].as_i64().unwrap()
        })
        .collect();
    tables.sort_unstable();

    assert_eq!(tables, vec![2, 3]);
}
