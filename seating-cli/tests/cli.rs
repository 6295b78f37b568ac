//! Basic CLI surface tests: help, version and completions.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let env = TestEnv::new();
    env.command_bare()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("find"))
        .stdout(predicate::str::contains("book"))
        .stdout(predicate::str::contains("cancel"))
        .stdout(predicate::str::contains("load"));
}

#[test]
fn test_version() {
    let env = TestEnv::new();
    env.command_bare()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_bash_completions() {
    let env = TestEnv::new();
    env.command_bare()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seating"))
        .stderr(predicate::str::contains("Generating bash completion script"));
}

#[test]
fn test_missing_subcommand_fails() {
    let env = TestEnv::new();
    env.command_bare().assert().failure();
}
