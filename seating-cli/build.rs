//! Build script for seating-cli.
//!
//! Renders `seating.1` plus one `seating-<command>.1` page per subcommand
//! into `OUT_DIR/man` with clap_mangen.
//!
//! Build scripts cannot depend on the crate being built, so the command tree
//! is described here from two tables. Keep them in step with src/cli.rs.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// (long flag, help, value name, environment variable)
const GLOBAL_ARGS: [(&str, &str, Option<&str>, Option<&str>); 5] = [
    ("verbose", "Enable verbose output", None, None),
    ("quiet", "Suppress non-essential output", None, None),
    (
        "data-dir",
        "Override the data directory location",
        Some("PATH"),
        Some("SEATING_DATA_DIR"),
    ),
    (
        "busy-timeout",
        "Override the default busy timeout (in seconds)",
        Some("SECONDS"),
        Some("SEATING_BUSY_TIMEOUT"),
    ),
    (
        "disable-autoinit",
        "Disable automatic database initialization",
        None,
        Some("SEATING_DISABLE_AUTOINIT"),
    ),
];

/// (name, about, long about)
const SUBCOMMANDS: [(&str, &str, &str); 7] = [
    (
        "init",
        "Initialize the data directory and database",
        "Create the database and seed the canonical dietary restrictions",
    ),
    (
        "load",
        "Load restaurants and diners from CSV files",
        "Import restaurants, tables and diners in a single transaction",
    ),
    (
        "find",
        "Find restaurants that can seat a group",
        "List restaurants with a free table that fits the group and its dietary restrictions",
    ),
    (
        "book",
        "Book a table at a restaurant",
        "Book the smallest free table that seats the group",
    ),
    ("cancel", "Cancel a reservation", "Delete a reservation by id"),
    ("list", "List reservations", "Display all stored reservations"),
    (
        "completions",
        "Generate shell completion scripts",
        "Generate shell completion scripts for bash, zsh, fish, or PowerShell",
    ),
];

fn global_arg(
    long: &'static str,
    help: &'static str,
    value: Option<&'static str>,
    env: Option<&'static str>,
) -> Arg {
    let mut arg = Arg::new(long).long(long).help(help).global(true);
    arg = match value {
        Some(name) => arg.value_name(name),
        None => arg.action(ArgAction::SetTrue),
    };
    if let Some(var) = env {
        arg = arg.env(var);
    }
    arg
}

fn build_cli() -> Command {
    let root = Command::new("seating")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Find and book restaurant tables for groups of diners")
        .long_about(
            "Command-line tool for matching groups of diners to restaurants and booking tables",
        );

    let root = GLOBAL_ARGS
        .iter()
        .fold(root, |cmd, &(long, help, value, env)| {
            cmd.arg(global_arg(long, help, value, env))
        });

    root.subcommands(
        SUBCOMMANDS
            .iter()
            .map(|&(name, about, long_about)| Command::new(name).about(about).long_about(long_about)),
    )
}

fn render(cmd: Command, title: &str, path: &Path) -> io::Result<()> {
    let mut buffer = Vec::new();
    Man::new(cmd).title(title).render(&mut buffer)?;
    fs::write(path, buffer)
}

fn main() -> io::Result<()> {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let cli = build_cli();
    for sub in cli.get_subcommands() {
        let title = format!("seating-{}", sub.get_name());
        render(sub.clone(), &title, &man_dir.join(format!("{title}.1")))?;
    }
    render(cli, "seating", &man_dir.join("seating.1"))?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
