//! Data directory and database initialization.

use std::fs;
use std::path::PathBuf;

use crate::database::{Database, DatabaseConfig, DATABASE_FILE_NAME};
use crate::error::Result;

use super::import::seed_restrictions;

/// Options for database initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Insert the canonical dietary restrictions.
    pub seed: bool,
    /// Write a commented default configuration file.
    pub create_config: bool,
}

impl InitOptions {
    /// Creates options that seed restrictions and skip the config file.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            seed: true,
            create_config: false,
        }
    }

    /// Sets whether to seed the canonical restrictions.
    #[must_use]
    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    /// Sets whether to create a default configuration file.
    #[must_use]
    pub fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }
}

/// Result of an initialization.
#[derive(Debug)]
pub struct InitResult {
    /// Whether the data directory was created.
    pub data_dir_created: bool,
    /// Whether the database file was created.
    pub database_created: bool,
    /// Number of canonical restrictions seeded, if seeding ran.
    pub restrictions_seeded: Option<usize>,
    /// Whether a configuration file was created.
    pub config_created: bool,
    /// Path to the data directory.
    pub data_dir: PathBuf,
}

const DEFAULT_CONFIG_TEMPLATE: &str = r"# Seating configuration file

# Length of every reservation in hours (default: 2)
# reservation_hours: 2

# Maximum time to wait for the database write lock, in seconds (default: 5)
# maximum_lock_wait_seconds: 5

# Fail instead of creating a missing database (default: false)
# disable_autoinit: false

# Output format for find and list: human or json (default: human)
# output_format: human
";

/// Initializes the data directory and database.
///
/// Running it against an existing database is harmless: the schema is
/// verified, seeding is idempotent and an existing config file is kept.
///
/// # Errors
///
/// Returns an error if the directory or config file cannot be written, or
/// the database cannot be opened or seeded.
///
/// # Examples
///
/// ```
/// use seating::operations::{init_database, InitOptions};
///
/// let dir = tempfile::tempdir().unwrap();
/// let result = init_database(&InitOptions::new(dir.path().join("data"))).unwrap();
/// assert!(result.data_dir_created);
/// assert_eq!(result.restrictions_seeded, Some(5));
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_created: false,
        restrictions_seeded: None,
        config_created: false,
        data_dir: options.data_dir.clone(),
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE_NAME);
    result.database_created = !db_path.exists();

    let db = Database::open(DatabaseConfig::new(&db_path))?;
    if options.seed {
        result.restrictions_seeded = Some(seed_restrictions(db.connection())?);
    }

    if options.create_config {
        let config_path = options.data_dir.join("config.yaml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
            result.config_created = true;
        }
    }

    log::info!("Initialized seating data in {}", options.data_dir.display());
    Ok(result)
}
