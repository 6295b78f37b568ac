//! Database configuration and connection parameters.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SEATING_DATA_DIR";

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "seating.db";

/// Configuration for database connections.
///
/// # Examples
///
/// ```
/// use seating::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/seating.db")
///     .with_busy_timeout(Duration::from_millis(10000));
/// assert!(config.auto_create);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// Busy timeout for database lock contention.
    pub busy_timeout: Duration,
    /// Whether to automatically create the database if it doesn't exist.
    pub auto_create: bool,
    /// Whether to open the database in read-only mode.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Default settings:
    /// - `busy_timeout`: 5000ms
    /// - `auto_create`: true
    /// - `read_only`: false
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout duration.
    ///
    /// The busy timeout determines how long a booking waits for a competing
    /// writer before giving up with [`Error::LockTimeout`].
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Disables creation of a missing database file.
    #[must_use]
    pub fn without_auto_create(mut self) -> Self {
        self.auto_create = false;
        self
    }

    /// Configures the database to be opened in read-only mode.
    ///
    /// When read-only is enabled, `auto_create` is automatically disabled.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Returns the default data directory, `~/.seating`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".seating"))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "Cannot determine home directory".into(),
        })
}

/// Resolves the data directory from `SEATING_DATA_DIR` or the default.
///
/// # Errors
///
/// Returns an error if the variable is unset and the home directory cannot be
/// determined.
pub fn resolve_data_dir() -> Result<PathBuf> {
    match std::env::var(DATA_DIR_ENV) {
        Ok(dir) => Ok(PathBuf::from(dir)),
        Err(_) => default_data_dir(),
    }
}

/// Resolves the database path inside the resolved data directory.
///
/// # Errors
///
/// See [`resolve_data_dir`].
pub fn resolve_database_path() -> Result<PathBuf> {
    Ok(resolve_data_dir()?.join(DATABASE_FILE_NAME))
}
