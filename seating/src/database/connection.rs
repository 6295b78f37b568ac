//! Database connection management.
//!
//! Opens `SQLite` with WAL journaling, a busy timeout and foreign keys
//! enabled, then verifies the schema version.

use rusqlite::{Connection, OpenFlags};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// A database connection wrapper with configuration.
///
/// # Examples
///
/// ```no_run
/// use seating::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/seating.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory if `auto_create` is enabled
    /// - Open the database with appropriate flags
    /// - Set WAL mode for concurrent access
    /// - Configure busy timeout and foreign keys
    /// - Initialize or verify the database schema
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataDirectoryNotFound`] if the file is missing and
    /// `auto_create` is off, or a database error if opening or schema
    /// verification fails.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if !config.path.exists() {
            if !config.auto_create {
                return Err(Error::DataDirectoryNotFound {
                    path: config.path.clone(),
                });
            }
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;

        Self::configure(&conn, &config)?;
        // PRAGMA journal_mode returns a row, so it cannot go through execute_batch.
        if !config.read_only {
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        }

        if config.read_only {
            let version = super::migrations::get_schema_version(&conn)?;
            if version != super::schema::CURRENT_SCHEMA_VERSION {
                return Err(Error::UnsupportedSchemaVersion {
                    expected: super::schema::CURRENT_SCHEMA_VERSION,
                    found: version,
                });
            }
        } else {
            super::migrations::check_schema_compatibility(&conn)?;
        }

        log::debug!("Opened database at {}", config.path.display());
        Ok(Self { conn, config })
    }

    /// Opens a private in-memory database with the schema initialized.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    ///
    /// # Examples
    ///
    /// ```
    /// use seating::Database;
    ///
    /// let db = Database::open_in_memory().unwrap();
    /// assert!(Database::list_restaurants(db.connection()).unwrap().is_empty());
    /// ```
    pub fn open_in_memory() -> Result<Self> {
        let config = DatabaseConfig::new(":memory:");
        let conn = Connection::open_in_memory()?;
        Self::configure(&conn, &config)?;
        super::migrations::check_schema_compatibility(&conn)?;
        Ok(Self { conn, config })
    }

    fn configure(conn: &Connection, config: &DatabaseConfig) -> Result<()> {
        conn.execute_batch("PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(config.busy_timeout)?;
        Ok(())
    }

    /// Returns the configuration this database was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Busy timeout in whole seconds, as reported by [`Error::LockTimeout`].
    #[must_use]
    pub fn busy_timeout_secs(&self) -> u64 {
        self.config.busy_timeout.as_secs()
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns a mutable reference to the underlying `SQLite` connection.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
