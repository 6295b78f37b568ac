//! Error types for the seating library.
//!
//! Every fallible operation in the crate returns [`Result`]. A booking that
//! finds no free table is *not* an error: it is reported as
//! [`BookingOutcome::NotAvailable`](crate::operations::BookingOutcome), so
//! callers can tell a legitimate "no match" apart from a failing store.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a seating error.
///
/// # Examples
///
/// ```
/// use seating::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(4)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the seating library.
#[derive(Debug, Error)]
pub enum Error {
    /// The request itself is malformed (no diners, duplicate diners, ...).
    #[error("invalid request for '{field}': {message}")]
    InvalidRequest {
        /// The request field that failed validation.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// The requested entity does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A database lock could not be acquired within the busy timeout.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A CSV input could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration or imported data failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A stored timestamp is outside the representable range.
    #[error("invalid timestamp: {secs} seconds since epoch")]
    InvalidTimestamp {
        /// The raw stored value.
        secs: i64,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },
}

impl From<crate::request::ValidationError> for Error {
    fn from(err: crate::request::ValidationError) -> Self {
        Self::InvalidRequest {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Builds a [`Error::NotFound`] for the given resource description.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Check if error indicates a missing entity.
    ///
    /// # Examples
    ///
    /// ```
    /// use seating::Error;
    ///
    /// let err = Error::not_found("reservation 999");
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error originates from the underlying store rather than the request.
    ///
    /// # Examples
    ///
    /// ```
    /// use seating::Error;
    ///
    /// let err = Error::LockTimeout { seconds: 5 };
    /// assert!(err.is_store_failure());
    /// assert!(!Error::not_found("reservation 1").is_store_failure());
    /// ```
    #[must_use]
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::LockTimeout { .. }
                | Self::DatabaseCorruption { .. }
                | Self::UnsupportedSchemaVersion { .. }
                | Self::InvalidTimestamp { .. }
        )
    }

    /// Maps a `SQLITE_BUSY` failure onto [`Error::LockTimeout`].
    ///
    /// Any other error is returned unchanged.
    #[must_use]
    pub fn with_lock_timeout(self, seconds: u64) -> Self {
        match self {
            Self::Database(rusqlite::Error::SqliteFailure(ref failure, _))
                if failure.code == rusqlite::ErrorCode::DatabaseBusy =>
            {
                Self::LockTimeout { seconds }
            }
            other => other,
        }
    }
}
