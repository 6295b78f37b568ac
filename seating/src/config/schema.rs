//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::request::{BookingPolicy, DEFAULT_RESERVATION_HOURS};

/// Default number of seconds to wait for the database write lock.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that layers can be merged; accessors apply
/// the built-in defaults.
///
/// # Examples
///
/// ```
/// use seating::config::Config;
///
/// let config = Config {
///     reservation_hours: Some(3),
///     ..Default::default()
/// };
/// assert_eq!(config.booking_policy().unwrap().duration().num_hours(), 3);
/// assert_eq!(Config::default().booking_policy().unwrap().duration().num_hours(), 2);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Length of every reservation, in hours.
    pub reservation_hours: Option<u32>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Output format for find and list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Builds the booking policy described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`](crate::Error::InvalidRequest) if
    /// `reservation_hours` is zero.
    pub fn booking_policy(&self) -> Result<BookingPolicy> {
        Ok(BookingPolicy::from_hours(
            self.reservation_hours.unwrap_or(DEFAULT_RESERVATION_HOURS),
        )?)
    }

    /// Busy timeout for database connections.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// Output format, defaulting to human-readable.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }
}

/// Output format for find and list commands.
///
/// # Examples
///
/// ```
/// use seating::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// assert_eq!("human".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Human,
    /// JSON output format.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected human or json)")),
        }
    }
}
