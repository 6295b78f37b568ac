//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `SEATING_*` environment variables that
//! override configuration file values.

use std::env;

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};

/// Environment variable for the reservation length in hours.
pub const RESERVATION_HOURS_ENV: &str = "SEATING_RESERVATION_HOURS";
/// Environment variable for the database lock wait.
pub const LOCK_WAIT_ENV: &str = "SEATING_MAXIMUM_LOCK_WAIT_SECONDS";
/// Environment variable disabling database auto-initialization.
pub const DISABLE_AUTOINIT_ENV: &str = "SEATING_DISABLE_AUTOINIT";
/// Environment variable for the output format.
pub const OUTPUT_FORMAT_ENV: &str = "SEATING_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use seating::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g. non-numeric hours, invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(hours) = env::var(RESERVATION_HOURS_ENV) {
            config.reservation_hours = Some(hours.trim().parse().map_err(|_| Error::Validation {
                field: RESERVATION_HOURS_ENV.into(),
                message: "Must be a positive integer".into(),
            })?);
        }

        if let Ok(seconds) = env::var(LOCK_WAIT_ENV) {
            config.maximum_lock_wait_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::Validation {
                    field: LOCK_WAIT_ENV.into(),
                    message: "Must be a positive integer".into(),
                })?);
        }

        if let Ok(val) = env::var(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        if let Ok(format) = env::var(OUTPUT_FORMAT_ENV) {
            config.output_format = Some(format.trim().parse::<OutputFormat>().map_err(
                |message| Error::Validation {
                    field: OUTPUT_FORMAT_ENV.into(),
                    message,
                },
            )?);
        }

        Ok(())
    }

    /// Parse a boolean from environment variable.
    ///
    /// Accepts: true/false, 1/0, yes/no, on/off (case-insensitive).
    fn parse_bool(var_name: &str, value: &str) -> Result<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: var_name.into(),
                message: format!("Invalid boolean value: {value}"),
            }),
        }
    }
}
