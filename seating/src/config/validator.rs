//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Longest reservation an operator may configure.
pub const MAX_RESERVATION_HOURS: u32 = 24;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use seating::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let zero = Config { reservation_hours: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&zero).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(hours) = config.reservation_hours {
            if hours == 0 || hours > MAX_RESERVATION_HOURS {
                return Err(Error::Validation {
                    field: "reservation_hours".into(),
                    message: format!("Must be between 1 and {MAX_RESERVATION_HOURS}, got {hours}"),
                });
            }
        }

        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        Ok(())
    }
}
