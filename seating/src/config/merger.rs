//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use seating::config::{Config, ConfigMerger};
///
/// let low = Config { reservation_hours: Some(2), ..Default::default() };
/// let high = Config { reservation_hours: Some(3), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.reservation_hours, Some(3));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge configuration sources, given lowest precedence first.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target. Fields set in `source` win.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.reservation_hours.is_some() {
            target.reservation_hours = source.reservation_hours;
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }
    }
}
