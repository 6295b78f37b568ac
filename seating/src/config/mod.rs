//! Configuration system for seating.
//!
//! This module provides layered configuration with support for:
//! - a YAML configuration file in the data directory
//! - environment variable overrides
//! - programmatic configuration via builder pattern
//!
//! # Configuration Precedence
//!
//! Highest to lowest:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`SEATING_*`)
//! 3. `<data_dir>/config.yaml`
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use seating::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! let policy = config.booking_policy().unwrap();
//! println!("Reservations last {} hours", policy.duration().num_hours());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE_NAME};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, DEFAULT_LOCK_WAIT_SECONDS};
pub use validator::ConfigValidator;
