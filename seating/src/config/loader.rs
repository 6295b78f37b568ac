//! Configuration file loading.
//!
//! The only configuration file is `<data_dir>/config.yaml`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from files.
///
/// # Examples
///
/// ```no_run
/// use seating::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Some(Path::new("/var/lib/seating"))).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads every configuration file that exists, lowest precedence first.
    ///
    /// If `data_dir` is `None` the resolved data directory is used.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be read or
    /// parsed.
    pub fn load_all(data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let config_path = match data_dir {
            Some(dir) => dir.join(CONFIG_FILE_NAME),
            None => crate::database::resolve_data_dir()?.join(CONFIG_FILE_NAME),
        };

        if !config_path.exists() {
            log::debug!("No configuration file at {}", config_path.display());
            return Ok(Vec::new());
        }

        let config = Self::load_file(&config_path)?;
        Ok(vec![ConfigSource {
            path: config_path,
            precedence: 1,
            config,
        }])
    }

    /// Load and parse a YAML configuration file.
    ///
    /// A file holding only comments is an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read configuration file: {e}"),
        })?;

        let blank = contents.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        if blank {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&contents).map_err(|e| {
            log::warn!("Invalid configuration file {}", path.display());
            Error::from(e)
        })
    }
}
