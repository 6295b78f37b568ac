//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the seating data directory and database.

use crate::error::CliError;
use crate::utils::{data_dir, shorten_path, GlobalOptions};
use clap::Parser;
use seating::config::CONFIG_FILE_NAME;
use seating::database::DATABASE_FILE_NAME;
use seating::operations::{init_database, InitOptions};

/// Initialize seating data directory and database.
#[derive(Parser)]
#[command(about = "Initialize seating data directory and database")]
pub struct InitCommand {
    /// Skip seeding the canonical dietary restrictions
    #[arg(long)]
    no_seed: bool,

    /// Create default configuration file
    #[arg(long)]
    with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// Note: --disable-autoinit is ignored here; creating the database is the point.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = data_dir(global)?;

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize seating in: {}", shorten_path(&data_dir));

            if data_dir.exists() {
                println!("  - Data directory already exists");
            } else {
                println!("  - Create data directory");
            }

            let db_path = data_dir.join(DATABASE_FILE_NAME);
            if db_path.exists() {
                println!("  - Verify existing database: {}", db_path.display());
            } else {
                println!("  - Create database: {}", db_path.display());
            }

            if !self.no_seed {
                println!("  - Seed canonical dietary restrictions");
            }

            if self.with_config {
                let config_path = data_dir.join(CONFIG_FILE_NAME);
                if config_path.exists() {
                    println!(
                        "  - Configuration file already exists (will not overwrite): {}",
                        config_path.display()
                    );
                } else {
                    println!("  - Create configuration file: {}", config_path.display());
                }
            }

            return Ok(());
        }

        let options = InitOptions::new(data_dir)
            .with_seed(!self.no_seed)
            .with_create_config(self.with_config);
        let result = init_database(&options).map_err(CliError::from)?;

        println!("Initialized seating in: {}", shorten_path(&result.data_dir));

        if result.data_dir_created {
            println!("  - Created data directory");
        }

        if result.database_created {
            println!("  - Created database");
        }

        if let Some(count) = result.restrictions_seeded {
            println!("  - Seeded {count} dietary restriction(s)");
        }

        if result.config_created {
            println!("  - Created default configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }

        Ok(())
    }
}
