//! Handler for the `init` command.

use anyhow::Result;
use colored::Colorize;
use maintlog::engine::catalog::Catalog;
use maintlog::engine::config::Config;
use maintlog::engine::db::{Db, DB_FILE};

/// Initializes the state directory and database.
///
/// # Errors
/// Returns error if database initialization or the catalog write fails.
pub fn handle(config: &Config, write_catalog: bool) -> Result<()> {
    Db::init(config.dir())?;
    println!(
        "{} Initialized {}",
        "✓".green(),
        config.dir().join(DB_FILE).display()
    );

    if write_catalog {
        if config.catalog_path().exists() {
            println!(
                "   {} kept existing {}",
                "ℹ".cyan(),
                config.catalog_path().display()
            );
        } else {
            let path = config.write_catalog(&Catalog::default())?;
            println!("   {} wrote default schedule to {}", "✓".green(), path.display());
        }
    }
    Ok(())
}
