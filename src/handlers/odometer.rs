//! Handler for the `odometer` command.

use anyhow::Result;
use colored::Colorize;
use maintlog::engine::config::Config;
use maintlog::engine::db::Db;
use maintlog::engine::repo::ServiceRepo;

use super::display::format_distance;

/// Prints the stored reading.
///
/// # Errors
/// Returns error if database query fails.
pub fn show(config: &Config) -> Result<()> {
    let conn = Db::connect(config.dir())?;
    let repo = ServiceRepo::new(&conn);

    match repo.odometer()? {
        Some(reading) => {
            let updated = &reading.updated_at[..19.min(reading.updated_at.len())].replace('T', " ");
            println!(
                "{} Odometer: {}  {}",
                "🚗".cyan(),
                format_distance(reading.distance).bold(),
                format!("(updated {updated})").dimmed()
            );
        }
        None => println!(
            "{} Odometer: {}  run `maintlog odometer <VALUE>`",
            "🚗".cyan(),
            "Not set".yellow()
        ),
    }
    Ok(())
}

/// Stores a new reading.
///
/// # Errors
/// Returns error if the value is rejected or the write fails.
pub fn set(config: &Config, value: f64) -> Result<()> {
    let conn = Db::connect(config.dir())?;
    let repo = ServiceRepo::new(&conn);

    if let Some(previous) = repo.read_current_distance()? {
        if value < previous {
            tracing::warn!(previous, value, "odometer moved backwards");
        }
    }

    repo.write_current_distance(value)?;
    println!("{} Odometer set to {}", "✓".green(), format_distance(value).bold());
    Ok(())
}
