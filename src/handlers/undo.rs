//! Handler for the `undo` command.

use anyhow::Result;
use colored::Colorize;
use maintlog::engine::config::Config;
use maintlog::engine::db::Db;
use maintlog::engine::repo::ServiceRepo;

use super::display::format_date;

/// Deletes a service record by id.
///
/// # Errors
/// Returns error if the record does not exist or the delete fails.
pub fn handle(config: &Config, id: i64) -> Result<()> {
    let conn = Db::connect(config.dir())?;
    let removed = ServiceRepo::new(&conn).delete(id)?;
    println!(
        "{} Removed #{} [{}] from {}",
        "✓".green(),
        id,
        removed.key.yellow(),
        format_date(removed.done_at_date)
    );
    Ok(())
}
