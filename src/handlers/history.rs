//! Handler for the `history` command.

use anyhow::Result;
use colored::Colorize;
use maintlog::engine::config::Config;
use maintlog::engine::db::Db;
use maintlog::engine::repo::ServiceRepo;
use maintlog::engine::resolver::TaskResolver;

use super::display::{format_date, format_distance};

/// Displays recorded services, newest first.
///
/// # Errors
/// Returns error if task resolution or the database query fails.
pub fn handle(config: &Config, task_ref: Option<&str>, limit: usize) -> Result<()> {
    let catalog = config.load_catalog()?;
    let conn = Db::connect(config.dir())?;
    let repo = ServiceRepo::new(&conn);

    let history = match task_ref {
        Some(query) => {
            let def = TaskResolver::new(&catalog).resolve(query)?.def;
            println!("{} Service History: {} (last {})", "📜".cyan(), def.title, limit);
            let mut records = repo.records_for(&def.key)?;
            records.truncate(limit);
            records
        }
        None => {
            println!("{} Service History (last {})", "📜".cyan(), limit);
            repo.recent(limit)?
        }
    };
    println!();

    if history.is_empty() {
        println!("   (No services recorded yet)");
        return Ok(());
    }

    for record in history {
        let title = catalog
            .get(&record.key)
            .map_or_else(|| "(not in catalog)".to_string(), |d| d.title.clone());
        let distance = record
            .done_at_distance
            .map_or_else(|| "-".to_string(), format_distance);

        println!(
            "   {}  {}  {}  {}  {}",
            format!("#{:<4}", record.id).dimmed(),
            format_date(record.done_at_date),
            record.key.bold(),
            title,
            distance.dimmed()
        );
    }

    Ok(())
}
