//! Handler for the `tasks` command.

use anyhow::Result;
use colored::Colorize;
use maintlog::engine::config::Config;

use super::display::{format_distance, format_interval};

/// Lists the catalog in display order.
///
/// # Errors
/// Returns error if a custom catalog cannot be loaded.
pub fn handle(config: &Config) -> Result<()> {
    let catalog = config.load_catalog()?;

    println!("{} Maintenance Schedule:", "📋".cyan());

    for def in &catalog {
        println!(
            "   [{}] {} ({})",
            def.key.blue(),
            def.title,
            format_interval(&def.interval).dimmed()
        );
        let mut leads = Vec::new();
        if def.interval.distance.is_some() {
            leads.push(format_distance(def.lead_distance));
        }
        if def.interval.days.is_some() {
            leads.push(format!("{} days", def.lead_days));
        }
        if !leads.is_empty() {
            println!("      warn within {}", leads.join(" / ").dimmed());
        }
        if let Some(notes) = &def.notes {
            println!("      {}", notes.dimmed());
        }
    }
    Ok(())
}
