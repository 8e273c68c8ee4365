//! Handler for the `due` command.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::Colorize;
use maintlog::engine::config::Config;
use maintlog::engine::db::Db;
use maintlog::engine::repo::ServiceRepo;
use maintlog::engine::schedule::{compute_due_items, require_distance, summarize, DueSummary};
use maintlog::engine::types::{parse_date, DueItem};
use serde::Serialize;
use tracing::debug;

use super::display::{
    format_days_remaining, format_distance, format_distance_remaining, status_icon, status_label,
};

/// Shows every task ranked by urgency.
///
/// # Errors
/// Returns error if the date is malformed, no odometer reading exists, or
/// storage cannot be read.
pub fn handle(config: &Config, date: Option<&str>, json: bool) -> Result<()> {
    let reference_date = match date {
        Some(d) => parse_date(d)?,
        None => chrono::Utc::now().date_naive(),
    };

    let catalog = config.load_catalog()?;
    let conn = Db::connect(config.dir())?;
    let repo = ServiceRepo::new(&conn);

    let current_distance = require_distance(repo.read_current_distance()?)
        .context("Set the odometer first with `maintlog odometer <VALUE>`")?;
    let records = repo.read_service_records()?;
    debug!(%reference_date, current_distance, records = records.len(), "computing due items");

    let items = compute_due_items(&catalog, current_distance, reference_date, &records)?;
    let summary = summarize(&items);

    if json {
        return print_json(reference_date, current_distance, summary, &items);
    }

    print_human(reference_date, current_distance, summary, &items);
    Ok(())
}

#[derive(Serialize)]
struct DueReport<'a> {
    reference_date: NaiveDate,
    current_distance: f64,
    summary: DueSummary,
    items: &'a [DueItem<'a>],
}

fn print_json(
    reference_date: NaiveDate,
    current_distance: f64,
    summary: DueSummary,
    items: &[DueItem<'_>],
) -> Result<()> {
    let report = DueReport {
        reference_date,
        current_distance,
        summary,
        items,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_human(
    reference_date: NaiveDate,
    current_distance: f64,
    summary: DueSummary,
    items: &[DueItem<'_>],
) {
    println!(
        "{} Maintenance Status  {}",
        "🔧".cyan(),
        format!(
            "{} · odometer {}",
            reference_date.format("%Y-%m-%d"),
            format_distance(current_distance)
        )
        .dimmed()
    );
    println!(
        "   {} overdue, {} due soon, {} ok",
        summary.overdue.to_string().red(),
        summary.due_soon.to_string().yellow(),
        summary.ok.to_string().green()
    );
    println!();

    for item in items {
        println!(
            "   {} [{}] {} ({})",
            status_icon(item.status),
            item.def.key.yellow(),
            item.def.title,
            status_label(item.status)
        );
        println!(
            "      distance left: {:<22} days left: {}",
            format_distance_remaining(item.distance_remaining),
            format_days_remaining(item.days_remaining)
        );
        if item.def.interval.is_empty() {
            println!("      {}", "(no interval set, never due)".dimmed());
        }
        if let Some(notes) = &item.def.notes {
            println!("      {}", notes.dimmed());
        }
    }

    if items.is_empty() {
        println!("   (Catalog is empty)");
    } else if !items.iter().any(|i| i.status.needs_attention()) {
        println!("\n   {} All caught up.", "✓".green());
    }
}
