//! Handler for the `log` command.

use anyhow::{bail, Result};
use colored::Colorize;
use maintlog::engine::config::Config;
use maintlog::engine::db::Db;
use maintlog::engine::repo::ServiceRepo;
use maintlog::engine::resolver::TaskResolver;
use maintlog::engine::types::parse_date;
use tracing::{info, warn};

use super::display::{format_date, format_distance};

/// Records a completed service for a task.
///
/// # Errors
/// Returns error if the task cannot be resolved, no distance is available,
/// or the write fails.
pub fn handle(
    config: &Config,
    task_ref: &str,
    distance: Option<f64>,
    date: Option<&str>,
    strict: bool,
) -> Result<()> {
    let catalog = config.load_catalog()?;
    let resolver = if strict {
        TaskResolver::strict(&catalog)
    } else {
        TaskResolver::new(&catalog)
    };
    let resolved = resolver.resolve(task_ref)?;
    let def = resolved.def;
    if resolved.confidence < 1.0 {
        info!(query = task_ref, key = %def.key, confidence = resolved.confidence, "fuzzy match");
    }

    let done_on = match date {
        Some(d) => parse_date(d)?,
        None => chrono::Utc::now().date_naive(),
    };

    let mut conn = Db::connect(config.dir())?;
    let tx = conn.transaction()?;
    let repo = ServiceRepo::new(&tx);

    let odometer = repo.read_current_distance()?;
    let done_at = match (distance, odometer) {
        (Some(d), _) => d,
        (None, Some(o)) => o,
        (None, None) => {
            bail!("No odometer reading. Pass --distance or run `maintlog odometer <VALUE>` first.")
        }
    };
    if !done_at.is_finite() || done_at < 0.0 {
        bail!("Distance must be a non-negative number, got {done_at}");
    }

    let id = repo.append_service_record(&def.key, Some(done_at), Some(done_on))?;

    // A service logged past the stored reading means the odometer is stale.
    if odometer.map_or(true, |o| done_at > o) {
        repo.write_current_distance(done_at)?;
    } else if odometer.is_some_and(|o| done_at < o) {
        warn!(done_at, "logged distance is below the current odometer");
    }

    tx.commit()?;
    println!(
        "{} Logged #{} [{}] {} at {} on {}",
        "✓".green(),
        id,
        def.key.yellow(),
        def.title,
        format_distance(done_at).bold(),
        format_date(Some(done_on))
    );
    Ok(())
}
