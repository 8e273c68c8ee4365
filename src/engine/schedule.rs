//! Due-status computation: the single entry point of the engine.
//!
//! Pure function over a snapshot. Validation happens up front so the result
//! is all-or-nothing.

use super::catalog::Catalog;
use super::error::EngineError;
use super::history::latest_by_key;
use super::rank::rank_items;
use super::remaining::remaining_for;
use super::status::{classify, DueStatus};
use super::types::{DueItem, ServiceRecord};
use chrono::NaiveDate;
use serde::Serialize;

/// Computes one ranked `DueItem` per catalog entry.
///
/// # Errors
/// Returns `InvalidInput` if `current_distance` is not finite.
pub fn compute_due_items<'a>(
    catalog: &'a Catalog,
    current_distance: f64,
    reference_date: NaiveDate,
    records: &[ServiceRecord],
) -> Result<Vec<DueItem<'a>>, EngineError> {
    if !current_distance.is_finite() {
        return Err(EngineError::invalid(format!(
            "current distance must be a finite number, got {current_distance}"
        )));
    }

    let latest = latest_by_key(records);

    let mut items: Vec<_> = catalog
        .iter()
        .map(|def| {
            let last = latest.get(def.key.as_str()).copied();
            let rem = remaining_for(def, last, current_distance, reference_date);
            DueItem {
                def,
                status: classify(rem.distance, rem.days, def.lead_distance, def.lead_days),
                distance_remaining: rem.distance,
                days_remaining: rem.days,
            }
        })
        .collect();

    rank_items(&mut items);
    Ok(items)
}

/// Turns an optional stored reading into engine input.
///
/// # Errors
/// Returns `InvalidInput` when no reading has been recorded.
pub fn require_distance(reading: Option<f64>) -> Result<f64, EngineError> {
    reading.ok_or_else(|| EngineError::invalid("current distance has not been recorded"))
}

/// Aggregate counts of items by status.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DueSummary {
    pub overdue: usize,
    pub due_soon: usize,
    pub ok: usize,
}

impl DueSummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.overdue + self.due_soon + self.ok
    }
}

#[must_use]
pub fn summarize(items: &[DueItem<'_>]) -> DueSummary {
    let mut counts = DueSummary::default();
    for item in items {
        match item.status {
            DueStatus::Overdue => counts.overdue += 1,
            DueStatus::DueSoon => counts.due_soon += 1,
            DueStatus::Ok => counts.ok += 1,
        }
    }
    counts
}
