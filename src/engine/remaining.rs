//! Remaining-Interval Calculator.
//!
//! A dimension without a baseline (no record, or a record missing that
//! field) counts as due now: remaining is zero, never "far from due".

use super::types::{MaintenanceTaskDef, ServiceRecord};
use chrono::NaiveDate;

/// Remaining values for one task. `None` means the dimension is not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Remaining {
    pub distance: Option<f64>,
    pub days: Option<i64>,
}

/// Computes both remaining dimensions for a task.
#[must_use]
pub fn remaining_for(
    def: &MaintenanceTaskDef,
    last: Option<&ServiceRecord>,
    current_distance: f64,
    reference_date: NaiveDate,
) -> Remaining {
    Remaining {
        distance: distance_remaining(def, last, current_distance),
        days: days_remaining(def, last, reference_date),
    }
}

/// Distance left until the next due point; negative once passed.
#[must_use]
pub fn distance_remaining(
    def: &MaintenanceTaskDef,
    last: Option<&ServiceRecord>,
    current_distance: f64,
) -> Option<f64> {
    let interval = def.interval.distance?;
    let remaining = match last.and_then(|r| r.done_at_distance) {
        Some(done_at) => (done_at + interval) - current_distance,
        None => 0.0,
    };
    Some(remaining)
}

/// Days left until the next due date; negative once passed.
#[must_use]
pub fn days_remaining(
    def: &MaintenanceTaskDef,
    last: Option<&ServiceRecord>,
    reference_date: NaiveDate,
) -> Option<i64> {
    let interval = def.interval.days?;
    let remaining = match last.and_then(|r| r.done_at_date) {
        Some(done_on) => interval.saturating_sub(days_between(done_on, reference_date)),
        None => 0,
    };
    Some(remaining)
}

/// Whole days from `from` to `to`. Negative when `to` is earlier.
#[must_use]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
