//! Status Classifier: maps remaining distance/time to an urgency state.
//!
//! Pure function of the remaining values and the task's lead thresholds.

use serde::{Deserialize, Serialize};

/// Urgency of a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DueStatus {
    /// Some dimension has reached or passed its due point
    Overdue,
    /// Some dimension is within its lead window
    DueSoon,
    /// Nothing to do yet
    Ok,
}

impl DueStatus {
    /// Sort rank: lower is more urgent.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            DueStatus::Overdue => 0,
            DueStatus::DueSoon => 1,
            DueStatus::Ok => 2,
        }
    }

    /// Returns true if the user should act on this task now.
    #[must_use]
    pub fn needs_attention(&self) -> bool {
        matches!(self, DueStatus::Overdue | DueStatus::DueSoon)
    }
}

impl std::fmt::Display for DueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DueStatus::Overdue => write!(f, "OVERDUE"),
            DueStatus::DueSoon => write!(f, "DUE_SOON"),
            DueStatus::Ok => write!(f, "OK"),
        }
    }
}

/// Classifies a task from its remaining values.
///
/// An absent dimension never triggers. With both absent the result is
/// always `Ok`.
#[must_use]
pub fn classify(
    distance_remaining: Option<f64>,
    days_remaining: Option<i64>,
    lead_distance: f64,
    lead_days: i64,
) -> DueStatus {
    let distance_overdue = distance_remaining.is_some_and(|d| d <= 0.0);
    let days_overdue = days_remaining.is_some_and(|d| d <= 0);
    if distance_overdue || days_overdue {
        return DueStatus::Overdue;
    }

    let distance_soon = distance_remaining.is_some_and(|d| d <= lead_distance);
    let days_soon = days_remaining.is_some_and(|d| d <= lead_days);
    if distance_soon || days_soon {
        return DueStatus::DueSoon;
    }

    DueStatus::Ok
}
