//! Core types for the maintenance engine.
//!
//! Note: `DueStatus` (the computed urgency) lives in `status.rs`.
//! Everything here is plain data; the engine never mutates it.

use super::error::EngineError;
use super::status::DueStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How often a task recurs. Either dimension may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Due every `distance` units of odometer travel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Due every `days` calendar days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
}

impl Interval {
    #[must_use]
    pub fn distance(distance: f64) -> Self {
        Self {
            distance: Some(distance),
            days: None,
        }
    }

    #[must_use]
    pub fn days(days: i64) -> Self {
        Self {
            distance: None,
            days: Some(days),
        }
    }

    #[must_use]
    pub fn both(distance: f64, days: i64) -> Self {
        Self {
            distance: Some(distance),
            days: Some(days),
        }
    }

    /// True when neither dimension is set. Such a task is never due.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distance.is_none() && self.days.is_none()
    }
}

/// A recurring maintenance item in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceTaskDef {
    pub key: String,
    pub title: String,
    pub interval: Interval,
    #[serde(default)]
    pub lead_distance: f64,
    #[serde(default)]
    pub lead_days: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MaintenanceTaskDef {
    #[must_use]
    pub fn new(key: &str, title: &str, interval: Interval) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            interval,
            lead_distance: 0.0,
            lead_days: 0,
            notes: None,
        }
    }

    #[must_use]
    pub fn with_leads(mut self, lead_distance: f64, lead_days: i64) -> Self {
        self.lead_distance = lead_distance;
        self.lead_days = lead_days;
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}

/// One completed service, as logged by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Storage identity. Grows with insertion order.
    pub id: i64,
    pub key: String,
    pub done_at_distance: Option<f64>,
    pub done_at_date: Option<NaiveDate>,
}

/// Computed status of one catalog task. Recomputed on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DueItem<'a> {
    pub def: &'a MaintenanceTaskDef,
    pub status: DueStatus,
    /// Present iff the def has a distance interval.
    pub distance_remaining: Option<f64>,
    /// Present iff the def has a time interval.
    pub days_remaining: Option<i64>,
}

impl DueItem<'_> {
    /// Smallest present remaining value, used to rank within a status group.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn closest_remaining(&self) -> Option<f64> {
        let days = self.days_remaining.map(|d| d as f64);
        match (self.distance_remaining, days) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

/// Normalizes a date-like string to a calendar date.
///
/// Accepts `YYYY-MM-DD` or any longer ISO-8601 timestamp; only the date
/// portion is kept.
///
/// # Errors
/// Returns `InvalidInput` if the leading ten characters are not a date.
pub fn parse_date(input: &str) -> Result<NaiveDate, EngineError> {
    let trimmed = input.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| EngineError::invalid(format!("malformed date '{input}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(def: &MaintenanceTaskDef, distance: Option<f64>, days: Option<i64>) -> DueItem<'_> {
        DueItem {
            def,
            status: DueStatus::Ok,
            distance_remaining: distance,
            days_remaining: days,
        }
    }

    #[test]
    fn test_parse_plain_date() {
        let d = parse_date("2024-03-09").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }

    #[test]
    fn test_parse_full_timestamp_keeps_date() {
        let d = parse_date("2024-03-09T23:59:59.000Z").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_date("yesterday"),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(parse_date("2024-13-01").is_err());
    }

    #[test]
    fn test_closest_remaining() {
        let def = MaintenanceTaskDef::new("x", "X", Interval::both(5000.0, 180));
        assert_eq!(item(&def, Some(400.0), Some(90)).closest_remaining(), Some(90.0));
        assert_eq!(item(&def, None, Some(-3)).closest_remaining(), Some(-3.0));
        assert_eq!(item(&def, Some(12.5), None).closest_remaining(), Some(12.5));
        assert_eq!(item(&def, None, None).closest_remaining(), None);
    }

    #[test]
    fn test_def_deserializes_with_defaults() {
        let json = r#"{"key":"wipers","title":"Wiper blades","interval":{"days":365}}"#;
        let def: MaintenanceTaskDef = serde_json::from_str(json).unwrap();
        assert_eq!(def.interval, Interval::days(365));
        assert_eq!(def.lead_days, 0);
        assert!(def.notes.is_none());
    }
}
