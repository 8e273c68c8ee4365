//! Service History Index: most recent completion per task key.
//!
//! Selection compares records explicitly instead of trusting input order:
//! later `done_at_date` wins, a dated record beats an undated one, equal
//! dates fall back to the larger `id`, and a full tie keeps the record
//! seen last.

use super::types::ServiceRecord;
use std::collections::HashMap;

/// Reduces raw records to the latest record per task key.
#[must_use]
pub fn latest_by_key(records: &[ServiceRecord]) -> HashMap<&str, &ServiceRecord> {
    let mut latest: HashMap<&str, &ServiceRecord> = HashMap::new();
    for record in records {
        latest
            .entry(record.key.as_str())
            .and_modify(|current| {
                if !is_newer(current, record) {
                    *current = record;
                }
            })
            .or_insert(record);
    }
    latest
}

/// True when `current` is strictly more recent than `candidate`.
fn is_newer(current: &ServiceRecord, candidate: &ServiceRecord) -> bool {
    (current.done_at_date, current.id) > (candidate.done_at_date, candidate.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(id: i64, key: &str, date: Option<&str>) -> ServiceRecord {
        ServiceRecord {
            id,
            key: key.to_string(),
            done_at_distance: Some(id as f64 * 1000.0),
            done_at_date: date.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
        }
    }

    #[test]
    fn test_empty_history() {
        assert!(latest_by_key(&[]).is_empty());
    }

    #[test]
    fn test_picks_latest_date_regardless_of_order() {
        let asc = vec![
            rec(1, "oil_change", Some("2023-01-01")),
            rec(2, "oil_change", Some("2024-01-01")),
        ];
        let desc: Vec<_> = asc.iter().rev().cloned().collect();

        assert_eq!(latest_by_key(&asc)["oil_change"].id, 2);
        assert_eq!(latest_by_key(&desc)["oil_change"].id, 2);
    }

    #[test]
    fn test_backdated_entry_does_not_win() {
        // Logged later but for an earlier service date.
        let records = vec![
            rec(1, "coolant", Some("2024-06-01")),
            rec(2, "coolant", Some("2022-06-01")),
        ];
        assert_eq!(latest_by_key(&records)["coolant"].id, 1);
    }

    #[test]
    fn test_same_date_tie_breaks_on_id() {
        let records = vec![
            rec(7, "tire_rotation", Some("2024-05-05")),
            rec(3, "tire_rotation", Some("2024-05-05")),
        ];
        assert_eq!(latest_by_key(&records)["tire_rotation"].id, 7);
    }

    #[test]
    fn test_full_tie_keeps_later_seen() {
        let mut first = rec(4, "coolant", Some("2024-05-05"));
        first.done_at_distance = Some(90_000.0);
        let mut second = rec(4, "coolant", Some("2024-05-05"));
        second.done_at_distance = Some(91_000.0);

        let records = vec![first.clone(), second.clone()];
        assert_eq!(latest_by_key(&records)["coolant"].done_at_distance, Some(91_000.0));

        let swapped = vec![second, first];
        assert_eq!(latest_by_key(&swapped)["coolant"].done_at_distance, Some(90_000.0));
    }

    #[test]
    fn test_dated_beats_undated() {
        let records = vec![
            rec(1, "spark_plugs", Some("2020-01-01")),
            rec(9, "spark_plugs", None),
        ];
        assert_eq!(latest_by_key(&records)["spark_plugs"].id, 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let records = vec![
            rec(1, "oil_change", Some("2024-01-01")),
            rec(2, "brake_fluid", Some("2021-01-01")),
        ];
        let idx = latest_by_key(&records);
        assert_eq!(idx.len(), 2);
        assert_eq!(idx["brake_fluid"].id, 2);
    }
}
