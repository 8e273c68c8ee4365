//! Service Repository: odometer and service history persistence.
//!
//! Everything the engine needs is read here and handed over as plain
//! values; the engine never touches the connection.

use super::types::{parse_date, ServiceRecord};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info};

const RECORD_SELECT: &str =
    "SELECT id, key, done_at_distance, done_at_date FROM service_records";

type RawRecord = (i64, String, Option<f64>, Option<String>);

/// The stored odometer value and when it was last written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OdometerReading {
    pub distance: f64,
    pub updated_at: String,
}

pub struct ServiceRepo<'a> {
    conn: &'a Connection,
}

impl<'a> ServiceRepo<'a> {
    /// Creates a new repository instance borrowing the connection.
    #[must_use]
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns the stored odometer reading, if any.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn odometer(&self) -> Result<Option<OdometerReading>> {
        self.conn
            .query_row(
                "SELECT distance, updated_at FROM odometer WHERE id = 1",
                [],
                |r| {
                    Ok(OdometerReading {
                        distance: r.get(0)?,
                        updated_at: r.get(1)?,
                    })
                },
            )
            .optional()
            .context("Failed to read odometer")
    }

    /// Returns the stored odometer value, if any.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn read_current_distance(&self) -> Result<Option<f64>> {
        Ok(self.odometer()?.map(|o| o.distance))
    }

    /// Overwrites the odometer value.
    ///
    /// # Errors
    /// Returns an error for non-finite or negative values, or if the write fails.
    pub fn write_current_distance(&self, distance: f64) -> Result<()> {
        if !distance.is_finite() || distance < 0.0 {
            bail!("Odometer reading must be a non-negative number, got {distance}");
        }
        let updated_at = chrono::Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO odometer (id, distance, updated_at) VALUES (1, ?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET distance = excluded.distance, updated_at = excluded.updated_at",
                params![distance, updated_at],
            )
            .context("Failed to write odometer")?;
        info!(distance, "odometer updated");
        Ok(())
    }

    /// Appends a completion record and returns its id.
    ///
    /// # Errors
    /// Returns an error if the insertion fails.
    pub fn append_service_record(
        &self,
        key: &str,
        distance: Option<f64>,
        date: Option<NaiveDate>,
    ) -> Result<i64> {
        let date_text = date.map(|d| d.format("%Y-%m-%d").to_string());
        self.conn
            .execute(
                "INSERT INTO service_records (key, done_at_distance, done_at_date) VALUES (?1, ?2, ?3)",
                params![key, distance, date_text],
            )
            .context("Failed to save service record")?;
        let id = self.conn.last_insert_rowid();
        info!(id, key, ?distance, ?date, "service recorded");
        Ok(id)
    }

    /// All records in insertion order. Empty when nothing has been logged.
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored date is corrupt.
    pub fn read_service_records(&self) -> Result<Vec<ServiceRecord>> {
        let sql = format!("{RECORD_SELECT} ORDER BY id ASC");
        let records = self.query(&sql, params![])?;
        debug!(count = records.len(), "loaded service records");
        Ok(records)
    }

    /// Records for one task, newest service first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn records_for(&self, key: &str) -> Result<Vec<ServiceRecord>> {
        let sql = format!("{RECORD_SELECT} WHERE key = ?1 ORDER BY done_at_date DESC, id DESC");
        self.query(&sql, params![key])
    }

    /// The most recent `limit` records across all tasks, newest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<ServiceRecord>> {
        let sql = format!("{RECORD_SELECT} ORDER BY done_at_date DESC, id DESC LIMIT ?1");
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.query(&sql, params![limit])
    }

    /// Deletes a record by id.
    ///
    /// # Errors
    /// Returns an error if no record has that id or the delete fails.
    pub fn delete(&self, id: i64) -> Result<ServiceRecord> {
        let sql = format!("{RECORD_SELECT} WHERE id = ?1");
        let Some(record) = self.query(&sql, params![id])?.pop() else {
            bail!("No service record with id {id}");
        };
        self.conn
            .execute("DELETE FROM service_records WHERE id = ?1", params![id])
            .context("Failed to delete service record")?;
        info!(id, key = %record.key, "service record deleted");
        Ok(record)
    }

    fn query(&self, sql: &str, args: impl rusqlite::Params) -> Result<Vec<ServiceRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, |r| {
            Ok::<RawRecord, rusqlite::Error>((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?))
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row_to_record(row?)?);
        }
        Ok(records)
    }
}

/// Converts a raw row into a domain record, parsing the stored date.
fn row_to_record((id, key, done_at_distance, date): RawRecord) -> Result<ServiceRecord> {
    let done_at_date = date
        .as_deref()
        .map(parse_date)
        .transpose()
        .with_context(|| format!("Corrupt date on service record {id}"))?;
    Ok(ServiceRecord {
        id,
        key,
        done_at_distance,
        done_at_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::db::Db;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_store() {
        let conn = Db::open_in_memory().unwrap();
        let repo = ServiceRepo::new(&conn);
        assert_eq!(repo.read_current_distance().unwrap(), None);
        assert!(repo.read_service_records().unwrap().is_empty());
    }

    #[test]
    fn test_odometer_overwrites() {
        let conn = Db::open_in_memory().unwrap();
        let repo = ServiceRepo::new(&conn);
        repo.write_current_distance(12_000.0).unwrap();
        repo.write_current_distance(12_345.5).unwrap();
        assert_eq!(repo.read_current_distance().unwrap(), Some(12_345.5));
        assert!(!repo.odometer().unwrap().unwrap().updated_at.is_empty());
    }

    #[test]
    fn test_odometer_rejects_bad_values() {
        let conn = Db::open_in_memory().unwrap();
        let repo = ServiceRepo::new(&conn);
        assert!(repo.write_current_distance(f64::NAN).is_err());
        assert!(repo.write_current_distance(-1.0).is_err());
        assert_eq!(repo.read_current_distance().unwrap(), None);
    }

    #[test]
    fn test_records_keep_insertion_order() {
        let conn = Db::open_in_memory().unwrap();
        let repo = ServiceRepo::new(&conn);
        let a = repo
            .append_service_record("oil_change", Some(10_000.0), Some(date("2024-05-01")))
            .unwrap();
        let b = repo
            .append_service_record("coolant", None, Some(date("2023-01-01")))
            .unwrap();
        let c = repo.append_service_record("oil_change", None, None).unwrap();

        let records = repo.read_service_records().unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, [a, b, c]);
        assert_eq!(records[0].done_at_distance, Some(10_000.0));
        assert_eq!(records[1].done_at_distance, None);
        assert_eq!(records[2].done_at_date, None);
    }

    #[test]
    fn test_records_for_and_recent_newest_first() {
        let conn = Db::open_in_memory().unwrap();
        let repo = ServiceRepo::new(&conn);
        repo.append_service_record("oil_change", Some(1.0), Some(date("2024-01-01")))
            .unwrap();
        repo.append_service_record("oil_change", Some(2.0), Some(date("2023-01-01")))
            .unwrap();
        repo.append_service_record("coolant", Some(3.0), Some(date("2025-01-01")))
            .unwrap();

        let oil = repo.records_for("oil_change").unwrap();
        assert_eq!(oil.len(), 2);
        assert_eq!(oil[0].done_at_distance, Some(1.0));

        let recent = repo.recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].key, "coolant");
    }

    #[test]
    fn test_delete() {
        let conn = Db::open_in_memory().unwrap();
        let repo = ServiceRepo::new(&conn);
        let id = repo
            .append_service_record("spark_plugs", Some(60_000.0), Some(date("2024-01-01")))
            .unwrap();
        let removed = repo.delete(id).unwrap();
        assert_eq!(removed.key, "spark_plugs");
        assert!(repo.read_service_records().unwrap().is_empty());
        assert!(repo.delete(id).is_err());
    }
}
