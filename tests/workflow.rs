//! End-to-end: persist readings and services, then rank what is due.

use chrono::{Duration, NaiveDate};
use maintlog::engine::catalog::Catalog;
use maintlog::engine::config::Config;
use maintlog::engine::db::Db;
use maintlog::engine::repo::ServiceRepo;
use maintlog::engine::schedule::{compute_due_items, require_distance, summarize};
use maintlog::engine::status::DueStatus;
use maintlog::engine::types::{Interval, MaintenanceTaskDef};
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

#[test]
fn fresh_log_marks_everything_overdue() {
    let tmp = TempDir::new().unwrap();
    let conn = Db::init(tmp.path()).unwrap();
    let repo = ServiceRepo::new(&conn);
    repo.write_current_distance(12_345.0).unwrap();

    let catalog = Catalog::default();
    let current = require_distance(repo.read_current_distance().unwrap()).unwrap();
    let records = repo.read_service_records().unwrap();
    let items = compute_due_items(&catalog, current, today(), &records).unwrap();

    assert_eq!(summarize(&items).overdue, catalog.len());
    for item in &items {
        if item.def.interval.distance.is_some() {
            assert_eq!(item.distance_remaining, Some(0.0));
        }
    }
}

#[test]
fn logged_services_change_the_ranking() {
    let tmp = TempDir::new().unwrap();
    let conn = Db::init(tmp.path()).unwrap();
    let repo = ServiceRepo::new(&conn);

    let catalog = Catalog::new(vec![
        MaintenanceTaskDef::new("oil_change", "Oil change", Interval::distance(5000.0))
            .with_leads(500.0, 0),
        MaintenanceTaskDef::new("brake_fluid", "Brake fluid", Interval::days(1095))
            .with_leads(0.0, 30),
        MaintenanceTaskDef::new("cvt_fluid", "CVT fluid", Interval::distance(35_000.0))
            .with_leads(1500.0, 0),
    ])
    .unwrap();

    repo.append_service_record("oil_change", Some(10_000.0), Some(today() - Duration::days(90)))
        .unwrap();
    repo.append_service_record("brake_fluid", None, Some(today() - Duration::days(1100)))
        .unwrap();
    repo.append_service_record("cvt_fluid", Some(0.0), Some(today() - Duration::days(400)))
        .unwrap();
    repo.write_current_distance(14_600.0).unwrap();

    let records = repo.read_service_records().unwrap();
    let current = repo.read_current_distance().unwrap().unwrap();
    let items = compute_due_items(&catalog, current, today(), &records).unwrap();

    let ranked: Vec<_> = items.iter().map(|i| (i.def.key.as_str(), i.status)).collect();
    assert_eq!(
        ranked,
        [
            ("brake_fluid", DueStatus::Overdue),
            ("oil_change", DueStatus::DueSoon),
            ("cvt_fluid", DueStatus::Ok),
        ]
    );
    assert_eq!(items[0].days_remaining, Some(-5));
    assert_eq!(items[1].distance_remaining, Some(400.0));

    // A fresh oil change clears the warning; the older record is ignored.
    repo.append_service_record("oil_change", Some(14_600.0), Some(today()))
        .unwrap();
    let records = repo.read_service_records().unwrap();
    let items = compute_due_items(&catalog, current, today(), &records).unwrap();
    let oil = items.iter().find(|i| i.def.key == "oil_change").unwrap();
    assert_eq!(oil.status, DueStatus::Ok);
    assert_eq!(oil.distance_remaining, Some(5000.0));
}

#[test]
fn custom_catalog_is_picked_up_from_state_dir() {
    let tmp = TempDir::new().unwrap();
    let config = Config::new(Some(tmp.path().to_path_buf()));
    std::fs::write(
        config.catalog_path(),
        r#"[{"key":"wipers","title":"Wiper blades","interval":{"days":365},"lead_days":21}]"#,
    )
    .unwrap();

    let catalog = config.load_catalog().unwrap();
    let items = compute_due_items(&catalog, 0.0, today(), &[]).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].def.key, "wipers");
    assert_eq!(items[0].days_remaining, Some(0));
    assert_eq!(items[0].distance_remaining, None);
}

#[test]
fn missing_odometer_is_invalid_input() {
    let conn = Db::open_in_memory().unwrap();
    let repo = ServiceRepo::new(&conn);
    assert!(require_distance(repo.read_current_distance().unwrap()).is_err());
}
