//! Core engine modules for maintlog.
//!
//! `schedule::compute_due_items` is the pure entry point. `db`, `repo` and
//! `config` are the storage side that snapshots its inputs.

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod history;
pub mod rank;
pub mod remaining;
pub mod repo;
pub mod resolver;
pub mod schedule;
pub mod status;
pub mod types;
