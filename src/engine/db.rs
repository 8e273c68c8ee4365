//! Database bootstrap: directory layout and schema.

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const DB_FILE: &str = "state.db";

pub struct Db;

impl Db {
    /// Creates the state directory and `SQLite` schema under `dir`.
    ///
    /// # Errors
    /// Returns error if directory creation, DB opening, or migration fails.
    pub fn init(dir: &Path) -> Result<Connection> {
        if !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            info!(dir = %dir.display(), "created state directory");
        }

        let db_path = dir.join(DB_FILE);
        let conn = Connection::open(&db_path).context("Failed to open database")?;
        Self::migrate(&conn)?;
        Ok(conn)
    }

    /// Connects to an existing database.
    ///
    /// # Errors
    /// Returns error if the database file does not exist or cannot be opened.
    pub fn connect(dir: &Path) -> Result<Connection> {
        let db_path = dir.join(DB_FILE);
        if !db_path.exists() {
            anyhow::bail!("Maintenance log not initialized. Run `maintlog init` first.");
        }
        debug!(path = %db_path.display(), "opening database");
        let conn = Connection::open(db_path).context("Failed to open database")?;
        Self::migrate(&conn)?;
        Ok(conn)
    }

    /// Opens a fresh in-memory database with the schema applied.
    ///
    /// # Errors
    /// Returns error if migration fails.
    pub fn open_in_memory() -> Result<Connection> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::migrate(&conn)?;
        Ok(conn)
    }

    /// Applies the schema migrations.
    fn migrate(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS odometer (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                distance REAL NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create odometer table")?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS service_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                key TEXT NOT NULL,
                done_at_distance REAL,
                done_at_date TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .context("Failed to create service_records table")?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_service_records_key ON service_records (key)",
            [],
        )
        .context("Failed to create service_records index")?;

        Ok(())
    }
}
