//! Runtime configuration: where state lives and which catalog to use.

use super::catalog::Catalog;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_DIR: &str = ".maintlog";
pub const CATALOG_FILE: &str = "catalog.json";

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `state.db` and an optional `catalog.json`.
    pub dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DIR),
        }
    }
}

impl Config {
    #[must_use]
    pub fn new(dir: Option<PathBuf>) -> Self {
        dir.map_or_else(Self::default, |dir| Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.dir.join(CATALOG_FILE)
    }

    /// Loads the custom catalog if one exists, else the built-in schedule.
    ///
    /// # Errors
    /// Returns error if the catalog file exists but cannot be read or is invalid.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let path = self.catalog_path();
        if !path.exists() {
            debug!("no custom catalog, using built-in schedule");
            return Ok(Catalog::default());
        }

        let json = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let catalog = Catalog::from_json(&json)
            .with_context(|| format!("Invalid catalog in {}", path.display()))?;
        info!(path = %path.display(), tasks = catalog.len(), "loaded custom catalog");
        Ok(catalog)
    }

    /// Writes the given catalog as pretty JSON so it can be edited by hand.
    ///
    /// # Errors
    /// Returns error if serialization or the write fails.
    pub fn write_catalog(&self, catalog: &Catalog) -> Result<PathBuf> {
        let path = self.catalog_path();
        let json = serde_json::to_string_pretty(catalog)?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
