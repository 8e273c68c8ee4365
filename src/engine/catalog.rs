//! Task Catalog: the ordered, validated set of maintenance definitions.

use super::error::EngineError;
use super::types::{Interval, MaintenanceTaskDef};
use serde::Serialize;
use std::collections::HashSet;

const MONTH: i64 = 30;
const YEAR: i64 = 365;

/// Upper bound on a day interval. Keeps date arithmetic well inside `i64`.
pub const MAX_INTERVAL_DAYS: i64 = 1_000_000;

/// Immutable, key-unique list of task definitions. Order is display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    defs: Vec<MaintenanceTaskDef>,
}

impl Catalog {
    /// Builds a catalog after validating every definition.
    ///
    /// # Errors
    /// Returns `DuplicateKey` for repeated keys and `InvalidInput` for
    /// empty keys, non-positive intervals, or negative/non-finite leads.
    pub fn new(defs: Vec<MaintenanceTaskDef>) -> Result<Self, EngineError> {
        let mut seen = HashSet::new();
        for def in &defs {
            validate(def)?;
            if !seen.insert(def.key.as_str()) {
                return Err(EngineError::DuplicateKey(def.key.clone()));
            }
        }
        Ok(Self { defs })
    }

    /// Parses and validates a catalog from a JSON array of definitions.
    ///
    /// # Errors
    /// Returns `InvalidInput` on malformed JSON, plus anything `new` rejects.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let defs: Vec<MaintenanceTaskDef> = serde_json::from_str(json)
            .map_err(|e| EngineError::invalid(format!("catalog is not valid JSON: {e}")))?;
        Self::new(defs)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MaintenanceTaskDef> {
        self.defs.iter().find(|d| d.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MaintenanceTaskDef> {
        self.defs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MaintenanceTaskDef;
    type IntoIter = std::slice::Iter<'a, MaintenanceTaskDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.defs.iter()
    }
}

/// The built-in schedule (2024 Acura Integra, CVT).
impl Default for Catalog {
    fn default() -> Self {
        Self {
            defs: vec![
                MaintenanceTaskDef::new("oil_change", "Oil change", Interval::both(5500.0, 6 * MONTH))
                    .with_leads(500.0, 14)
                    .with_notes("Every 5-6k miles or 6 months (whichever comes first)."),
                MaintenanceTaskDef::new("tire_rotation", "Tire rotation", Interval::both(5500.0, 6 * MONTH))
                    .with_leads(500.0, 14)
                    .with_notes("Usually done with oil changes."),
                MaintenanceTaskDef::new("cvt_fluid", "CVT fluid", Interval::distance(35_000.0))
                    .with_leads(1500.0, 0)
                    .with_notes("30-40k miles; default set to 35k."),
                MaintenanceTaskDef::new("engine_air_filter", "Engine air filter", Interval::distance(15_000.0))
                    .with_leads(1000.0, 0),
                MaintenanceTaskDef::new("cabin_air_filter", "Cabin air filter", Interval::distance(15_000.0))
                    .with_leads(1000.0, 0),
                MaintenanceTaskDef::new("brake_fluid", "Brake fluid", Interval::days(3 * YEAR))
                    .with_leads(0.0, 30),
                MaintenanceTaskDef::new("spark_plugs", "Spark plugs", Interval::distance(60_000.0))
                    .with_leads(3000.0, 0),
                MaintenanceTaskDef::new("coolant", "Coolant", Interval::both(100_000.0, 10 * YEAR))
                    .with_leads(5000.0, 60),
            ],
        }
    }
}

fn validate(def: &MaintenanceTaskDef) -> Result<(), EngineError> {
    if def.key.trim().is_empty() {
        return Err(EngineError::invalid("task key must not be empty"));
    }
    if let Some(d) = def.interval.distance {
        if !d.is_finite() || d <= 0.0 {
            return Err(EngineError::invalid(format!(
                "'{}': distance interval must be positive, got {d}",
                def.key
            )));
        }
    }
    if let Some(days) = def.interval.days {
        if days <= 0 || days > MAX_INTERVAL_DAYS {
            return Err(EngineError::invalid(format!(
                "'{}': day interval must be between 1 and {MAX_INTERVAL_DAYS}, got {days}",
                def.key
            )));
        }
    }
    if !def.lead_distance.is_finite() || def.lead_distance < 0.0 {
        return Err(EngineError::invalid(format!(
            "'{}': lead distance must be non-negative",
            def.key
        )));
    }
    if def.lead_days < 0 {
        return Err(EngineError::invalid(format!(
            "'{}': lead days must be non-negative",
            def.key
        )));
    }
    Ok(())
}
