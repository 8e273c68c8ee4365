//! Fuzzy Task Resolver: Matches human queries to catalog tasks.

use super::catalog::Catalog;
use super::error::EngineError;
use super::types::MaintenanceTaskDef;
use std::collections::HashSet;

pub struct ResolveResult<'a> {
    pub def: &'a MaintenanceTaskDef,
    pub confidence: f64,
}

pub struct TaskResolver<'a> {
    catalog: &'a Catalog,
    strict: bool,
}

impl<'a> TaskResolver<'a> {
    /// Creates a new resolver.
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            strict: false,
        }
    }

    /// Creates a resolver that only accepts exact keys.
    #[must_use]
    pub fn strict(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            strict: true,
        }
    }

    /// Resolves a user query into a task definition.
    ///
    /// # Errors
    /// Returns `UnknownTask` if nothing matches well enough.
    pub fn resolve(&self, query: &str) -> Result<ResolveResult<'a>, EngineError> {
        let normalized = normalize_key(query);
        let exact = self
            .catalog
            .iter()
            .find(|d| d.key.eq_ignore_ascii_case(query.trim()) || d.key == normalized);

        if let Some(def) = exact {
            return Ok(ResolveResult {
                def,
                confidence: 1.0,
            });
        }

        if self.strict {
            return Err(EngineError::UnknownTask(query.to_string()));
        }
        self.fuzzy_resolve(query)
    }

    fn fuzzy_resolve(&self, query: &str) -> Result<ResolveResult<'a>, EngineError> {
        let query_lower = query.trim().to_lowercase();
        let words: Vec<_> = query_lower.split_whitespace().collect();

        let mut best: Option<(f64, &'a MaintenanceTaskDef)> = None;
        for def in self.catalog {
            let score = calculate_score(def, &query_lower, &words);
            // Strictly greater, so the earlier catalog entry wins a tie.
            if score > 0.3 && best.map_or(true, |(s, _)| score > s) {
                best = Some((score, def));
            }
        }

        best.map(|(confidence, def)| ResolveResult { def, confidence })
            .ok_or_else(|| EngineError::UnknownTask(query.to_string()))
    }
}

/// Lowercases and joins words with underscores: "Brake Fluid" -> "brake_fluid".
#[must_use]
pub fn normalize_key(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .split('_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>()
        .join("_")
}

/// Calculates a match score between a task and a query.
fn calculate_score(def: &MaintenanceTaskDef, query: &str, query_words: &[&str]) -> f64 {
    let key_lower = def.key.replace('_', " ");
    let title_lower = def.title.to_lowercase();

    let mut score = 0.0;

    if key_lower.contains(query) {
        score += 0.8;
    }
    if title_lower.contains(query) {
        score += 0.7;
    }

    for word in query_words {
        if key_lower.contains(word) {
            score += 0.3;
        }
        if title_lower.contains(word) {
            score += 0.25;
        }
    }

    if key_lower.starts_with(query) || title_lower.starts_with(query) {
        score += 0.5;
    }

    score += string_similarity(&key_lower, query) * 0.4;

    score.min(1.0)
}

#[allow(clippy::cast_precision_loss)]
fn string_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_chars: HashSet<char> = a.chars().collect();
    let b_chars: HashSet<char> = b.chars().collect();

    let intersection = a_chars.intersection(&b_chars).count();
    let union = a_chars.union(&b_chars).count();

    if union == 0 {
        return 0.0;
    }

    intersection as f64 / union as f64
}
