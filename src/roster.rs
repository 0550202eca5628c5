//! Roster loading.
//!
//! The roster is the full set of personnel available for assignment, read
//! once from a CSV table and immutable afterwards. Loading fails soft: a
//! missing or malformed source yields an empty roster (never partial rows,
//! never an error), so the caller can show an awaiting-data state instead
//! of crashing. The cause is still logged.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::PersonnelRecord;

/// Column layout of the input table. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "NOME_COMPLETO")]
    full_name: String,
    #[serde(rename = "MF")]
    identifier: String,
}

/// An explicitly owned, read-only personnel store.
///
/// Load once at startup and pass through calls; there is no process-global
/// cache behind this type.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    records: Vec<PersonnelRecord>,
}

impl Roster {
    /// Load the roster from a CSV file. Missing or malformed input yields
    /// an empty roster.
    pub fn load(path: &Path) -> Self {
        match read_records(path) {
            Ok(records) => {
                debug!(path = %path.display(), count = records.len(), "Loaded roster");
                Self { records }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load roster, continuing with empty set");
                Self::default()
            }
        }
    }

    pub fn from_records(records: Vec<PersonnelRecord>) -> Self {
        Self { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[PersonnelRecord] {
        &self.records
    }

    /// Resolve a selection string to a single record. Exact matches on the
    /// search label, identifier or full name win; otherwise a query that
    /// narrows down to exactly one record by substring search matches too.
    pub fn find(&self, query: &str) -> Option<&PersonnelRecord> {
        if let Some(record) = self.records.iter().find(|r| {
            r.search_label == query || r.identifier == query || r.full_name == query
        }) {
            return Some(record);
        }
        let matches = self.search(query);
        match matches.as_slice() {
            [single] => Some(single),
            _ => None,
        }
    }

    /// Case-insensitive substring search over the search labels, in roster
    /// order. An empty query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&PersonnelRecord> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.search_label.to_lowercase().contains(&needle))
            .collect()
    }
}

fn read_records(path: &Path) -> Result<Vec<PersonnelRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open roster file: {}", path.display()))?;

    let mut records = Vec::new();
    for row in reader.deserialize::<RosterRow>() {
        let row = row.context("Invalid roster row")?;
        records.push(PersonnelRecord::new(row.full_name, row.identifier));
    }
    Ok(records)
}

// ============================================================================
// Tests
// ============================================================================
