//! Value consolidation.
//!
//! Collapses the dual string/numeric value representation into one cell per
//! observation and re-keys rows by identifier tuple plus concept path.

use std::collections::HashSet;

use packer_model::{CellValue, Concept, IdColumn, IdKey, Observation};
use tracing::debug;

use crate::error::{Result, TransformError};
use crate::schema::Partition;

/// One consolidated observation.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedValue {
    pub ids: IdKey,
    pub concept_path: String,
    pub value: CellValue,
}

/// Consolidated observations of one partition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyedTable {
    pub id_columns: Vec<IdColumn>,
    /// Distinct concepts in first-seen order.
    pub concepts: Vec<Concept>,
    pub entries: Vec<KeyedValue>,
}

impl KeyedTable {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The string value wins when present, then the numeric value, else missing.
pub fn consolidated_value(observation: &Observation) -> CellValue {
    match (&observation.string_value, observation.numeric_value) {
        (Some(text), _) if !text.is_empty() => CellValue::Text(text.clone()),
        (_, Some(number)) => CellValue::Number(number),
        _ => CellValue::Missing,
    }
}

/// Consolidate a partition, keyed by its identifier columns and concept path.
///
/// Two observations with the same identifier tuple and concept path are a
/// data-quality problem and fail the export.
pub fn consolidate(partition: &Partition) -> Result<KeyedTable> {
    let mut keyed = KeyedTable {
        id_columns: partition.id_columns.clone(),
        ..KeyedTable::default()
    };
    let mut seen_keys: HashSet<(IdKey, String)> = HashSet::with_capacity(partition.len());
    let mut seen_paths: HashSet<String> = HashSet::new();

    for observation in &partition.observations {
        let ids: IdKey = partition
            .id_columns
            .iter()
            .map(|column| observation.id(*column).map(str::to_string))
            .collect();
        let path = observation.concept.path.clone();
        if !seen_keys.insert((ids.clone(), path.clone())) {
            return Err(TransformError::DuplicateObservation {
                ids: render_key(&ids),
                concept_path: path,
            });
        }
        if seen_paths.insert(path.clone()) {
            keyed.concepts.push(observation.concept.clone());
        }
        keyed.entries.push(KeyedValue {
            ids,
            concept_path: path,
            value: consolidated_value(observation),
        });
    }

    debug!(
        entry_count = keyed.entries.len(),
        concept_count = keyed.concepts.len(),
        "consolidated observation values"
    );
    Ok(keyed)
}

fn render_key(ids: &IdKey) -> String {
    ids.iter()
        .map(|id| id.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(", ")
}
