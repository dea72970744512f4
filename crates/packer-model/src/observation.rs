//! Long-form observation records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::concept::Concept;
use crate::ids::{IdColumn, canonical_id_order};

/// One row of the long-form input: an identifier tuple, a concept and a value.
///
/// Identifiers that do not apply to the row are absent from `ids`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub ids: BTreeMap<IdColumn, String>,
    pub concept: Concept,
    pub string_value: Option<String>,
    pub numeric_value: Option<f64>,
}

impl Observation {
    pub fn new(concept: Concept) -> Self {
        Self {
            ids: BTreeMap::new(),
            concept,
            string_value: None,
            numeric_value: None,
        }
    }

    /// Set an identifier; empty values leave it unset.
    #[must_use]
    pub fn with_id(mut self, column: IdColumn, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.ids.insert(column, value);
        }
        self
    }

    #[must_use]
    pub fn with_string_value(mut self, value: impl Into<String>) -> Self {
        self.string_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_numeric_value(mut self, value: f64) -> Self {
        self.numeric_value = Some(value);
        self
    }

    pub fn id(&self, column: IdColumn) -> Option<&str> {
        self.ids.get(&column).map(String::as_str)
    }
}

/// The canonical long-form observation table handed to the export pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationTable {
    /// Identifier columns present in the source table, in output order.
    ///
    /// A column may be present while holding no value on any row.
    pub id_columns: Vec<IdColumn>,
    pub observations: Vec<Observation>,
}

impl ObservationTable {
    pub fn new(id_columns: impl IntoIterator<Item = IdColumn>) -> Self {
        Self {
            id_columns: canonical_id_order(id_columns),
            observations: Vec::new(),
        }
    }

    /// Build a table whose identifier columns are the ones populated by `observations`.
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let id_columns = canonical_id_order(
            observations
                .iter()
                .flat_map(|observation| observation.ids.keys().copied()),
        );
        Self {
            id_columns,
            observations,
        }
    }

    pub fn push(&mut self, observation: Observation) {
        for column in observation.ids.keys() {
            if !self.id_columns.contains(column) {
                self.id_columns.push(*column);
                self.id_columns.sort();
            }
        }
        self.observations.push(observation);
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn has_column(&self, column: IdColumn) -> bool {
        self.id_columns.contains(&column)
    }
}
