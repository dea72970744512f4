//! Wide export tables.
//!
//! An [`ExportTable`] holds one row per identifier tuple and one column per
//! concept. Identifier columns come first in the rendered header, followed by
//! concept display names. Concepts are stored with their full metadata so the
//! path stays the column key even when display names collide.

use serde::{Deserialize, Serialize};

use crate::concept::Concept;
use crate::ids::IdColumn;
use crate::value::CellValue;

/// Identifier values of a row, aligned with [`ExportTable::id_columns`].
pub type IdKey = Vec<Option<String>>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExportRow {
    pub ids: IdKey,
    pub values: Vec<CellValue>,
}

impl ExportRow {
    pub fn new(ids: IdKey, values: Vec<CellValue>) -> Self {
        Self { ids, values }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExportTable {
    pub id_columns: Vec<IdColumn>,
    pub concepts: Vec<Concept>,
    pub rows: Vec<ExportRow>,
}

impl ExportTable {
    pub fn new(id_columns: Vec<IdColumn>, concepts: Vec<Concept>) -> Self {
        Self {
            id_columns,
            concepts,
            rows: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns, identifiers included.
    pub fn width(&self) -> usize {
        self.id_columns.len() + self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, row: ExportRow) {
        debug_assert_eq!(row.ids.len(), self.id_columns.len());
        debug_assert_eq!(row.values.len(), self.concepts.len());
        self.rows.push(row);
    }

    pub fn id_position(&self, column: IdColumn) -> Option<usize> {
        self.id_columns.iter().position(|id| *id == column)
    }

    pub fn concept_position(&self, path: &str) -> Option<usize> {
        self.concepts.iter().position(|concept| concept.path == path)
    }

    /// Identifier value of a row, `None` when missing or the column is absent.
    pub fn id_value(&self, row: usize, column: IdColumn) -> Option<&str> {
        let position = self.id_position(column)?;
        self.rows.get(row)?.ids.get(position)?.as_deref()
    }

    /// Cell of a row addressed by concept path.
    pub fn value(&self, row: usize, path: &str) -> Option<&CellValue> {
        let position = self.concept_position(path)?;
        self.rows.get(row)?.values.get(position)
    }

    /// Rendered header: identifier labels then concept display names.
    pub fn header(&self) -> Vec<String> {
        self.id_columns
            .iter()
            .map(|column| column.label().to_string())
            .chain(self.concepts.iter().map(|concept| concept.name.clone()))
            .collect()
    }

    /// Every row rendered as presentation strings, header order.
    pub fn rendered_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                row.ids
                    .iter()
                    .map(|id| id.clone().unwrap_or_default())
                    .chain(row.values.iter().map(CellValue::render))
                    .collect()
            })
            .collect()
    }
}
