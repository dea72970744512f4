//! Concept pivot: long keyed rows to one column per concept path.

use std::collections::BTreeMap;

use packer_model::{CellValue, Concept, ExportRow, ExportTable, IdKey};
use tracing::debug;

use crate::consolidate::KeyedTable;

/// Concepts in export column order: entity group, then name, then path.
pub fn order_concepts(concepts: &[Concept]) -> Vec<Concept> {
    let mut ordered = concepts.to_vec();
    ordered.sort_by(Concept::display_cmp);
    ordered
}

/// Unstack the concept-path level of the key into columns.
///
/// Each distinct identifier tuple becomes one row. Cells without an
/// observation are [`CellValue::Missing`].
pub fn pivot(keyed: &KeyedTable) -> ExportTable {
    let concepts = order_concepts(&keyed.concepts);
    let positions: BTreeMap<&str, usize> = concepts
        .iter()
        .enumerate()
        .map(|(index, concept)| (concept.path.as_str(), index))
        .collect();

    let mut grouped: BTreeMap<IdKey, Vec<CellValue>> = BTreeMap::new();
    for entry in &keyed.entries {
        let Some(&position) = positions.get(entry.concept_path.as_str()) else {
            continue;
        };
        let values = grouped
            .entry(entry.ids.clone())
            .or_insert_with(|| vec![CellValue::Missing; concepts.len()]);
        values[position] = entry.value.clone();
    }

    let mut table = ExportTable::new(keyed.id_columns.clone(), concepts);
    for (ids, values) in grouped {
        table.push_row(ExportRow::new(ids, values));
    }
    debug!(
        row_count = table.height(),
        concept_count = table.concepts.len(),
        "pivoted concepts to columns"
    );
    table
}

#[cfg(test)]
mod tests {
    use packer_model::IdColumn;

    use super::*;
    use crate::consolidate::KeyedValue;

    fn entry(ids: &[Option<&str>], path: &str, value: CellValue) -> KeyedValue {
        KeyedValue {
            ids: ids.iter().map(|id| id.map(str::to_string)).collect(),
            concept_path: path.to_string(),
            value,
        }
    }

    #[test]
    fn one_row_per_identifier_tuple() {
        let keyed = KeyedTable {
            id_columns: vec![IdColumn::Subject, IdColumn::Diagnosis],
            concepts: vec![
                Concept::new("\\02\\Name\\", "Diagnosis.name", "Name"),
                Concept::new("\\01\\Age\\", "Individual.age", "Age"),
            ],
            entries: vec![
                entry(&[Some("P1"), None], "\\01\\Age\\", CellValue::Number(42.0)),
                entry(
                    &[Some("P1"), Some("D1")],
                    "\\02\\Name\\",
                    CellValue::text("Diagnosis 1"),
                ),
                entry(&[Some("P2"), None], "\\01\\Age\\", CellValue::Number(39.0)),
            ],
        };

        let table = pivot(&keyed);

        assert_eq!(table.height(), 3);
        assert_eq!(table.concepts[0].name, "Age");
        assert_eq!(table.concepts[1].name, "Name");
        let p1_d1 = table
            .rows
            .iter()
            .find(|row| row.ids == vec![Some("P1".to_string()), Some("D1".to_string())])
            .unwrap();
        assert_eq!(p1_d1.values, vec![CellValue::Missing, CellValue::text("Diagnosis 1")]);
    }

    #[test]
    fn empty_input_pivots_to_empty_table() {
        let keyed = KeyedTable {
            id_columns: vec![IdColumn::Subject],
            ..KeyedTable::default()
        };
        let table = pivot(&keyed);
        assert!(table.is_empty());
        assert_eq!(table.id_columns, vec![IdColumn::Subject]);
        assert!(table.concepts.is_empty());
    }

    #[test]
    fn colliding_names_stay_separate_columns() {
        let ordered = order_concepts(&[
            Concept::new("\\b\\Date\\", "Biomaterial.date", "Date"),
            Concept::new("\\a\\Date\\", "Biosource.date", "Date"),
            Concept::new("\\c\\Date\\", "Biomaterial.date2", "Date"),
        ]);
        let paths: Vec<&str> = ordered.iter().map(|concept| concept.path.as_str()).collect();
        assert_eq!(paths, vec!["\\a\\Date\\", "\\b\\Date\\", "\\c\\Date\\"]);
    }
}
