//! Final column and row ordering.

use std::cmp::Ordering;

use packer_model::{Concept, ExportRow, ExportTable, IdColumn, canonical_id_order};

/// Lexicographic identifier comparison with missing values sorted first.
///
/// Puts an ancestor ahead of the descendants sharing its prefix.
pub fn compare_ids_missing_first(left: &[Option<String>], right: &[Option<String>]) -> Ordering {
    // Option's own ordering already places None before Some.
    left.cmp(right)
}

/// Lexicographic identifier comparison with missing values sorted last.
///
/// Puts every descendant ahead of its ancestors, which the propagation scan
/// relies on.
pub fn compare_ids_missing_last(left: &[Option<String>], right: &[Option<String>]) -> Ordering {
    for (left, right) in left.iter().zip(right) {
        let ordering = match (left, right) {
            (Some(left), Some(right)) => left.cmp(right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left.len().cmp(&right.len())
}

/// Reorder columns: identifiers in canonical order, concepts by entity group
/// and name.
pub fn order_columns(table: &ExportTable) -> ExportTable {
    let id_columns = canonical_id_order(table.id_columns.iter().copied());
    let mut concepts: Vec<(usize, &Concept)> = table.concepts.iter().enumerate().collect();
    concepts.sort_by(|(_, left), (_, right)| left.display_cmp(right));

    let id_sources: Vec<Option<usize>> = id_columns
        .iter()
        .map(|column| table.id_position(*column))
        .collect();
    let mut ordered = ExportTable::new(
        id_columns,
        concepts.iter().map(|(_, concept)| (*concept).clone()).collect(),
    );
    for row in &table.rows {
        let ids = id_sources
            .iter()
            .map(|source| source.and_then(|index| row.ids[index].clone()))
            .collect();
        let values = concepts
            .iter()
            .map(|(index, _)| row.values[*index].clone())
            .collect();
        ordered.push_row(ExportRow::new(ids, values));
    }
    ordered
}

/// Stable row sort by identifiers, shallowest rows first.
pub fn order_rows(table: &ExportTable) -> ExportTable {
    let mut ordered = table.clone();
    ordered
        .rows
        .sort_by(|left, right| compare_ids_missing_first(&left.ids, &right.ids));
    ordered
}

/// Final column then row order of an export.
pub fn order_table(table: &ExportTable) -> ExportTable {
    order_rows(&order_columns(table))
}

/// Identifier columns shared by two tables, in the order of `table`.
pub fn common_id_columns(table: &ExportTable, other: &ExportTable) -> Vec<IdColumn> {
    table
        .id_columns
        .iter()
        .copied()
        .filter(|column| other.id_columns.contains(column))
        .collect()
}
