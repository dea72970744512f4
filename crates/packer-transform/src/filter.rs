//! Row filter over two finished export tables.

use std::collections::HashSet;

use packer_model::{ExportRow, ExportTable, IdColumn};
use tracing::{debug, info};

use crate::error::{Result, TransformError};
use crate::order::common_id_columns;

fn restricted_key(table: &ExportTable, row: &ExportRow, columns: &[IdColumn]) -> Vec<Option<String>> {
    columns
        .iter()
        .map(|column| {
            table
                .id_position(*column)
                .and_then(|position| row.ids[position].clone())
        })
        .collect()
}

/// Keep the rows of `table` whose identifiers, restricted to the columns
/// both tables share, also appear in `filter`.
///
/// Fails when the tables have no identifier column in common.
pub fn filter_rows(table: &ExportTable, filter: &ExportTable) -> Result<ExportTable> {
    let common = common_id_columns(table, filter);
    if common.is_empty() {
        return Err(TransformError::NoCommonIdColumns);
    }
    debug!(common_columns = ?common, "filtering rows");

    let allowed: HashSet<Vec<Option<String>>> = filter
        .rows
        .iter()
        .map(|row| restricted_key(filter, row, &common))
        .collect();

    let mut filtered = ExportTable::new(table.id_columns.clone(), table.concepts.clone());
    for row in &table.rows {
        if allowed.contains(&restricted_key(table, row, &common)) {
            filtered.push_row(row.clone());
        }
    }
    info!(
        input_rows = table.height(),
        output_rows = filtered.height(),
        "applied row filter"
    );
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use packer_model::{CellValue, Concept};

    use super::*;

    fn table(id_columns: Vec<IdColumn>, rows: &[&[&str]]) -> ExportTable {
        let mut table = ExportTable::new(id_columns, vec![Concept::new("\\v\\", "", "Value")]);
        for ids in rows {
            table.push_row(ExportRow::new(
                ids.iter().map(|id| Some((*id).to_string())).collect(),
                vec![CellValue::text("x")],
            ));
        }
        table
    }

    #[test]
    fn keeps_rows_matching_on_common_prefix() {
        let diagnoses = table(
            vec![IdColumn::Subject, IdColumn::Diagnosis],
            &[&["P1", "D1"], &["P1", "D2"], &["P2", "D3"]],
        );
        let biosources = table(
            vec![IdColumn::Subject, IdColumn::Diagnosis, IdColumn::Biosource],
            &[&["P1", "D1", "BS1"], &["P2", "D3", "BS2"]],
        );

        let filtered = filter_rows(&diagnoses, &biosources).unwrap();

        assert_eq!(filtered.height(), 2);
        assert_eq!(filtered.id_value(0, IdColumn::Diagnosis), Some("D1"));
        assert_eq!(filtered.id_value(1, IdColumn::Diagnosis), Some("D3"));
    }

    #[test]
    fn no_common_columns_is_an_error() {
        let subjects = table(vec![IdColumn::Subject], &[&["P1"]]);
        let studies = table(vec![IdColumn::Study], &[&["S1"]]);
        let error = filter_rows(&subjects, &studies).unwrap_err();
        assert_eq!(
            error.to_string(),
            "no identifier columns in common to filter rows"
        );
    }
}
