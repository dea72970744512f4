//! Cell formatting: every cell becomes a presentation string.

use std::sync::LazyLock;

use packer_model::{CellValue, Concept, ExportRow, ExportTable};
use regex::Regex;
use tracing::debug;

use crate::datetime::reformat_date;
use crate::options::ExportOptions;

/// Concept names containing the word "date" hold date cells.
static DATE_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdate\b").expect("Invalid date token regex"));

/// How the cells of one column are rendered.
///
/// Numbers render without a trailing `.0` wherever they appear, so columns
/// other than dates need no further distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Date,
    Text,
}

pub fn is_date_column(name: &str) -> bool {
    DATE_TOKEN_REGEX.is_match(name)
}

/// Classify a column by its display name.
pub fn column_kind(concept: &Concept) -> ColumnKind {
    if is_date_column(&concept.name) {
        ColumnKind::Date
    } else {
        ColumnKind::Text
    }
}

fn format_cell(cell: &CellValue, kind: ColumnKind, options: &ExportOptions) -> CellValue {
    if cell.is_empty() {
        return CellValue::Text(String::new());
    }
    match kind {
        ColumnKind::Date => match reformat_date(cell, &options.date_format) {
            Some(rendered) => CellValue::Text(rendered),
            None => CellValue::Text(cell.render()),
        },
        ColumnKind::Text => CellValue::Text(cell.render()),
    }
}

/// Render every cell of the table.
///
/// Columns are handled one by one, so two columns sharing a display name are
/// each formatted on their own contents. Formatting a formatted table is a
/// no-op.
pub fn format_table(table: &ExportTable, options: &ExportOptions) -> ExportTable {
    let kinds: Vec<ColumnKind> = table.concepts.iter().map(column_kind).collect();
    let date_columns = kinds.iter().filter(|kind| **kind == ColumnKind::Date).count();
    debug!(
        column_count = kinds.len(),
        date_columns,
        "formatting cells"
    );

    let mut formatted = ExportTable::new(table.id_columns.clone(), table.concepts.clone());
    for row in &table.rows {
        let values = row
            .values
            .iter()
            .zip(&kinds)
            .map(|(cell, kind)| format_cell(cell, *kind, options))
            .collect();
        formatted.push_row(ExportRow::new(row.ids.clone(), values));
    }
    formatted
}

#[cfg(test)]
mod tests {
    use packer_model::IdColumn;

    use super::*;

    fn single_column(name: &str, cells: Vec<CellValue>) -> ExportTable {
        let mut table = ExportTable::new(
            vec![IdColumn::Subject],
            vec![Concept::new(format!("\\{name}\\"), "", name)],
        );
        for (index, cell) in cells.into_iter().enumerate() {
            table.push_row(ExportRow::new(vec![Some(format!("P{index}"))], vec![cell]));
        }
        table
    }

    fn rendered(table: &ExportTable) -> Vec<String> {
        table.rows.iter().map(|row| row.values[0].render()).collect()
    }

    #[test]
    fn date_token_is_a_whole_word() {
        assert!(is_date_column("Date"));
        assert!(is_date_column("Date of birth"));
        assert!(is_date_column("biopsy DATE"));
        assert!(!is_date_column("Update status"));
        assert!(!is_date_column("Dates"));
    }

    #[test]
    fn date_columns_are_reformatted() {
        let table = single_column(
            "Date of diagnosis",
            vec![
                CellValue::text("2018-04-24T02:00:00Z"),
                CellValue::text("Wed Mar 07 01:00:00 CET 2018"),
                CellValue::text("NA"),
                CellValue::Missing,
            ],
        );
        let formatted = format_table(&table, &ExportOptions::default());
        assert_eq!(rendered(&formatted), vec!["2018-04-24", "2018-03-07", "NA", ""]);
    }

    #[test]
    fn numbers_drop_spurious_decimals() {
        let table = single_column(
            "Age",
            vec![
                CellValue::Number(30.0),
                CellValue::Number(2.00001),
                CellValue::Number(7.5),
                CellValue::Missing,
            ],
        );
        assert_eq!(column_kind(&table.concepts[0]), ColumnKind::Text);
        let formatted = format_table(&table, &ExportOptions::default());
        assert_eq!(rendered(&formatted), vec!["30", "2.00001", "7.5", ""]);
    }

    #[test]
    fn mixed_columns_keep_literal_text() {
        let table = single_column(
            "Grade",
            vec![
                CellValue::Number(3.0),
                CellValue::text("3.0"),
                CellValue::text("unknown"),
            ],
        );
        let formatted = format_table(&table, &ExportOptions::default());
        assert_eq!(rendered(&formatted), vec!["3", "3.0", "unknown"]);
    }

    #[test]
    fn duplicate_names_are_formatted_independently() {
        let mut table = ExportTable::new(
            vec![IdColumn::Subject],
            vec![
                Concept::new("\\a\\Date\\", "Biosource.date", "Date"),
                Concept::new("\\b\\Date\\", "Biomaterial.date", "Date"),
            ],
        );
        table.push_row(ExportRow::new(
            vec![Some("P1".to_string())],
            vec![CellValue::text("2018-04-24T02:00:00Z"), CellValue::Missing],
        ));
        table.push_row(ExportRow::new(
            vec![Some("P2".to_string())],
            vec![CellValue::Missing, CellValue::text("2019-05-01 10:00:00")],
        ));

        let formatted = format_table(&table, &ExportOptions::default());

        assert_eq!(formatted.rows[0].values[0], CellValue::text("2018-04-24"));
        assert_eq!(formatted.rows[1].values[1], CellValue::text("2019-05-01"));
    }

    #[test]
    fn formatting_is_idempotent() {
        let table = single_column(
            "Date",
            vec![
                CellValue::text("2018-04-24T02:00:00Z"),
                CellValue::Number(1_524_528_000_000.0),
                CellValue::text("NA"),
            ],
        );
        let options = ExportOptions::default().with_date_format("%d/%m/%Y");
        let once = format_table(&table, &options);
        let twice = format_table(&once, &options);
        assert_eq!(once, twice);
        assert_eq!(rendered(&once), vec!["24/04/2018", "24/04/2018", "NA"]);
    }
}
