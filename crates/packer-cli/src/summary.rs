use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use packer_model::IdColumn;

use packer_cli::types::ExportResult;

pub fn print_summary(result: &ExportResult) {
    println!("Export: {}", result.name);
    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![Cell::new("Rows"), Cell::new(result.row_count)]);
    if let Some(removed) = result.filtered_out {
        table.add_row(vec![Cell::new("Filtered out"), count_cell(removed)]);
    }
    table.add_row(vec![
        Cell::new("Identifier columns"),
        id_columns_cell(&result.id_columns),
    ]);
    table.add_row(vec![
        Cell::new("Concept columns"),
        Cell::new(result.concept_count),
    ]);
    table.add_row(vec![
        Cell::new("Output")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        match &result.output_path {
            Some(path) => Cell::new(path.display()).fg(Color::Green),
            None => dim_cell("dry run"),
        },
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .add_attribute(Attribute::Bold)
        .fg(Color::Cyan)
}

fn id_columns_cell(columns: &[IdColumn]) -> Cell {
    if columns.is_empty() {
        return dim_cell("-");
    }
    let labels: Vec<&str> = columns.iter().copied().map(IdColumn::label).collect();
    Cell::new(labels.join(", "))
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(Color::Yellow)
    }
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).add_attribute(Attribute::Dim)
}
