use anyhow::Result;
use comfy_table::{Cell, Table};
use tracing::info;

use packer_cli::export::{self, ExportRequest, default_export_name, default_output_dir};
use packer_cli::types::ExportResult;
use packer_transform::ExportOptions;

use crate::cli::{ConceptsArgs, ExportArgs};
use crate::summary::{apply_table_style, dim_cell, header_cell};

pub fn run_concepts(args: &ConceptsArgs) -> Result<()> {
    let concepts = export::ordered_concepts(&args.observations)?;
    info!(concept_count = concepts.len(), "listing concepts");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Code"),
        header_cell("Name"),
        header_cell("Path"),
    ]);
    apply_table_style(&mut table);
    for concept in concepts {
        let group = match concept.entity() {
            Some(prefix) => Cell::new(prefix.as_str()),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            group,
            Cell::new(&concept.code),
            Cell::new(&concept.name),
            Cell::new(&concept.path),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_export(args: &ExportArgs) -> Result<ExportResult> {
    let request = ExportRequest {
        observations: args.observations.clone(),
        row_filter: args.row_filter.clone(),
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&args.observations)),
        name: args
            .name
            .clone()
            .unwrap_or_else(|| default_export_name(&args.observations)),
        options: ExportOptions::default()
            .with_date_format(args.date_format.as_str())
            .with_multi_value_separator(args.separator.as_str()),
        dry_run: args.dry_run,
    };
    export::run_export(&request)
}
