//! Export driver: read, reshape, filter, write.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use packer_ingest::read_observations;
use packer_model::{Concept, ExportTable, IdColumn};
use packer_output::write_tsv;
use packer_transform::{ExportOptions, export_table, filter_rows, order_concepts};
use tracing::{debug, info, info_span, trace};

use crate::logging::redact_value;
use crate::types::ExportResult;

/// Name used when the input path has no usable file stem.
pub const FALLBACK_EXPORT_NAME: &str = "export";

/// Everything one export run needs.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub observations: PathBuf,
    /// Second observation file whose export restricts the rows kept.
    pub row_filter: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub name: String,
    pub options: ExportOptions,
    pub dry_run: bool,
}

impl ExportRequest {
    /// Request with the default name, output directory and options for `observations`.
    pub fn new(observations: impl Into<PathBuf>) -> Self {
        let observations = observations.into();
        Self {
            name: default_export_name(&observations),
            output_dir: default_output_dir(&observations),
            observations,
            row_filter: None,
            options: ExportOptions::default(),
            dry_run: false,
        }
    }
}

/// File stem of the input, or [`FALLBACK_EXPORT_NAME`].
pub fn default_export_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map_or_else(|| FALLBACK_EXPORT_NAME.to_string(), str::to_string)
}

/// `output/` next to the input file.
pub fn default_output_dir(path: &Path) -> PathBuf {
    path.parent()
        .unwrap_or_else(|| Path::new("."))
        .join("output")
}

/// Read an observation file and run the export pipeline over it.
pub fn load_export(path: &Path, options: &ExportOptions) -> Result<ExportTable> {
    let observations =
        read_observations(path).with_context(|| format!("read {}", path.display()))?;
    let table = export_table(&observations, options)
        .with_context(|| format!("export {}", path.display()))?;
    if let Some(subject) = table.id_position(IdColumn::Subject) {
        for row in &table.rows {
            if let Some(id) = &row.ids[subject] {
                trace!(subject = redact_value(id), "exported subject");
            }
        }
    }
    Ok(table)
}

/// Run one export end to end.
pub fn run_export(request: &ExportRequest) -> Result<ExportResult> {
    let span = info_span!("run_export", name = %request.name);
    let _guard = span.enter();
    let start = Instant::now();

    let mut table = load_export(&request.observations, &request.options)?;
    let mut filtered_out = None;
    if let Some(filter_path) = &request.row_filter {
        let filter = load_export(filter_path, &request.options)?;
        let before = table.height();
        table = filter_rows(&table, &filter)
            .with_context(|| format!("apply row filter {}", filter_path.display()))?;
        filtered_out = Some(before - table.height());
    }

    let output_path = if request.dry_run {
        info!("dry run, no file written");
        None
    } else {
        let path = write_tsv(&table, &request.output_dir, &request.name)
            .with_context(|| format!("write export to {}", request.output_dir.display()))?;
        Some(path)
    };

    debug!(
        row_count = table.height(),
        column_count = table.width(),
        duration_ms = start.elapsed().as_millis(),
        "export complete"
    );
    Ok(ExportResult {
        name: request.name.clone(),
        output_path,
        row_count: table.height(),
        id_columns: table.id_columns.clone(),
        concept_count: table.concepts.len(),
        filtered_out,
    })
}

/// Distinct concepts of an observation file in export column order.
pub fn ordered_concepts(path: &Path) -> Result<Vec<Concept>> {
    let observations =
        read_observations(path).with_context(|| format!("read {}", path.display()))?;
    let mut seen = HashSet::new();
    let concepts: Vec<Concept> = observations
        .observations
        .iter()
        .filter(|observation| seen.insert(observation.concept.path.as_str()))
        .map(|observation| observation.concept.clone())
        .collect();
    Ok(order_concepts(&concepts))
}
