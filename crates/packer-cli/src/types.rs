use std::path::PathBuf;

use packer_model::IdColumn;

/// Outcome of one export run.
#[derive(Debug)]
pub struct ExportResult {
    pub name: String,
    /// Written file; `None` on a dry run.
    pub output_path: Option<PathBuf>,
    pub row_count: usize,
    pub id_columns: Vec<IdColumn>,
    pub concept_count: usize,
    /// Rows removed by the row filter, when one was given.
    pub filtered_out: Option<usize>,
}
