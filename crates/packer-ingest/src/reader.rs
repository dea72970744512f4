//! Observation file reading.
//!
//! `.csv` is comma separated, `.tsv` and `.txt` are tab separated, `.json`
//! is an array of records. Delimited files are read entirely as text so that
//! identifiers like `007` keep their leading zeros.

use std::path::Path;

use polars::prelude::*;
use tracing::info;

use packer_model::ObservationTable;

use crate::error::{IngestError, Result};
use crate::frame::observations_from_dataframe;
use crate::json::{observations_from_records, parse_records};

/// Supported observation file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationFormat {
    Csv,
    Tsv,
    Json,
}

impl ObservationFormat {
    /// Format named by a file extension, case-insensitive.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" | "txt" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Read a delimited file into a frame of text columns.
pub fn read_delimited(path: &Path, separator: u8) -> Result<DataFrame> {
    ensure_exists(path)?;
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

fn read_json(path: &Path) -> Result<ObservationTable> {
    ensure_exists(path)?;
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let records = parse_records(&text).map_err(|e| IngestError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    observations_from_records(&records)
}

/// Load an observation table, dispatching on the file extension.
pub fn read_observations(path: &Path) -> Result<ObservationTable> {
    let format = ObservationFormat::from_path(path)?;
    let table = match format {
        ObservationFormat::Csv => observations_from_dataframe(&read_delimited(path, b',')?)?,
        ObservationFormat::Tsv => observations_from_dataframe(&read_delimited(path, b'\t')?)?,
        ObservationFormat::Json => read_json(path)?,
    };
    info!(
        path = %path.display(),
        format = ?format,
        observation_count = table.len(),
        "loaded observations"
    );
    Ok(table)
}
