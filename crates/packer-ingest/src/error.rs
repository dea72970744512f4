//! Error types for observation ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading observations.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Observation file not found.
    #[error("observation file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension does not name a supported format.
    #[error("unsupported observation file format '{extension}': {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    // === Parsing Errors ===
    /// Failed to parse delimited text with Polars.
    #[error("failed to parse {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to parse a JSON record array.
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // === Record Errors ===
    /// Required column not found in the input.
    #[error("required column '{column}' not found")]
    MissingColumn { column: String },

    /// A record has no value for a required field.
    #[error("record {row} has no value for '{column}'")]
    MissingValue { row: usize, column: String },

    /// A numeric value could not be parsed.
    #[error("record {row} has a non-numeric value '{value}' for '{column}'")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
