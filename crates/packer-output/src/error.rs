//! Error types for export serialization.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create the output directory or file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a record.
    #[error("failed to write TSV record: {0}")]
    Csv(#[from] csv::Error),

    /// Serialized output was not valid UTF-8.
    #[error("serialized output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
