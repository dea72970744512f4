//! Error types for the export transformation.

use thiserror::Error;

/// Errors raised by the export pipeline.
///
/// Sparse or missing data is never an error; only caller mistakes and
/// data-quality problems that would otherwise be silently lost are reported.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Two observations share an identifier tuple and concept path.
    #[error("duplicate observation for concept {concept_path} at ({ids})")]
    DuplicateObservation { ids: String, concept_path: String },

    /// The tables handed to the row filter share no identifier column.
    #[error("no identifier columns in common to filter rows")]
    NoCommonIdColumns,

    /// The configured date format contains an invalid specifier.
    #[error("invalid date format '{0}'")]
    InvalidDateFormat(String),
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TransformError::DuplicateObservation {
            ids: "P1, D1".to_string(),
            concept_path: "\\02.Diagnosis\\Name\\".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate observation for concept \\02.Diagnosis\\Name\\ at (P1, D1)"
        );
        assert_eq!(
            TransformError::NoCommonIdColumns.to_string(),
            "no identifier columns in common to filter rows"
        );
    }
}
