//! JSON record arrays keyed by canonical field names.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use packer_model::{IdColumn, ObservationTable, format_number};

use crate::error::{IngestError, Result};
use crate::polars_utils::parse_f64;
use crate::record::{
    CONCEPT_CODE_FIELD, CONCEPT_NAME_FIELD, CONCEPT_PATH_FIELD, NUMERIC_VALUE_FIELD, RawRecord,
    STRING_VALUE_FIELD,
};

/// A scalar JSON field. Nested values are accepted and ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JsonField {
    Text(String),
    Number(f64),
    Bool(bool),
    Other(serde_json::Value),
}

impl JsonField {
    fn text(&self) -> Option<String> {
        match self {
            JsonField::Text(text) if !text.trim().is_empty() => Some(text.clone()),
            JsonField::Number(number) => Some(format_number(*number)),
            JsonField::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }
}

/// One JSON observation record; `null` fields deserialize to `None`.
pub type JsonRecord = BTreeMap<String, Option<JsonField>>;

fn field_text(record: &JsonRecord, name: &str) -> Option<String> {
    record.get(name).and_then(Option::as_ref).and_then(JsonField::text)
}

fn numeric_field(record: &JsonRecord, row: usize) -> Result<Option<f64>> {
    match record.get(NUMERIC_VALUE_FIELD).and_then(Option::as_ref) {
        None => Ok(None),
        Some(JsonField::Number(number)) => Ok(Some(*number)),
        Some(JsonField::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(JsonField::Text(text)) => parse_f64(text)
            .map(Some)
            .ok_or_else(|| IngestError::InvalidNumber {
                row,
                column: NUMERIC_VALUE_FIELD.to_string(),
                value: text.clone(),
            }),
        Some(other) => Err(IngestError::InvalidNumber {
            row,
            column: NUMERIC_VALUE_FIELD.to_string(),
            value: format!("{other:?}"),
        }),
    }
}

/// Convert parsed JSON records.
///
/// Identifier columns are those named by any record.
pub fn observations_from_records(records: &[JsonRecord]) -> Result<ObservationTable> {
    let present = IdColumn::ALL
        .into_iter()
        .filter(|column| records.iter().any(|record| record.contains_key(column.source_field())));
    let mut table = ObservationTable::new(present);

    for (row, record) in records.iter().enumerate() {
        let ids = IdColumn::ALL
            .into_iter()
            .filter_map(|column| field_text(record, column.source_field()).map(|id| (column, id)))
            .collect();
        let raw = RawRecord {
            ids,
            concept_path: field_text(record, CONCEPT_PATH_FIELD),
            concept_code: field_text(record, CONCEPT_CODE_FIELD),
            concept_name: field_text(record, CONCEPT_NAME_FIELD),
            string_value: field_text(record, STRING_VALUE_FIELD),
            numeric_value: numeric_field(record, row)?,
        };
        table.push(raw.into_observation(row)?);
    }

    debug!(row_count = table.len(), "converted JSON records");
    Ok(table)
}

/// Parse a JSON array of observation records.
pub fn parse_records(text: &str) -> std::result::Result<Vec<JsonRecord>, serde_json::Error> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_records_with_mixed_types() {
        let records = parse_records(
            r#"[
                {"patient.subjectIds.SUBJ_ID": "P1", "Diagnosis": null,
                 "concept.conceptPath": "\\01\\Age\\", "concept.conceptCode": "Individual.age",
                 "concept.name": "Age", "stringValue": null, "numericValue": 42,
                 "patient": {"id": 1}},
                {"patient.subjectIds.SUBJ_ID": 2, "Diagnosis": "D1",
                 "concept.conceptPath": "\\02\\Name\\", "stringValue": "Diagnosis 1",
                 "numericValue": ""}
            ]"#,
        )
        .unwrap();

        let table = observations_from_records(&records).unwrap();

        assert_eq!(table.id_columns, vec![IdColumn::Subject, IdColumn::Diagnosis]);
        assert_eq!(table.observations[0].numeric_value, Some(42.0));
        assert_eq!(table.observations[0].id(IdColumn::Diagnosis), None);
        assert_eq!(table.observations[1].id(IdColumn::Subject), Some("2"));
        assert_eq!(table.observations[1].numeric_value, None);
        assert_eq!(table.observations[1].concept.name, "\\02\\Name\\");
    }

    #[test]
    fn rejects_non_numeric_value() {
        let records = parse_records(
            r#"[{"concept.conceptPath": "\\a\\", "numericValue": "many"}]"#,
        )
        .unwrap();
        assert!(matches!(
            observations_from_records(&records),
            Err(IngestError::InvalidNumber { row: 0, .. })
        ));
    }
}
