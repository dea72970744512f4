//! Canonical observation fields and record assembly.

use packer_model::{Concept, IdColumn, Observation};

use crate::error::{IngestError, Result};

pub const CONCEPT_PATH_FIELD: &str = "concept.conceptPath";
pub const CONCEPT_CODE_FIELD: &str = "concept.conceptCode";
pub const CONCEPT_NAME_FIELD: &str = "concept.name";
pub const STRING_VALUE_FIELD: &str = "stringValue";
pub const NUMERIC_VALUE_FIELD: &str = "numericValue";

/// Field values of one input record, blank fields already dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub ids: Vec<(IdColumn, String)>,
    pub concept_path: Option<String>,
    pub concept_code: Option<String>,
    pub concept_name: Option<String>,
    pub string_value: Option<String>,
    pub numeric_value: Option<f64>,
}

impl RawRecord {
    /// Build the observation; `row` is only used in error messages.
    ///
    /// A missing display name falls back to the concept path, a missing code
    /// stays empty.
    pub fn into_observation(self, row: usize) -> Result<Observation> {
        let Some(path) = self.concept_path else {
            return Err(IngestError::MissingValue {
                row,
                column: CONCEPT_PATH_FIELD.to_string(),
            });
        };
        let name = self.concept_name.unwrap_or_else(|| path.clone());
        let code = self.concept_code.unwrap_or_default();

        let mut observation = Observation::new(Concept::new(path, code, name));
        for (column, id) in self.ids {
            observation = observation.with_id(column, id);
        }
        if let Some(text) = self.string_value {
            observation = observation.with_string_value(text);
        }
        if let Some(number) = self.numeric_value {
            observation = observation.with_numeric_value(number);
        }
        Ok(observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_falls_back_to_path() {
        let record = RawRecord {
            ids: vec![(IdColumn::Subject, "P1".to_string())],
            concept_path: Some("\\01\\Age\\".to_string()),
            numeric_value: Some(42.0),
            ..RawRecord::default()
        };
        let observation = record.into_observation(0).unwrap();
        assert_eq!(observation.concept.name, "\\01\\Age\\");
        assert_eq!(observation.concept.code, "");
        assert_eq!(observation.id(IdColumn::Subject), Some("P1"));
        assert_eq!(observation.numeric_value, Some(42.0));
    }

    #[test]
    fn path_is_required() {
        let error = RawRecord::default().into_observation(4).unwrap_err();
        assert_eq!(
            error.to_string(),
            "record 4 has no value for 'concept.conceptPath'"
        );
    }
}
