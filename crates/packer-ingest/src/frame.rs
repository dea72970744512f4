//! DataFrame to observation table conversion.

use polars::prelude::{Column, DataFrame};
use tracing::debug;

use packer_model::{IdColumn, ObservationTable};

use crate::error::{IngestError, Result};
use crate::polars_utils::{any_to_f64, any_to_text};
use crate::record::{
    CONCEPT_CODE_FIELD, CONCEPT_NAME_FIELD, CONCEPT_PATH_FIELD, NUMERIC_VALUE_FIELD, RawRecord,
    STRING_VALUE_FIELD,
};

fn optional_column<'a>(df: &'a DataFrame, name: &str) -> Option<&'a Column> {
    df.column(name).ok()
}

fn text_at(column: Option<&Column>, row: usize) -> Result<Option<String>> {
    match column {
        Some(column) => Ok(any_to_text(column.get(row)?)),
        None => Ok(None),
    }
}

/// Convert a frame holding canonical observation fields.
///
/// Identifier columns found in the frame define the table's identifier
/// columns, populated or not. Other columns are ignored. A frame with rows
/// but no concept path column is rejected.
pub fn observations_from_dataframe(df: &DataFrame) -> Result<ObservationTable> {
    let id_columns: Vec<(IdColumn, &Column)> = IdColumn::ALL
        .into_iter()
        .filter_map(|column| optional_column(df, column.source_field()).map(|data| (column, data)))
        .collect();
    let mut table = ObservationTable::new(id_columns.iter().map(|(column, _)| *column));
    if df.height() == 0 {
        return Ok(table);
    }

    let path_column =
        optional_column(df, CONCEPT_PATH_FIELD).ok_or_else(|| IngestError::MissingColumn {
            column: CONCEPT_PATH_FIELD.to_string(),
        })?;
    let code_column = optional_column(df, CONCEPT_CODE_FIELD);
    let name_column = optional_column(df, CONCEPT_NAME_FIELD);
    let string_column = optional_column(df, STRING_VALUE_FIELD);
    let numeric_column = optional_column(df, NUMERIC_VALUE_FIELD);

    for row in 0..df.height() {
        let mut ids = Vec::with_capacity(id_columns.len());
        for (column, data) in &id_columns {
            if let Some(id) = any_to_text(data.get(row)?) {
                ids.push((*column, id));
            }
        }
        let numeric_value = match numeric_column {
            Some(data) => {
                let value = data.get(row)?;
                match (any_to_f64(value.clone()), any_to_text(value)) {
                    (Some(number), _) => Some(number),
                    (None, None) => None,
                    (None, Some(text)) => {
                        return Err(IngestError::InvalidNumber {
                            row,
                            column: NUMERIC_VALUE_FIELD.to_string(),
                            value: text,
                        });
                    }
                }
            }
            None => None,
        };
        let record = RawRecord {
            ids,
            concept_path: text_at(Some(path_column), row)?,
            concept_code: text_at(code_column, row)?,
            concept_name: text_at(name_column, row)?,
            string_value: text_at(string_column, row)?,
            numeric_value,
        };
        table.push(record.into_observation(row)?);
    }

    debug!(
        row_count = table.len(),
        id_columns = ?table.id_columns,
        "converted observation frame"
    );
    Ok(table)
}
