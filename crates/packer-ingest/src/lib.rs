//! Observation ingestion.
//!
//! Loads the canonical long-form observation table from delimited text or
//! JSON and converts it into [`packer_model::ObservationTable`].

pub mod error;
pub mod frame;
pub mod json;
pub mod polars_utils;
pub mod reader;
pub mod record;

pub use error::{IngestError, Result};
pub use frame::observations_from_dataframe;
pub use json::{JsonRecord, observations_from_records, parse_records};
pub use reader::{ObservationFormat, read_delimited, read_observations};
pub use record::{
    CONCEPT_CODE_FIELD, CONCEPT_NAME_FIELD, CONCEPT_PATH_FIELD, NUMERIC_VALUE_FIELD,
    STRING_VALUE_FIELD,
};
