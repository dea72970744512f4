//! Export table serialization.

pub mod error;
pub mod tsv;

pub use error::{OutputError, Result};
pub use tsv::{TSV_EXTENSION, export_file_name, to_tsv_string, write_tsv, write_tsv_to};
