//! Data model for clinical observation exports.
//!
//! - **ids**: identifier columns and the Subject → Diagnosis → Biosource →
//!   Biomaterial hierarchy plus the Radiology and Study dimensions
//! - **concept**: clinical variables and their owning-entity prefixes
//! - **value**: cell values and number rendering
//! - **observation**: the long-form input table
//! - **table**: the wide export table

pub mod concept;
pub mod ids;
pub mod observation;
pub mod table;
pub mod value;

pub use concept::{Concept, EntityPrefix};
pub use ids::{IdColumn, canonical_id_order};
pub use observation::{Observation, ObservationTable};
pub use table::{ExportRow, ExportTable, IdKey};
pub use value::{CellValue, format_number};
