//! Long-to-wide reshaping of clinical observations.
//!
//! The pipeline is a chain of pure stages over in-memory tables:
//!
//! - **schema**: identifier columns present and the core/dimension split
//! - **consolidate**: one value per (identifier tuple, concept path)
//! - **pivot**: one column per concept
//! - **propagate**: ancestor values pushed into descendant rows
//! - **merge**: Radiology and Study partitions joined onto the core
//! - **format**: presentation strings, dates re-rendered
//! - **order**: final column and row order
//!
//! [`export_table`] runs them all; [`filter_rows`] restricts a finished
//! export to the identifiers present in another.

pub mod consolidate;
pub mod datetime;
pub mod error;
pub mod filter;
pub mod format;
pub mod merge;
pub mod options;
pub mod order;
pub mod pipeline;
pub mod pivot;
pub mod propagate;
pub mod schema;

pub use consolidate::{KeyedTable, KeyedValue, consolidate};
pub use error::{Result, TransformError};
pub use filter::filter_rows;
pub use format::{ColumnKind, format_table, is_date_column};
pub use merge::merge_dimension;
pub use options::{DEFAULT_DATE_FORMAT, DEFAULT_MULTI_VALUE_SEPARATOR, ExportOptions};
pub use order::{order_columns, order_rows, order_table};
pub use pipeline::export_table;
pub use pivot::{order_concepts, pivot};
pub use propagate::{merge_cell, merge_redundant_rows};
pub use schema::{Partition, ResolvedSchema, SplitTable, split_partitions};
