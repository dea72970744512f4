//! Export pipeline composition.
//!
//! 1. Split the observations into the hierarchical core and one partition per
//!    non-hierarchical dimension
//! 2. Consolidate, pivot and propagate each partition on its own
//! 3. Merge the dimension partitions onto the core (Radiology, then Study)
//! 4. Format cells and fix the final column and row order

use std::time::Instant;

use packer_model::{ExportTable, IdColumn, ObservationTable};
use tracing::{debug, info, info_span, warn};

use crate::consolidate::consolidate;
use crate::error::Result;
use crate::format::format_table;
use crate::merge::{merge_dimension, reset_id_columns};
use crate::options::ExportOptions;
use crate::order::order_table;
use crate::pivot::pivot;
use crate::propagate::merge_redundant_rows;
use crate::schema::{Partition, split_partitions};

/// Consolidate, pivot and propagate one partition.
pub fn reshape_partition(partition: &Partition, options: &ExportOptions) -> Result<ExportTable> {
    let keyed = consolidate(partition)?;
    let pivoted = pivot(&keyed);
    Ok(merge_redundant_rows(
        &pivoted,
        &options.multi_value_separator,
    ))
}

/// Run the full export over an observation table.
pub fn export_table(observations: &ObservationTable, options: &ExportOptions) -> Result<ExportTable> {
    options.validate()?;
    let export_span = info_span!(
        "export",
        observation_count = observations.len(),
        id_columns = ?observations.id_columns
    );
    let _export_guard = export_span.enter();
    let export_start = Instant::now();

    let split = split_partitions(observations);
    let id_columns = split.schema.id_columns();
    if observations.is_empty() {
        warn!("no observations to export");
        return Ok(ExportTable::new(id_columns, Vec::new()));
    }
    if split.schema.has_no_identifiers() {
        warn!("no identifier columns found, exporting a single row");
    }

    let mut merged = info_span!("reshape_core").in_scope(|| -> Result<ExportTable> {
        let start = Instant::now();
        let table = reshape_partition(&split.core, options)?;
        debug!(
            observation_count = split.core.len(),
            row_count = table.height(),
            duration_ms = start.elapsed().as_millis(),
            "core reshaped"
        );
        Ok(table)
    })?;

    for partition in &split.partitions {
        let Some(dimension) = partition.dimension else {
            continue;
        };
        merged = info_span!("merge_dimension", dimension = %dimension).in_scope(
            || -> Result<ExportTable> {
                let start = Instant::now();
                let reshaped = reshape_partition(partition, options)?;
                let table = merge_dimension(
                    &merged,
                    &reshaped,
                    dimension,
                    &options.multi_value_separator,
                );
                debug!(
                    partition_rows = reshaped.height(),
                    row_count = table.height(),
                    duration_ms = start.elapsed().as_millis(),
                    "dimension merged"
                );
                Ok(table)
            },
        )?;
    }

    let complete = reset_id_columns(&merged, &id_columns);
    let formatted = format_table(&complete, options);
    let ordered = order_table(&formatted);

    info!(
        row_count = ordered.height(),
        concept_count = ordered.concepts.len(),
        id_columns = ?ordered.id_columns.iter().copied().map(IdColumn::label).collect::<Vec<_>>(),
        duration_ms = export_start.elapsed().as_millis(),
        "export table built"
    );
    Ok(ordered)
}
