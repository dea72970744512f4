//! Non-hierarchical dimension merge.
//!
//! A reshaped dimension partition (Radiology or Study) is outer-joined onto
//! the hierarchical result on the identifiers both tables carry. Matching
//! rows combine as a cross product; rows without a partner on either side
//! are kept with the other side's cells missing.

use std::collections::BTreeMap;

use packer_model::{Concept, ExportRow, ExportTable, IdColumn, canonical_id_order};
use tracing::debug;

use crate::propagate::merge_cell;

/// Where an output column takes its cells from.
#[derive(Debug, Clone, Copy)]
struct ColumnSource {
    core: Option<usize>,
    partition: Option<usize>,
}

/// Join a dimension partition onto the core result.
///
/// A partition row matches a core row when every shared identifier is equal
/// or missing on the partition side. A core row missing the dimension itself
/// matches any partition row. Concept columns present on both sides combine
/// with [`merge_cell`].
pub fn merge_dimension(
    core: &ExportTable,
    partition: &ExportTable,
    dimension: IdColumn,
    separator: &str,
) -> ExportTable {
    let id_columns = canonical_id_order(
        core.id_columns
            .iter()
            .chain(&partition.id_columns)
            .copied()
            .chain(std::iter::once(dimension)),
    );
    let id_sources: Vec<ColumnSource> = id_columns
        .iter()
        .map(|column| ColumnSource {
            core: core.id_position(*column),
            partition: partition.id_position(*column),
        })
        .collect();
    // The dimension itself is shared only when an earlier merge brought it in.
    let shared: Vec<(usize, usize, bool)> = id_columns
        .iter()
        .zip(&id_sources)
        .filter_map(|(column, source)| {
            source
                .core
                .zip(source.partition)
                .map(|(core_index, partition_index)| {
                    (core_index, partition_index, *column == dimension)
                })
        })
        .collect();

    let mut concepts: Vec<Concept> = core.concepts.clone();
    let mut concept_sources: BTreeMap<String, ColumnSource> = core
        .concepts
        .iter()
        .enumerate()
        .map(|(index, concept)| {
            (
                concept.path.clone(),
                ColumnSource {
                    core: Some(index),
                    partition: None,
                },
            )
        })
        .collect();
    for (index, concept) in partition.concepts.iter().enumerate() {
        let source = concept_sources
            .entry(concept.path.clone())
            .or_insert_with(|| {
                concepts.push(concept.clone());
                ColumnSource {
                    core: None,
                    partition: None,
                }
            });
        source.partition = Some(index);
    }
    let value_sources: Vec<ColumnSource> = concepts
        .iter()
        .filter_map(|concept| concept_sources.get(&concept.path).copied())
        .collect();

    let mut merged = ExportTable::new(id_columns, concepts);
    let mut partition_matched = vec![false; partition.height()];
    let mut pair_count = 0usize;

    for core_row in &core.rows {
        let mut core_matched = false;
        for (index, partition_row) in partition.rows.iter().enumerate() {
            let matches = shared
                .iter()
                .all(|(core_index, partition_index, is_dimension)| {
                    match (&partition_row.ids[*partition_index], &core_row.ids[*core_index]) {
                        (None, _) => true,
                        (Some(_), None) => *is_dimension,
                        (Some(id), Some(core_id)) => id == core_id,
                    }
                });
            if !matches {
                continue;
            }
            core_matched = true;
            partition_matched[index] = true;
            pair_count += 1;
            merged.push_row(combine(
                Some(core_row),
                Some(partition_row),
                &id_sources,
                &value_sources,
                separator,
            ));
        }
        if !core_matched {
            merged.push_row(combine(
                Some(core_row),
                None,
                &id_sources,
                &value_sources,
                separator,
            ));
        }
    }
    for (partition_row, matched) in partition.rows.iter().zip(partition_matched) {
        if !matched {
            merged.push_row(combine(
                None,
                Some(partition_row),
                &id_sources,
                &value_sources,
                separator,
            ));
        }
    }

    debug!(
        dimension = %dimension,
        core_rows = core.height(),
        partition_rows = partition.height(),
        matched_pairs = pair_count,
        output_rows = merged.height(),
        "merged dimension partition"
    );
    merged
}

fn combine(
    core_row: Option<&ExportRow>,
    partition_row: Option<&ExportRow>,
    id_sources: &[ColumnSource],
    value_sources: &[ColumnSource],
    separator: &str,
) -> ExportRow {
    let ids = id_sources
        .iter()
        .map(|source| {
            let from_core = core_row
                .zip(source.core)
                .and_then(|(row, index)| row.ids[index].clone());
            from_core.or_else(|| {
                partition_row
                    .zip(source.partition)
                    .and_then(|(row, index)| row.ids[index].clone())
            })
        })
        .collect();
    let values = value_sources
        .iter()
        .map(|source| {
            let core_value = core_row
                .zip(source.core)
                .map(|(row, index)| row.values[index].clone())
                .unwrap_or_default();
            let partition_value = partition_row
                .zip(source.partition)
                .map(|(row, index)| row.values[index].clone())
                .unwrap_or_default();
            merge_cell(&core_value, &partition_value, separator)
        })
        .collect();
    ExportRow::new(ids, values)
}

/// Re-key a table to `id_columns`, filling columns it lacks with missing
/// identifiers.
pub fn reset_id_columns(table: &ExportTable, id_columns: &[IdColumn]) -> ExportTable {
    let positions: Vec<Option<usize>> = id_columns
        .iter()
        .map(|column| table.id_position(*column))
        .collect();
    let mut reset = ExportTable::new(id_columns.to_vec(), table.concepts.clone());
    for row in &table.rows {
        let ids = positions
            .iter()
            .map(|position| position.and_then(|index| row.ids[index].clone()))
            .collect();
        reset.push_row(ExportRow::new(ids, row.values.clone()));
    }
    reset
}
