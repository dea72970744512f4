//! Ancestor-to-descendant value propagation.
//!
//! Rows are sorted with missing identifiers last so that every descendant is
//! emitted before its ancestors. When an ancestor arrives, the output tail
//! holds the contiguous run of its descendants; the ancestor's values are
//! merged into each of them and the ancestor itself is dropped. Rows without
//! descendants survive unchanged, so only maximal identifier tuples remain.

use packer_model::{CellValue, ExportRow, ExportTable};
use tracing::debug;

use crate::order::compare_ids_missing_last;

/// True when `ancestor` is missing or equal on every identifier of
/// `descendant`.
///
/// A row counts as its own ancestor; pivoted tables never repeat a tuple.
pub fn is_ancestor(ancestor: &ExportRow, descendant: &ExportRow) -> bool {
    ancestor
        .ids
        .iter()
        .zip(&descendant.ids)
        .all(|(ancestor, descendant)| ancestor.is_none() || ancestor == descendant)
}

/// Combine a descendant cell with its ancestor's cell.
///
/// The descendant's own value is kept first. Distinct ancestor values are
/// appended after `separator` unless already one of the separated parts.
pub fn merge_cell(descendant: &CellValue, ancestor: &CellValue, separator: &str) -> CellValue {
    if ancestor.is_empty() || descendant == ancestor {
        return descendant.clone();
    }
    if descendant.is_empty() {
        return ancestor.clone();
    }
    let present = descendant.render();
    let incoming = ancestor.render();
    let already_present = if separator.is_empty() {
        present == incoming
    } else {
        present.split(separator).any(|part| part == incoming)
    };
    if already_present {
        descendant.clone()
    } else {
        CellValue::Text(format!("{present}{separator}{incoming}"))
    }
}

fn absorb(descendant: &mut ExportRow, ancestor: &ExportRow, separator: &str) {
    for (target, source) in descendant.values.iter_mut().zip(&ancestor.values) {
        *target = merge_cell(target, source, separator);
    }
}

/// Propagate ancestor values into descendant rows and drop the absorbed
/// ancestors.
///
/// Tables of zero or one row are returned unchanged.
pub fn merge_redundant_rows(table: &ExportTable, separator: &str) -> ExportTable {
    if table.height() <= 1 {
        return table.clone();
    }

    let mut sorted: Vec<&ExportRow> = table.rows.iter().collect();
    sorted.sort_by(|left, right| compare_ids_missing_last(&left.ids, &right.ids));

    let mut merged: Vec<ExportRow> = Vec::with_capacity(sorted.len());
    let mut absorbed_count = 0usize;
    for row in sorted {
        let mut absorbed = false;
        for existing in merged.iter_mut().rev() {
            if !is_ancestor(row, existing) {
                break;
            }
            absorb(existing, row, separator);
            absorbed = true;
        }
        if absorbed {
            absorbed_count += 1;
        } else {
            merged.push(row.clone());
        }
    }

    debug!(
        input_rows = table.height(),
        output_rows = merged.len(),
        absorbed = absorbed_count,
        "propagated ancestor values"
    );
    ExportTable {
        id_columns: table.id_columns.clone(),
        concepts: table.concepts.clone(),
        rows: merged,
    }
}
