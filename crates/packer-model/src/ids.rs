//! Identifier columns of the export schema.
//!
//! Observations are keyed by a variable-length tuple of identifiers. Four of
//! them form a strict hierarchy (Subject, Diagnosis, Biosource, Biomaterial);
//! Radiology and Study attach to a hierarchical prefix without nesting further
//! and are combined with the hierarchy by cross-product.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An identifier column known to the export.
///
/// The derived ordering is the output column order: hierarchical identifiers
/// shallow to deep, then Radiology, then Study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IdColumn {
    Subject,
    Diagnosis,
    Biosource,
    Biomaterial,
    Radiology,
    Study,
}

impl IdColumn {
    /// Every identifier column in output order.
    pub const ALL: [IdColumn; 6] = [
        IdColumn::Subject,
        IdColumn::Diagnosis,
        IdColumn::Biosource,
        IdColumn::Biomaterial,
        IdColumn::Radiology,
        IdColumn::Study,
    ];

    /// Hierarchical identifiers, shallowest first.
    pub const HIERARCHY: [IdColumn; 4] = [
        IdColumn::Subject,
        IdColumn::Diagnosis,
        IdColumn::Biosource,
        IdColumn::Biomaterial,
    ];

    /// Non-hierarchical identifiers in merge order.
    pub const NON_HIERARCHICAL: [IdColumn; 2] = [IdColumn::Radiology, IdColumn::Study];

    /// Field name of this identifier in the long-form observation table.
    pub fn source_field(self) -> &'static str {
        match self {
            IdColumn::Subject => "patient.subjectIds.SUBJ_ID",
            IdColumn::Diagnosis => "Diagnosis",
            IdColumn::Biosource => "Biosource",
            IdColumn::Biomaterial => "Biomaterial",
            IdColumn::Radiology => "Radiology",
            IdColumn::Study => "Study",
        }
    }

    /// Column header of this identifier in the export.
    pub fn label(self) -> &'static str {
        match self {
            IdColumn::Subject => "Subject Id",
            IdColumn::Diagnosis => "Diagnosis Id",
            IdColumn::Biosource => "Biosource Id",
            IdColumn::Biomaterial => "Biomaterial Id",
            IdColumn::Radiology => "Radiology Id",
            IdColumn::Study => "Study Id",
        }
    }

    pub fn is_hierarchical(self) -> bool {
        self.depth().is_some()
    }

    /// Depth in the hierarchy (Subject = 0), `None` for non-hierarchical columns.
    pub fn depth(self) -> Option<usize> {
        Self::HIERARCHY.iter().position(|column| *column == self)
    }

    /// Deepest hierarchical identifier a non-hierarchical dimension may carry.
    ///
    /// Returns `None` for hierarchical columns.
    pub fn attach_depth(self) -> Option<IdColumn> {
        match self {
            IdColumn::Radiology => Some(IdColumn::Diagnosis),
            IdColumn::Study => Some(IdColumn::Subject),
            _ => None,
        }
    }
}

impl fmt::Display for IdColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sort identifier columns into output order and drop duplicates.
pub fn canonical_id_order(columns: impl IntoIterator<Item = IdColumn>) -> Vec<IdColumn> {
    let mut ordered: Vec<IdColumn> = columns.into_iter().collect();
    ordered.sort();
    ordered.dedup();
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchy_depths() {
        assert_eq!(IdColumn::Subject.depth(), Some(0));
        assert_eq!(IdColumn::Biomaterial.depth(), Some(3));
        assert_eq!(IdColumn::Study.depth(), None);
        assert!(!IdColumn::Radiology.is_hierarchical());
    }

    #[test]
    fn source_fields_differ_from_labels() {
        assert_eq!(IdColumn::Subject.source_field(), "patient.subjectIds.SUBJ_ID");
        assert_eq!(IdColumn::Study.source_field(), "Study");
        assert!(
            IdColumn::ALL
                .iter()
                .all(|column| column.source_field() != column.label())
        );
    }

    #[test]
    fn canonical_order_places_non_hierarchical_last() {
        let ordered = canonical_id_order([
            IdColumn::Study,
            IdColumn::Biosource,
            IdColumn::Subject,
            IdColumn::Radiology,
            IdColumn::Subject,
        ]);
        assert_eq!(
            ordered,
            vec![
                IdColumn::Subject,
                IdColumn::Biosource,
                IdColumn::Radiology,
                IdColumn::Study
            ]
        );
    }
}
