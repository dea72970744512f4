//! Identifier schema resolution and partitioning.
//!
//! The identifier columns present in the input decide the shape of the
//! export. Rows without any non-hierarchical identifier form the hierarchical
//! core; each non-hierarchical dimension (Radiology, Study) gets its own
//! partition, reshaped separately and cross-joined back onto the core.

use packer_model::{IdColumn, Observation, ObservationTable, canonical_id_order};
use tracing::{debug, warn};

/// Identifier columns found in an observation table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSchema {
    /// Hierarchical identifiers present, shallowest first.
    pub hierarchy: Vec<IdColumn>,
    /// Non-hierarchical identifiers present, in merge order.
    pub dimensions: Vec<IdColumn>,
}

impl ResolvedSchema {
    pub fn resolve(table: &ObservationTable) -> Self {
        let present = canonical_id_order(table.id_columns.iter().copied());
        let (hierarchy, dimensions): (Vec<IdColumn>, Vec<IdColumn>) = present
            .into_iter()
            .partition(|column| column.is_hierarchical());
        Self {
            hierarchy,
            dimensions,
        }
    }

    /// Full ordered identifier column list of the export.
    pub fn id_columns(&self) -> Vec<IdColumn> {
        canonical_id_order(self.hierarchy.iter().chain(&self.dimensions).copied())
    }

    /// True when the input has no recognizable identifier at all.
    ///
    /// Such input is exported as a single global row.
    pub fn has_no_identifiers(&self) -> bool {
        self.hierarchy.is_empty() && self.dimensions.is_empty()
    }
}

/// A sub-table reshaped independently.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    /// Non-hierarchical identifier owning this partition, `None` for the core.
    pub dimension: Option<IdColumn>,
    pub id_columns: Vec<IdColumn>,
    pub observations: Vec<Observation>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// The core partition plus one partition per non-hierarchical dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitTable {
    pub schema: ResolvedSchema,
    pub core: Partition,
    pub partitions: Vec<Partition>,
}

/// Split an observation table into the hierarchical core and its
/// non-hierarchical partitions.
///
/// A row carrying several dimensions goes to the partition merged first and
/// keeps the later dimension identifiers there; the later merges then join
/// on them.
pub fn split_partitions(table: &ObservationTable) -> SplitTable {
    let schema = ResolvedSchema::resolve(table);

    let core_observations: Vec<Observation> = table
        .observations
        .iter()
        .filter(|observation| {
            schema
                .dimensions
                .iter()
                .all(|dimension| observation.id(*dimension).is_none())
        })
        .cloned()
        .collect();
    let core = Partition {
        dimension: None,
        id_columns: schema.hierarchy.clone(),
        observations: core_observations,
    };

    let partitions = (0..schema.dimensions.len())
        .map(|position| dimension_partition(table, &schema, position))
        .collect();

    SplitTable {
        schema,
        core,
        partitions,
    }
}

fn dimension_partition(
    table: &ObservationTable,
    schema: &ResolvedSchema,
    position: usize,
) -> Partition {
    let dimension = schema.dimensions[position];
    let (earlier, rest) = schema.dimensions.split_at(position);
    let later = &rest[1..];
    let max_depth = dimension
        .attach_depth()
        .and_then(IdColumn::depth)
        .unwrap_or(0);
    let allowed: Vec<IdColumn> = schema
        .hierarchy
        .iter()
        .copied()
        .filter(|column| column.depth().is_some_and(|depth| depth <= max_depth))
        .collect();

    let mut truncated = 0usize;
    let observations: Vec<Observation> = table
        .observations
        .iter()
        .filter(|observation| {
            observation.id(dimension).is_some()
                && earlier.iter().all(|column| observation.id(*column).is_none())
        })
        .map(|observation| {
            if observation
                .ids
                .keys()
                .any(|column| column.is_hierarchical() && !allowed.contains(column))
            {
                truncated += 1;
            }
            let mut scoped = observation.clone();
            scoped.ids.retain(|column, _| {
                *column == dimension || later.contains(column) || allowed.contains(column)
            });
            scoped
        })
        .collect();
    if truncated > 0 {
        warn!(
            dimension = %dimension,
            observation_count = truncated,
            "dropped hierarchical identifiers deeper than the dimension allows"
        );
    }

    // Keep hierarchical columns only as deep as the partition populates them.
    let deepest = observations
        .iter()
        .flat_map(|observation| observation.ids.keys())
        .filter_map(|column| column.depth())
        .max();
    let mut id_columns: Vec<IdColumn> = match deepest {
        Some(deepest) => allowed
            .into_iter()
            .filter(|column| column.depth().is_some_and(|depth| depth <= deepest))
            .collect(),
        None => Vec::new(),
    };
    id_columns.push(dimension);
    id_columns.extend(later.iter().copied().filter(|column| {
        observations
            .iter()
            .any(|observation| observation.id(*column).is_some())
    }));

    debug!(
        dimension = %dimension,
        observation_count = observations.len(),
        id_columns = ?id_columns,
        "resolved partition"
    );
    Partition {
        dimension: Some(dimension),
        id_columns,
        observations,
    }
}

#[cfg(test)]
mod tests {
    use packer_model::Concept;

    use super::*;

    fn concept(path: &str) -> Concept {
        Concept::new(path, "", path)
    }

    #[test]
    fn resolves_hierarchy_and_dimensions() {
        let table = ObservationTable::new([
            IdColumn::Study,
            IdColumn::Biomaterial,
            IdColumn::Subject,
            IdColumn::Diagnosis,
        ]);
        let schema = ResolvedSchema::resolve(&table);
        assert_eq!(
            schema.hierarchy,
            vec![IdColumn::Subject, IdColumn::Diagnosis, IdColumn::Biomaterial]
        );
        assert_eq!(schema.dimensions, vec![IdColumn::Study]);
        assert_eq!(schema.id_columns().last(), Some(&IdColumn::Study));
    }

    #[test]
    fn no_identifiers_is_not_an_error() {
        let schema = ResolvedSchema::resolve(&ObservationTable::default());
        assert!(schema.has_no_identifiers());
        assert!(schema.id_columns().is_empty());
    }

    #[test]
    fn study_rows_leave_the_core_and_lose_deeper_ids() {
        let table = ObservationTable::from_observations(vec![
            Observation::new(concept("\\age\\"))
                .with_id(IdColumn::Subject, "P1")
                .with_numeric_value(42.0),
            Observation::new(concept("\\study\\"))
                .with_id(IdColumn::Subject, "P1")
                .with_id(IdColumn::Diagnosis, "D1")
                .with_id(IdColumn::Study, "STUDY1")
                .with_string_value("S"),
        ]);

        let split = split_partitions(&table);

        assert_eq!(split.core.observations.len(), 1);
        assert_eq!(split.core.id_columns, vec![IdColumn::Subject, IdColumn::Diagnosis]);
        assert_eq!(split.partitions.len(), 1);
        let study = &split.partitions[0];
        assert_eq!(study.dimension, Some(IdColumn::Study));
        assert_eq!(study.id_columns, vec![IdColumn::Subject, IdColumn::Study]);
        assert_eq!(study.observations[0].id(IdColumn::Diagnosis), None);
    }

    #[test]
    fn radiology_keeps_populated_diagnosis() {
        let table = ObservationTable::from_observations(vec![
            Observation::new(concept("\\scan\\"))
                .with_id(IdColumn::Subject, "P1")
                .with_id(IdColumn::Diagnosis, "D1")
                .with_id(IdColumn::Radiology, "R1"),
            Observation::new(concept("\\study\\"))
                .with_id(IdColumn::Subject, "P1")
                .with_id(IdColumn::Radiology, "R2")
                .with_id(IdColumn::Study, "S1"),
        ]);

        let split = split_partitions(&table);

        assert!(split.core.is_empty());
        let radiology = &split.partitions[0];
        assert_eq!(
            radiology.id_columns,
            vec![
                IdColumn::Subject,
                IdColumn::Diagnosis,
                IdColumn::Radiology,
                IdColumn::Study
            ]
        );
        assert_eq!(radiology.observations.len(), 2);
        assert_eq!(radiology.observations[1].id(IdColumn::Study), Some("S1"));
        let study = &split.partitions[1];
        assert!(study.is_empty());
        assert_eq!(study.id_columns, vec![IdColumn::Study]);
    }
}
