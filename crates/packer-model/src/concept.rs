//! Concepts (clinical variables) and their owning-entity groups.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A clinical variable as referenced by an observation.
///
/// The path is unique per variable. Names are display labels and may collide;
/// two concepts sharing a name stay separate columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Concept {
    pub path: String,
    pub code: String,
    pub name: String,
}

impl Concept {
    pub fn new(path: impl Into<String>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            code: code.into(),
            name: name.into(),
        }
    }

    /// Owning entity derived from the concept code prefix.
    pub fn entity(&self) -> Option<EntityPrefix> {
        EntityPrefix::for_code(&self.code)
    }

    /// Position of the owning entity group; unmatched codes rank last.
    pub fn group_rank(&self) -> usize {
        self.entity()
            .map_or(EntityPrefix::ORDER.len(), EntityPrefix::rank)
    }

    /// Export column order: entity group, then name, then path.
    pub fn display_cmp(&self, other: &Concept) -> Ordering {
        self.group_rank()
            .cmp(&other.group_rank())
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.path.cmp(&other.path))
    }
}

/// Concept code prefixes naming the entity a variable belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityPrefix {
    Individual,
    Diagnosis,
    Biosource,
    Biomaterial,
    Radiology,
    Study,
    IndividualStudy,
}

impl EntityPrefix {
    pub const ORDER: [EntityPrefix; 7] = [
        EntityPrefix::Individual,
        EntityPrefix::Diagnosis,
        EntityPrefix::Biosource,
        EntityPrefix::Biomaterial,
        EntityPrefix::Radiology,
        EntityPrefix::Study,
        EntityPrefix::IndividualStudy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityPrefix::Individual => "Individual",
            EntityPrefix::Diagnosis => "Diagnosis",
            EntityPrefix::Biosource => "Biosource",
            EntityPrefix::Biomaterial => "Biomaterial",
            EntityPrefix::Radiology => "Radiology",
            EntityPrefix::Study => "Study",
            EntityPrefix::IndividualStudy => "IndividualStudy",
        }
    }

    pub fn rank(self) -> usize {
        Self::ORDER
            .iter()
            .position(|prefix| *prefix == self)
            .unwrap_or(Self::ORDER.len())
    }

    /// Longest prefix `P` such that `code` starts with `"P."`.
    pub fn for_code(code: &str) -> Option<Self> {
        Self::ORDER
            .into_iter()
            .filter(|prefix| {
                code.strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('.'))
            })
            .max_by_key(|prefix| prefix.as_str().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_requires_dot_separator() {
        assert_eq!(
            EntityPrefix::for_code("Individual.Age"),
            Some(EntityPrefix::Individual)
        );
        assert_eq!(
            EntityPrefix::for_code("IndividualStudy.ID"),
            Some(EntityPrefix::IndividualStudy)
        );
        assert_eq!(EntityPrefix::for_code("Individuals.Age"), None);
        assert_eq!(EntityPrefix::for_code("patient_concept_1"), None);
        assert_eq!(EntityPrefix::for_code(""), None);
    }

    #[test]
    fn display_order_groups_then_names() {
        let study = Concept::new("\\s\\", "Study.title", "A title");
        let age = Concept::new("\\a\\", "Individual.age", "Z age");
        let other = Concept::new("\\o\\", "unknown", "A other");
        let mut concepts = vec![other.clone(), study.clone(), age.clone()];
        concepts.sort_by(Concept::display_cmp);
        assert_eq!(concepts, vec![age, study, other]);
    }

    #[test]
    fn name_collisions_break_on_path() {
        let first = Concept::new("\\01\\Name\\", "Diagnosis.name", "Name");
        let second = Concept::new("\\02\\Name\\", "Diagnosis.name2", "Name");
        assert_eq!(first.display_cmp(&second), Ordering::Less);
    }
}
