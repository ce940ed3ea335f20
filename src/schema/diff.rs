//! Schema Diff
//!
//! Set difference between the existing and desired field lists.

use std::collections::HashSet;

use super::FieldName;

/// Fields unique to each side of a schema comparison
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDiff {
    /// In desired, not in existing (desired order)
    pub added: Vec<FieldName>,

    /// In existing, not in desired (existing order)
    pub removed: Vec<FieldName>,
}

impl SchemaDiff {
    /// Compare an existing header against the desired fields
    pub fn compute(existing: &[FieldName], desired: &[FieldName]) -> Self {
        let existing_set: HashSet<&str> = existing.iter().map(String::as_str).collect();
        let desired_set: HashSet<&str> = desired.iter().map(String::as_str).collect();

        let added = desired
            .iter()
            .filter(|f| !existing_set.contains(f.as_str()))
            .cloned()
            .collect();
        let removed = existing
            .iter()
            .filter(|f| !desired_set.contains(f.as_str()))
            .cloned()
            .collect();

        Self { added, removed }
    }

    /// True when both sides hold the same set of fields
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Existing fields in place, then the added ones
    pub fn merged(&self, existing: &[FieldName]) -> Vec<FieldName> {
        existing
            .iter()
            .chain(self.added.iter())
            .cloned()
            .collect()
    }
}
