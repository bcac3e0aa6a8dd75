//! Subject-group taxonomy entries collected across course pages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One subject group ("direction") from the catalog taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubjectGroup {
    /// Numeric catalog id, taken from the group link's query string
    pub id: u32,
    /// Short code, e.g. "01.03.02"
    pub code: String,
    /// Human-readable group title
    pub title: String,
}

impl SubjectGroup {
    /// Render as one row of the groups table.
    pub fn to_row(&self) -> Vec<String> {
        vec![self.id.to_string(), self.code.clone(), self.title.clone()]
    }
}

/// Deduplicated taxonomy keyed by group id, ordered ascending.
#[derive(Debug, Clone, Default)]
pub struct GroupMap {
    entries: BTreeMap<u32, SubjectGroup>,
}

impl GroupMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one group; a repeated id keeps the latest entry.
    pub fn insert(&mut self, group: SubjectGroup) {
        self.entries.insert(group.id, group);
    }

    /// Absorb every group seen on one page.
    pub fn extend<I: IntoIterator<Item = SubjectGroup>>(&mut self, groups: I) {
        for group in groups {
            self.insert(group);
        }
    }

    pub fn get(&self, id: u32) -> Option<&SubjectGroup> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubjectGroup> {
        self.entries.values()
    }

    /// Render the whole table, one row per group, ids ascending.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.entries.values().map(SubjectGroup::to_row).collect()
    }
}
