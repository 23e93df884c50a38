//! Per-attribute value index.
//!
//! For each attribute, maps the comparison key of every value held by at
//! least one member to the set of members holding it, remembering one
//! display form. This is what makes distractor sourcing and eligibility
//! checks O(1) amortized per lookup.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::schema::AttrValue;

use super::member::MemberId;

/// Members holding one distinct value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct ValueEntry {
    /// A display form of the value (the first one seen).
    pub display: AttrValue,
    /// Members currently holding a value with this key.
    pub members: BTreeSet<MemberId>,
}

/// Index of one attribute's values, keyed by comparison key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct AttributeIndex {
    entries: BTreeMap<String, ValueEntry>,
}

impl AttributeIndex {
    pub fn insert(&mut self, value: &AttrValue, member: MemberId) {
        self.entries
            .entry(value.key())
            .or_insert_with(|| ValueEntry {
                display: value.clone(),
                members: BTreeSet::new(),
            })
            .members
            .insert(member);
    }

    /// Remove a member from a value's entry, dropping the entry when it
    /// empties so stale values never feed distractor pools.
    pub fn remove(&mut self, value: &AttrValue, member: MemberId) {
        let key = value.key();
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.members.remove(&member);
            if entry.members.is_empty() {
                self.entries.remove(&key);
            }
        }
    }

    pub fn members_with(&self, value: &AttrValue) -> BTreeSet<MemberId> {
        self.entries
            .get(&value.key())
            .map(|e| e.members.clone())
            .unwrap_or_default()
    }

    /// Display forms of all distinct values held by members other than
    /// `exclude`, skipping the value keyed `exclude_key` (the excluded
    /// member's own value).
    pub fn other_values(&self, exclude: MemberId, exclude_key: &str) -> Vec<AttrValue> {
        self.entries
            .iter()
            .filter(|(key, entry)| {
                key.as_str() != exclude_key
                    && entry.members.iter().any(|m| *m != exclude)
            })
            .map(|(_, entry)| entry.display.clone())
            .collect()
    }

    /// Number of distinct values in the index.
    pub fn distinct_values(&self) -> usize {
        self.entries.len()
    }
}
