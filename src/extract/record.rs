// src/extract/record.rs

use super::date_parser::ShortDate;
use serde::Serialize;
use std::collections::btree_map::{self, BTreeMap};

/// Percentage sentinel for revisions that do not publish a baseline figure.
pub const PERCENT_UNPUBLISHED: i32 = -1;

/// One validated day of ridership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Record {
    #[serde(skip)]
    pub date: ShortDate,
    #[serde(rename = "ridership")]
    pub riders: u64,
    pub percent_baseline: i32,
}

/// Records keyed by the date text as it appeared in the source table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    entries: BTreeMap<String, Record>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert, replacing any earlier record for the same key.
    pub fn insert(&mut self, key: impl Into<String>, record: Record) -> Option<Record> {
        self.entries.insert(key.into(), record)
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Record> {
        self.entries.iter()
    }

    /// Fold `other` into `self`; `other` wins on shared keys.
    pub fn merge(&mut self, other: ResultSet) {
        self.entries.extend(other.entries);
    }

    /// Re-key by ISO `YYYY-MM-DD`. Iterates in key order, so when two source
    /// spellings (`03/15/23`, `3/15/23`) collide the later key wins.
    pub fn iso_keyed(&self) -> BTreeMap<String, Record> {
        self.entries
            .values()
            .map(|r| (r.date.to_string(), *r))
            .collect()
    }
}

impl Extend<(String, Record)> for ResultSet {
    fn extend<T: IntoIterator<Item = (String, Record)>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl FromIterator<(String, Record)> for ResultSet {
    fn from_iter<T: IntoIterator<Item = (String, Record)>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for ResultSet {
    type Item = (String, Record);
    type IntoIter = btree_map::IntoIter<String, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
