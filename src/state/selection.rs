//! Key sets for row selection and expansion.
//!
//! Rows are tracked by [`RowKey`], never by position, so a selection
//! survives filtering, page changes and refetches. Positions are computed
//! only when a view asks which of its visible rows are marked.

use std::collections::HashSet;

use crate::model::RowKey;

/// A set of marked rows (selected or expanded).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySet {
    keys: HashSet<RowKey>,
}

impl KeySet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is marked.
    pub fn contains(&self, key: &RowKey) -> bool {
        self.keys.contains(key)
    }

    /// Mark `key`. Returns true if it was not already marked.
    pub fn insert(&mut self, key: RowKey) -> bool {
        self.keys.insert(key)
    }

    /// Unmark `key`. Returns true if it was marked.
    pub fn remove(&mut self, key: &RowKey) -> bool {
        self.keys.remove(key)
    }

    /// Flip `key`. Returns true if it is marked afterwards.
    pub fn toggle(&mut self, key: RowKey) -> bool {
        if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    /// Copy of this set with `key` flipped.
    pub fn toggled(&self, key: RowKey) -> Self {
        let mut next = self.clone();
        next.toggle(key);
        next
    }

    /// Keep only keys accepted by `keep`.
    pub fn retain(&mut self, keep: impl FnMut(&RowKey) -> bool) {
        self.keys.retain(keep);
    }

    /// Number of marked rows.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing is marked.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate marked keys in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &RowKey> {
        self.keys.iter()
    }

    /// Keys in sorted order, for stable output.
    pub fn sorted(&self) -> Vec<RowKey> {
        let mut keys: Vec<RowKey> = self.keys.iter().cloned().collect();
        keys.sort();
        keys
    }

    /// Positions within `visible` whose key is marked, ascending.
    pub fn positions<'a, I>(&self, visible: I) -> Vec<usize>
    where
        I: IntoIterator<Item = &'a RowKey>,
    {
        visible
            .into_iter()
            .enumerate()
            .filter(|(_, key)| self.keys.contains(*key))
            .map(|(pos, _)| pos)
            .collect()
    }
}

impl FromIterator<RowKey> for KeySet {
    fn from_iter<T: IntoIterator<Item = RowKey>>(iter: T) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl Extend<RowKey> for KeySet {
    fn extend<T: IntoIterator<Item = RowKey>>(&mut self, iter: T) {
        self.keys.extend(iter);
    }
}

impl IntoIterator for KeySet {
    type Item = RowKey;
    type IntoIter = std::collections::hash_set::IntoIter<RowKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}
