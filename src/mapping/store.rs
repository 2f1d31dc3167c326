//! Immutable path → URL lookup table.
//!
//! # Design Decisions
//! - Exact, case-sensitive key equality; no prefix or pattern matching
//! - Duplicate paths during construction: last write wins
//! - No mutation API once built (safe to share across threads unsynchronized)

use std::collections::HashMap;

use crate::mapping::record::PathUrl;

/// Read-only mapping from request path to redirect destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingStore {
    entries: HashMap<String, String>,
}

impl MappingStore {
    /// Build a store from records in sequence order.
    pub fn from_records(records: impl IntoIterator<Item = PathUrl>) -> Self {
        records.into_iter().collect()
    }

    /// Destination for `path`, if mapped.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(path, url)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }
}

impl FromIterator<PathUrl> for MappingStore {
    fn from_iter<I: IntoIterator<Item = PathUrl>>(iter: I) -> Self {
        iter.into_iter()
            .map(|record| (record.path, record.url))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for MappingStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries = HashMap::new();
        for (path, url) in iter {
            entries.insert(path.into(), url.into());
        }
        Self { entries }
    }
}

impl From<HashMap<String, String>> for MappingStore {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}
