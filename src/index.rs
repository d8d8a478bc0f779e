//! In-memory index
//!
//! Sorted mapping from each live key to the offset of its most recent
//! record in the log.
//!
//! ## Data Structure Choice
//! A sorted `Vec` of (key, offset) pairs searched by binary search:
//! - O(log n) exact-match lookups, the hot path for a read-heavy store
//! - O(n) shifts on fresh inserts, an accepted trade-off for simplicity
//! - One-shot sorted construction for startup replay, avoiding O(n²)
//!   incremental insertion over a large log
//!
//! A balanced tree would change the insert cost, not the contract; the
//! exact-match and ordered-iteration behavior here is what callers rely
//! on.

use std::collections::HashMap;

/// One index entry: a key and the offset of its latest record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub key: Vec<u8>,
    pub offset: u64,
}

/// Ordered key → offset mapping
///
/// Entries are kept sorted ascending by byte-lexicographic key order
/// with no duplicates. Entries are never removed — the store has no
/// delete operation.
#[derive(Debug, Default)]
pub struct Index {
    entries: Vec<IndexEntry>,
}

impl Index {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build the index in one shot from an unsorted mapping
    ///
    /// Used by startup replay: collect and sort once instead of
    /// inserting incrementally.
    pub fn bulk_load(pairs: HashMap<Vec<u8>, u64>) -> Self {
        let mut entries: Vec<IndexEntry> = pairs
            .into_iter()
            .map(|(key, offset)| IndexEntry { key, offset })
            .collect();
        entries.sort_unstable_by(|a, b| a.key.cmp(&b.key));

        Self { entries }
    }

    /// Look up the offset for an exact key — O(log n)
    pub fn find(&self, key: &[u8]) -> Option<u64> {
        self.entries
            .binary_search_by(|entry| entry.key.as_slice().cmp(key))
            .ok()
            .map(|i| self.entries[i].offset)
    }

    /// Insert a key or overwrite its offset, preserving sort order
    ///
    /// Overwrites are O(log n); fresh inserts pay an O(n) shift.
    pub fn upsert(&mut self, key: &[u8], offset: u64) {
        match self
            .entries
            .binary_search_by(|entry| entry.key.as_slice().cmp(key))
        {
            Ok(i) => self.entries[i].offset = offset,
            Err(i) => self.entries.insert(
                i,
                IndexEntry {
                    key: key.to_vec(),
                    offset,
                },
            ),
        }
    }

    /// Iterate entries in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no key has ever been written
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
