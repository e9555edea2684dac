//! Key/index map
//!
//! Associates each stable item key with its position in the current data
//! sequence. Rebuilt synchronously whenever the data is replaced.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Bidirectional key ↔ index association
#[derive(Debug)]
pub struct KeyIndexMap<K> {
    index_of: FxHashMap<K, usize>,
    keys: Vec<K>,
}

impl<K: Eq + Hash + Clone> KeyIndexMap<K> {
    pub fn new() -> Self {
        Self {
            index_of: FxHashMap::default(),
            keys: Vec::new(),
        }
    }

    /// Replace the map with one entry per element of `sequence`
    pub fn rebuild<T>(&mut self, sequence: &[T], key_of: impl Fn(&T, usize) -> K) {
        self.keys = sequence
            .iter()
            .enumerate()
            .map(|(i, item)| key_of(item, i))
            .collect();
        self.index_of.clear();
        self.index_of.reserve(self.keys.len());
        for (i, key) in self.keys.iter().enumerate() {
            self.index_of.insert(key.clone(), i);
        }
    }

    /// Patch the lookup when a row is rendered at a different index than the
    /// map recorded. The data-order key list is left as the last rebuild saw
    /// it.
    pub fn set(&mut self, key: K, index: usize) {
        self.index_of.insert(key, index);
    }

    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.index_of.get(key).copied()
    }

    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }

    /// Keys in data order
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Whether `other` lists exactly the same keys in the same order
    pub fn same_order(&self, other: &[K]) -> bool {
        self.keys.as_slice() == other
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K: Eq + Hash + Clone> Default for KeyIndexMap<K> {
    fn default() -> Self {
        Self::new()
    }
}
