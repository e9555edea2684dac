//! Row measurement registry
//!
//! Per-key offset/size of each laid-out row along the scroll axis, in list
//! content coordinates.

use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

/// Offset and size of one row along the scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    pub offset: f32,
    pub size: f32,
}

impl Measurement {
    pub const fn new(offset: f32, size: f32) -> Self {
        Self { offset, size }
    }

    /// Far edge of the row
    pub fn end(&self) -> f32 {
        self.offset + self.size
    }

    pub fn midpoint(&self) -> f32 {
        self.offset + self.size / 2.0
    }

    /// A row with no extent has not been laid out yet
    pub fn is_laid_out(&self) -> bool {
        self.size > 0.0
    }
}

/// Keyed store of row measurements
#[derive(Debug)]
pub struct MeasurementRegistry<K> {
    rows: FxHashMap<K, Measurement>,
}

impl<K: Eq + Hash + Clone> MeasurementRegistry<K> {
    pub fn new() -> Self {
        Self {
            rows: FxHashMap::default(),
        }
    }

    /// Record a layout report, replacing any earlier entry for `key`
    pub fn record(&mut self, key: K, offset: f32, size: f32) {
        self.rows.insert(key, Measurement::new(offset, size));
    }

    pub fn get(&self, key: &K) -> Option<Measurement> {
        self.rows.get(key).copied()
    }

    /// Measurement for `key`, or a zero-size row at offset 0 if it has not
    /// been laid out
    pub fn get_or_default(&self, key: &K) -> Measurement {
        self.get(key).unwrap_or_default()
    }

    /// Drop entries whose keys are no longer part of the data
    pub fn retain_keys<'a>(&mut self, keys: impl IntoIterator<Item = &'a K>)
    where
        K: 'a,
    {
        let live: FxHashSet<&K> = keys.into_iter().collect();
        let before = self.rows.len();
        self.rows.retain(|key, _| live.contains(key));
        let pruned = before - self.rows.len();
        if pruned > 0 {
            tracing::trace!("measurements: pruned {} stale rows", pruned);
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<K: Eq + Hash + Clone> Default for MeasurementRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}
