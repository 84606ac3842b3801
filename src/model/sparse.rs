// src/model/sparse.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse feature vector, entries sorted by feature index with no zeros stored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(u32, f32)>,
}

impl SparseVector {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_counts(counts: &BTreeMap<u32, u32>) -> Self {
        Self {
            entries: counts
                .iter()
                .filter(|(_, &c)| c > 0)
                .map(|(&f, &c)| (f, c as f32))
                .collect(),
        }
    }

    /// Value of `feature`, zero when absent
    #[inline]
    pub fn get(&self, feature: u32) -> f32 {
        self.entries
            .binary_search_by_key(&feature, |&(f, _)| f)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    #[inline]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn features(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|&(f, _)| f)
    }
}
