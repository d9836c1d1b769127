//! The index mapping engines sort through.
//!
//! Position `p` holds the original index `M[p]`; the logical value at `p` is
//! `V[M[p]]`. A renderer keeps one visual element per original index and only
//! ever moves elements to follow the mapping.

use std::ops::Index;

use crate::permutation::Permutation;
use crate::{Error, Result, Sequence};

/// Mutable arena-style index array, initially the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexMapping(Vec<usize>);

impl IndexMapping {
    /// The identity mapping over `n` positions.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(i, &p)| i == p)
    }

    /// Logical value at `position`.
    #[inline]
    pub fn value_at(&self, values: &Sequence, position: usize) -> f64 {
        values[self.0[position]]
    }

    /// The values in mapped order.
    pub fn apply(&self, values: &Sequence) -> Vec<f64> {
        self.0.iter().map(|&i| values[i]).collect()
    }

    /// Move the entry at position `i` to position `targets[i]`, for every `i`.
    ///
    /// `targets` must be a permutation of the same length (target form).
    pub fn apply_targets(&mut self, targets: &Permutation) {
        debug_assert_eq!(targets.len(), self.len());
        let mut reordered = vec![0; self.len()];
        for (i, &entry) in self.0.iter().enumerate() {
            reordered[targets[i]] = entry;
        }
        self.0 = reordered;
    }

    /// Overwrite `[start, start + entries.len())` with `entries`, as when a
    /// merge buffer is committed.
    pub fn write_range(&mut self, start: usize, entries: &[usize]) {
        self.0[start..start + entries.len()].copy_from_slice(entries);
    }
}

pub(crate) fn check_lengths(values: &Sequence, mapping: &IndexMapping) -> Result<()> {
    if values.len() != mapping.len() {
        return Err(Error::LengthMismatch {
            values: values.len(),
            mapping: mapping.len(),
        });
    }
    Ok(())
}

impl Index<usize> for IndexMapping {
    type Output = usize;

    #[inline]
    fn index(&self, index: usize) -> &usize {
        &self.0[index]
    }
}

impl From<IndexMapping> for Permutation {
    fn from(mapping: IndexMapping) -> Self {
        Permutation::from_indices(mapping.0)
    }
}
