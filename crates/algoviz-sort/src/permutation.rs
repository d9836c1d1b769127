//! Sort permutations and their inverses.
//!
//! Two readings of the same bijection show up when re-slotting visual
//! elements after a bulk re-order:
//!
//! - **source form**: slot `k` is filled from original index `p[k]`
//!   (what [`sorted_permutation`] returns);
//! - **target form**: original index `i` goes to slot `p[i]`.
//!
//! [`reverse_index_mapping`] converts one into the other.

use std::ops::Index;

/// A bijection over `[0, n)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// The identity permutation of length `n`.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Wrap raw indices.
    ///
    /// The caller guarantees the indices form a bijection over `[0, n)`.
    pub fn from_indices(indices: Vec<usize>) -> Self {
        debug_assert!(is_bijection(&indices), "not a permutation: {indices:?}");
        Self(indices)
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

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(i, &p)| i == p)
    }

    /// The inverse permutation, see [`reverse_index_mapping`].
    pub fn inverse(&self) -> Self {
        reverse_index_mapping(self)
    }

    /// `self ∘ other`: element `i` is `self[other[i]]`.
    pub fn compose(&self, other: &Self) -> Self {
        debug_assert_eq!(self.len(), other.len());
        Self(other.0.iter().map(|&i| self.0[i]).collect())
    }

    /// Shift every index by `offset`, for splicing a sub-range permutation
    /// into a larger one.
    pub fn offset(&self, offset: usize) -> Vec<usize> {
        self.0.iter().map(|&i| i + offset).collect()
    }

    /// Gather `items` in source form: element `k` of the result is
    /// `items[self[k]]`.
    pub fn gather<T: Clone>(&self, items: &[T]) -> Vec<T> {
        self.0.iter().map(|&i| items[i].clone()).collect()
    }
}

impl Index<usize> for Permutation {
    type Output = usize;

    #[inline]
    fn index(&self, index: usize) -> &usize {
        &self.0[index]
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(value: Permutation) -> Self {
        value.0
    }
}

/// Stable argsort: element `k` is the original index of the value that
/// lands in sorted slot `k`.
///
/// Equal values keep their original relative order, and `-0.0` equals `0.0`
/// as it does for the engines. NaN never compares equal to a number: it sorts
/// after every value when positive, before every value when negative.
pub fn sorted_permutation(values: &[f64]) -> Permutation {
    let mut indexed: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or_else(|| a.1.total_cmp(&b.1)));
    Permutation(indexed.into_iter().map(|(index, _)| index).collect())
}

/// Inverse of a permutation: `result[p[i]] = i`.
///
/// # Precondition
///
/// `permutation` must be a bijection over `[0, n)`. Anything else yields an
/// unspecified result (and trips a debug assertion).
pub fn reverse_index_mapping(permutation: &Permutation) -> Permutation {
    let mut reversed = vec![0; permutation.len()];
    for (i, &target) in permutation.0.iter().enumerate() {
        reversed[target] = i;
    }
    Permutation(reversed)
}

fn is_bijection(indices: &[usize]) -> bool {
    let mut seen = vec![false; indices.len()];
    indices.iter().all(|&i| i < seen.len() && !std::mem::replace(&mut seen[i], true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argsort_is_stable() {
        let perm = sorted_permutation(&[3.0, 1.0, 3.0, 0.5, 1.0]);
        assert_eq!(perm.as_slice(), &[3, 1, 4, 0, 2]);
    }

    #[test]
    fn sorted_input_gives_identity() {
        let perm = sorted_permutation(&[1.0, 2.0, 2.0, 9.0]);
        assert!(perm.is_identity());
    }

    #[test]
    fn inverse_round_trip() {
        let perm = sorted_permutation(&[40.0, 10.0, 30.0, 20.0]);
        let inverse = reverse_index_mapping(&perm);

        assert_eq!(perm.as_slice(), &[1, 3, 2, 0]);
        assert_eq!(inverse.as_slice(), &[3, 0, 2, 1]);
        assert!(perm.compose(&inverse).is_identity());
        assert!(inverse.compose(&perm).is_identity());
    }

    #[test]
    fn gather_sorts_values() {
        let values = [5.0, -1.0, 2.5];
        let perm = sorted_permutation(&values);
        assert_eq!(perm.gather(&values), vec![-1.0, 2.5, 5.0]);
    }

    #[test]
    fn offset_shifts_indices() {
        let perm = Permutation::from_indices(vec![1, 0]);
        assert_eq!(perm.offset(3), vec![4, 3]);
    }

    #[test]
    fn empty_permutation() {
        let perm = sorted_permutation(&[]);
        assert!(perm.is_empty());
        assert!(perm.inverse().is_identity());
    }

    #[test]
    fn bijection_check() {
        assert!(is_bijection(&[2, 0, 1]));
        assert!(!is_bijection(&[0, 0, 1]));
        assert!(!is_bijection(&[0, 3]));
    }

    #[test]
    fn nan_sorts_to_the_ends() {
        let values = [f64::NAN, 1.0, -f64::NAN, 0.0, f64::NAN];
        assert_eq!(sorted_permutation(&values).as_slice(), &[2, 3, 1, 0, 4]);
    }

    #[test]
    fn signed_zeros_keep_input_order() {
        assert_eq!(sorted_permutation(&[0.0, -0.0]).as_slice(), &[0, 1]);
        assert_eq!(sorted_permutation(&[-0.0, 0.0]).as_slice(), &[0, 1]);
    }
}
