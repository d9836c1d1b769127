//! Shared fixtures for the cross-crate tests.

use algoviz_sort::Sequence;

/// Inputs with the shapes that trip up step emission: empty, single, ties,
/// sorted, reversed and an odd length.
pub fn fixtures() -> Vec<Sequence> {
    [
        vec![],
        vec![4],
        vec![2, 2, 2],
        vec![1, 2, 3, 4, 5],
        vec![6, 5, 4, 3, 2, 1],
        vec![31, 4, 15, 9, 26, 5, 35],
        vec![3, 1, 3, 0, 1],
    ]
    .into_iter()
    .map(Sequence::from_integers)
    .collect()
}

/// Whether `values` is non-decreasing.
pub fn is_non_decreasing(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}
