//! Steps emitted by the sorting engines.

use std::cmp::Ordering;

/// Three-way result of comparing the logical values at two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparison {
    Less,
    Equal,
    Greater,
}

impl Comparison {
    /// Compare two finite values.
    pub fn of(a: f64, b: f64) -> Self {
        match a.partial_cmp(&b) {
            Some(Ordering::Less) => Comparison::Less,
            Some(Ordering::Greater) => Comparison::Greater,
            _ => Comparison::Equal,
        }
    }

    /// The symbol a renderer shows between the two operands.
    pub const fn symbol(&self) -> char {
        match self {
            Comparison::Less => '<',
            Comparison::Equal => '=',
            Comparison::Greater => '>',
        }
    }
}

impl From<Ordering> for Comparison {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Comparison::Less,
            Ordering::Equal => Comparison::Equal,
            Ordering::Greater => Comparison::Greater,
        }
    }
}

/// One atomic, observable unit of sorting progress.
///
/// Positions index into the [`IndexMapping`](crate::IndexMapping) being
/// sorted, never into the original values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type")
)]
pub enum Step {
    /// The values at `a` and `b` were compared
    Compare {
        a: usize,
        b: usize,
        outcome: Comparison,
    },

    /// The entries at `a` and `b` traded places
    Swap { a: usize, b: usize },

    /// The entry at `from` was copied into destination slot `to`
    Move { from: usize, to: usize },

    /// Positions `[start, end)` are in their final relative order
    Sorted { start: usize, end: usize },

    /// Bubble sort finished a pass without swapping
    NoMoreSwaps { pass: usize },

    /// Selection sort found the minimum already at `position`
    Keep { position: usize },
}

impl Step {
    /// Whether the step rewrites the mapping.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Step::Swap { .. } | Step::Move { .. })
    }

    /// Whether the step is a comparison.
    pub fn is_comparison(&self) -> bool {
        matches!(self, Step::Compare { .. })
    }
}
