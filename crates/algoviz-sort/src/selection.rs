//! Selection sort as a step-emitting state machine.
//!
//! After outer step `i` the positions `[0, i]` hold the `i + 1` smallest
//! values in sorted order.

use tracing::debug;

use crate::mapping::check_lengths;
use crate::{Comparison, IndexMapping, Result, Sequence, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Scan,
    Place,
    Mark,
    Finished,
}

/// Lazy selection sort over a borrowed mapping.
pub struct SelectionSort<'a> {
    values: &'a Sequence,
    mapping: &'a mut IndexMapping,
    i: usize,
    j: usize,
    min_index: usize,
    phase: Phase,
}

impl<'a> SelectionSort<'a> {
    /// Start a sort of `mapping` over `values`.
    pub fn new(values: &'a Sequence, mapping: &'a mut IndexMapping) -> Result<Self> {
        check_lengths(values, mapping)?;
        debug!(len = values.len(), "selection sort started");
        let mut sort = Self {
            values,
            mapping,
            i: 0,
            j: 0,
            min_index: 0,
            phase: Phase::Finished,
        };
        if !values.is_empty() {
            sort.begin_outer(0);
        }
        Ok(sort)
    }

    /// The mapping as left by the last emitted step.
    pub fn mapping(&self) -> &IndexMapping {
        &*self.mapping
    }

    /// Position of the smallest value seen so far in the current outer step.
    pub fn min_index(&self) -> usize {
        self.min_index
    }

    fn begin_outer(&mut self, i: usize) {
        self.i = i;
        self.j = i + 1;
        self.min_index = i;
        self.phase = self.scan_or_place();
    }

    fn scan_or_place(&self) -> Phase {
        if self.j < self.values.len() {
            Phase::Scan
        } else {
            Phase::Place
        }
    }
}

impl Iterator for SelectionSort<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        match self.phase {
            Phase::Scan => {
                let (a, b) = (self.min_index, self.j);
                let outcome = Comparison::of(
                    self.mapping.value_at(self.values, a),
                    self.mapping.value_at(self.values, b),
                );
                if outcome == Comparison::Greater {
                    self.min_index = b;
                }
                self.j += 1;
                self.phase = self.scan_or_place();
                Some(Step::Compare { a, b, outcome })
            }
            Phase::Place => {
                self.phase = Phase::Mark;
                if self.min_index == self.i {
                    return Some(Step::Keep { position: self.i });
                }
                self.mapping.swap(self.i, self.min_index);
                Some(Step::Swap {
                    a: self.i,
                    b: self.min_index,
                })
            }
            Phase::Mark => {
                let i = self.i;
                if i + 1 < self.values.len() {
                    self.begin_outer(i + 1);
                } else {
                    self.phase = Phase::Finished;
                }
                Some(Step::Sorted { start: i, end: i + 1 })
            }
            Phase::Finished => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_values() {
        let values = Sequence::from_integers([29, 10, 14, 37, 13]);
        let mut mapping = IndexMapping::identity(values.len());
        SelectionSort::new(&values, &mut mapping).unwrap().for_each(drop);
        assert_eq!(mapping.apply(&values), vec![10.0, 13.0, 14.0, 29.0, 37.0]);
    }

    #[test]
    fn prefix_invariant_after_each_outer_step() {
        let values = Sequence::from_integers([5, 3, 9, 1, 7, 1, 4]);
        let mut expected: Vec<f64> = values.values().to_vec();
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let mut mapping = IndexMapping::identity(values.len());
        let mut sort = SelectionSort::new(&values, &mut mapping).unwrap();
        let mut outer = 0;

        while let Some(step) = sort.next() {
            if let Step::Sorted { start, end } = step {
                assert_eq!(start, outer);
                assert_eq!(end, outer + 1);
                let prefix = &sort.mapping().apply(&values)[..=outer];
                assert_eq!(prefix, &expected[..=outer]);
                outer += 1;
            }
        }
        assert_eq!(outer, values.len());
    }

    #[test]
    fn keep_when_minimum_in_place() {
        let values = Sequence::from_integers([1, 3, 2]);
        let mut mapping = IndexMapping::identity(3);
        let steps: Vec<_> = SelectionSort::new(&values, &mut mapping).unwrap().collect();

        assert_eq!(
            steps,
            vec![
                Step::Compare { a: 0, b: 1, outcome: Comparison::Less },
                Step::Compare { a: 0, b: 2, outcome: Comparison::Less },
                Step::Keep { position: 0 },
                Step::Sorted { start: 0, end: 1 },
                Step::Compare { a: 1, b: 2, outcome: Comparison::Greater },
                Step::Swap { a: 1, b: 2 },
                Step::Sorted { start: 1, end: 2 },
                Step::Keep { position: 2 },
                Step::Sorted { start: 2, end: 3 },
            ]
        );
    }

    #[test]
    fn compares_against_running_minimum() {
        let values = Sequence::from_integers([4, 2, 3, 1]);
        let mut mapping = IndexMapping::identity(4);
        let steps: Vec<_> = SelectionSort::new(&values, &mut mapping)
            .unwrap()
            .take(3)
            .collect();

        assert_eq!(
            steps,
            vec![
                Step::Compare { a: 0, b: 1, outcome: Comparison::Greater },
                Step::Compare { a: 1, b: 2, outcome: Comparison::Less },
                Step::Compare { a: 1, b: 3, outcome: Comparison::Greater },
            ]
        );
    }

    #[test]
    fn sorted_input_is_identity() {
        let values = Sequence::from_integers([1, 2, 2, 3]);
        let mut mapping = IndexMapping::identity(4);
        let swaps = SelectionSort::new(&values, &mut mapping)
            .unwrap()
            .filter(|s| matches!(s, Step::Swap { .. }))
            .count();
        assert_eq!(swaps, 0);
        assert!(mapping.is_identity());
    }

    #[test]
    fn empty_input_emits_nothing() {
        let values = Sequence::default();
        let mut mapping = IndexMapping::identity(0);
        assert_eq!(SelectionSort::new(&values, &mut mapping).unwrap().count(), 0);
    }
}
