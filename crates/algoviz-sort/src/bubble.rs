//! Bubble sort as a step-emitting state machine.
//!
//! Pass `i` compares neighbours `(j, j + 1)` for `j` in `0..n - i - 1` and
//! swaps them when the left value is strictly greater, so equal values never
//! trade places. A pass without a swap ends the sort early with
//! [`Step::NoMoreSwaps`].

use tracing::debug;

use crate::mapping::check_lengths;
use crate::{Comparison, IndexMapping, Result, Sequence, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Compare,
    Swap,
    EndPass,
    Settle { start: usize, end: usize },
    Finished,
}

/// Lazy bubble sort over a borrowed mapping.
pub struct BubbleSort<'a> {
    values: &'a Sequence,
    mapping: &'a mut IndexMapping,
    pass: usize,
    j: usize,
    swapped: bool,
    phase: Phase,
}

impl<'a> BubbleSort<'a> {
    /// Start a sort of `mapping` over `values`.
    pub fn new(values: &'a Sequence, mapping: &'a mut IndexMapping) -> Result<Self> {
        check_lengths(values, mapping)?;
        let n = values.len();
        let phase = match n {
            0 => Phase::Finished,
            1 => Phase::Settle { start: 0, end: 1 },
            _ => Phase::Compare,
        };
        debug!(len = n, "bubble sort started");
        Ok(Self {
            values,
            mapping,
            pass: 0,
            j: 0,
            swapped: false,
            phase,
        })
    }

    /// The mapping as left by the last emitted step.
    pub fn mapping(&self) -> &IndexMapping {
        &*self.mapping
    }

    /// Index of the current outer pass.
    pub fn pass(&self) -> usize {
        self.pass
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}

impl Iterator for BubbleSort<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let n = self.len();
        match self.phase {
            Phase::Compare => {
                let (a, b) = (self.j, self.j + 1);
                let outcome = Comparison::of(
                    self.mapping.value_at(self.values, a),
                    self.mapping.value_at(self.values, b),
                );
                self.phase = if outcome == Comparison::Greater {
                    Phase::Swap
                } else {
                    self.advance_inner()
                };
                Some(Step::Compare { a, b, outcome })
            }
            Phase::Swap => {
                let (a, b) = (self.j, self.j + 1);
                self.mapping.swap(a, b);
                self.swapped = true;
                self.phase = self.advance_inner();
                Some(Step::Swap { a, b })
            }
            Phase::EndPass => {
                let pass = self.pass;
                if !self.swapped {
                    debug!(pass, "no swaps in pass, stopping early");
                    self.phase = Phase::Settle { start: 0, end: n - pass };
                    return Some(Step::NoMoreSwaps { pass });
                }

                self.pass += 1;
                self.j = 0;
                self.swapped = false;
                self.phase = if self.pass == n - 1 {
                    Phase::Settle { start: 0, end: 1 }
                } else {
                    Phase::Compare
                };
                Some(Step::Sorted {
                    start: n - pass - 1,
                    end: n - pass,
                })
            }
            Phase::Settle { start, end } => {
                self.phase = Phase::Finished;
                Some(Step::Sorted { start, end })
            }
            Phase::Finished => None,
        }
    }
}

impl BubbleSort<'_> {
    fn advance_inner(&mut self) -> Phase {
        self.j += 1;
        if self.j < self.len() - self.pass - 1 {
            Phase::Compare
        } else {
            Phase::EndPass
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn run(values: &Sequence) -> (Vec<Step>, IndexMapping) {
        let mut mapping = IndexMapping::identity(values.len());
        let steps = BubbleSort::new(values, &mut mapping).unwrap().collect();
        (steps, mapping)
    }

    #[test]
    fn sorts_values() {
        let values = Sequence::from_integers([5, 1, 4, 2, 8]);
        let (_, mapping) = run(&values);
        assert_eq!(mapping.apply(&values), vec![1.0, 2.0, 4.0, 5.0, 8.0]);
    }

    #[test]
    fn sorted_input_stops_after_one_pass() {
        let values = Sequence::from_integers([1, 2, 3, 4]);
        let (steps, mapping) = run(&values);

        assert!(mapping.is_identity());
        assert!(!steps.iter().any(|s| matches!(s, Step::Swap { .. })));
        assert_eq!(steps.iter().filter(|s| s.is_comparison()).count(), 3);
        assert_eq!(
            &steps[3..],
            &[
                Step::NoMoreSwaps { pass: 0 },
                Step::Sorted { start: 0, end: 4 }
            ]
        );
    }

    #[test]
    fn reversed_input_runs_every_pass() {
        let values = Sequence::from_integers([3, 2, 1]);
        let (steps, _) = run(&values);

        assert_eq!(
            steps,
            vec![
                Step::Compare { a: 0, b: 1, outcome: Comparison::Greater },
                Step::Swap { a: 0, b: 1 },
                Step::Compare { a: 1, b: 2, outcome: Comparison::Greater },
                Step::Swap { a: 1, b: 2 },
                Step::Sorted { start: 2, end: 3 },
                Step::Compare { a: 0, b: 1, outcome: Comparison::Greater },
                Step::Swap { a: 0, b: 1 },
                Step::Sorted { start: 1, end: 2 },
                Step::Sorted { start: 0, end: 1 },
            ]
        );
        assert!(!steps.iter().any(|s| matches!(s, Step::NoMoreSwaps { .. })));
    }

    #[test]
    fn equal_values_never_swap() {
        let values = Sequence::from_integers([2, 2, 1]);
        let (steps, mapping) = run(&values);

        assert_eq!(
            steps[0],
            Step::Compare { a: 0, b: 1, outcome: Comparison::Equal }
        );
        // Both 2s keep their relative order
        assert_eq!(mapping.as_slice(), &[2, 0, 1]);
    }

    #[test]
    fn mapping_follows_steps() {
        let values = Sequence::from_integers([2, 1]);
        let mut mapping = IndexMapping::identity(2);
        let mut sort = BubbleSort::new(&values, &mut mapping).unwrap();

        assert!(matches!(sort.next(), Some(Step::Compare { .. })));
        assert!(sort.mapping().is_identity());
        assert_eq!(sort.next(), Some(Step::Swap { a: 0, b: 1 }));
        assert_eq!(sort.mapping().as_slice(), &[1, 0]);
    }

    #[test]
    fn tiny_inputs() {
        let (steps, _) = run(&Sequence::default());
        assert!(steps.is_empty());

        let (steps, _) = run(&Sequence::from_integers([7]));
        assert_eq!(steps, vec![Step::Sorted { start: 0, end: 1 }]);
    }

    #[test]
    fn rejects_length_mismatch() {
        let values = Sequence::from_integers([1, 2, 3]);
        let mut mapping = IndexMapping::identity(2);
        assert!(matches!(
            BubbleSort::new(&values, &mut mapping),
            Err(Error::LengthMismatch { values: 3, mapping: 2 })
        ));
    }
}
