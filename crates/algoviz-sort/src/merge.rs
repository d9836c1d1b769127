//! Merge sort engines.
//!
//! Both engines share one merge procedure over `[lo, mid)` and `[mid, hi)`:
//! cursors `i` and `j` walk the two halves, `k` walks the destination. Each
//! comparison is followed by a [`Step::Move`] of the smaller entry (the left
//! one on ties) into destination slot `k`; the leftover side is drained with
//! further moves. Moves fill a destination buffer which is written back into
//! the mapping when the closing [`Step::Sorted`] for the range is emitted.
//!
//! - [`MergePhase`] pre-sorts both halves of the whole array in one bulk
//!   re-order and then merges once.
//! - [`MergeSort`] is the full divide-and-conquer sort. It keeps an explicit
//!   task stack so that steps still come out one at a time, in depth-first
//!   recursive order.

use tracing::{debug, trace};

use crate::mapping::check_lengths;
use crate::permutation::{reverse_index_mapping, sorted_permutation, Permutation};
use crate::{Comparison, IndexMapping, Result, Sequence, Step};

/// State of a single two-way merge.
#[derive(Debug, Clone)]
struct Merge {
    lo: usize,
    mid: usize,
    hi: usize,
    i: usize,
    j: usize,
    buffer: Vec<usize>,
    pending: Option<usize>,
    committed: bool,
}

impl Merge {
    fn new(lo: usize, mid: usize, hi: usize) -> Self {
        Self {
            lo,
            mid,
            hi,
            i: lo,
            j: mid,
            buffer: Vec::with_capacity(hi - lo),
            pending: None,
            committed: false,
        }
    }

    fn step(&mut self, values: &Sequence, mapping: &mut IndexMapping) -> Option<Step> {
        if let Some(from) = self.pending.take() {
            return Some(self.take(mapping, from));
        }

        if self.i < self.mid && self.j < self.hi {
            let (a, b) = (self.i, self.j);
            let outcome = Comparison::of(mapping.value_at(values, a), mapping.value_at(values, b));
            self.pending = Some(if outcome == Comparison::Greater {
                self.j += 1;
                b
            } else {
                self.i += 1;
                a
            });
            return Some(Step::Compare { a, b, outcome });
        }

        if self.i < self.mid {
            self.i += 1;
            return Some(self.take(mapping, self.i - 1));
        }
        if self.j < self.hi {
            self.j += 1;
            return Some(self.take(mapping, self.j - 1));
        }

        if self.committed {
            return None;
        }
        mapping.write_range(self.lo, &self.buffer);
        self.committed = true;
        trace!(lo = self.lo, hi = self.hi, "merge committed");
        Some(Step::Sorted {
            start: self.lo,
            end: self.hi,
        })
    }

    fn take(&mut self, mapping: &IndexMapping, from: usize) -> Step {
        let to = self.lo + self.buffer.len();
        self.buffer.push(mapping[from]);
        Step::Move { from, to }
    }
}

/// Merges the two halves of the whole array, assuming each half sorted.
///
/// Construction re-orders both halves in a single bulk permutation, so the
/// step stream opens with one [`Step::Sorted`] per non-empty half and then
/// runs a single merge over `[0, n)`.
pub struct MergePhase<'a> {
    values: &'a Sequence,
    mapping: &'a mut IndexMapping,
    half: usize,
    opening: Vec<Step>,
    merge: Option<Merge>,
}

impl<'a> MergePhase<'a> {
    /// Pre-sort both halves of `mapping` and prepare the merge.
    pub fn new(values: &'a Sequence, mapping: &'a mut IndexMapping) -> Result<Self> {
        check_lengths(values, mapping)?;
        let n = values.len();
        let half = n / 2;

        let logical: Vec<f64> = mapping.apply(values);
        let mut source: Vec<usize> = sorted_permutation(&logical[..half]).into();
        source.extend(sorted_permutation(&logical[half..]).offset(half));
        mapping.apply_targets(&reverse_index_mapping(&Permutation::from_indices(source)));

        // Reversed so that `pop` yields the left half first
        let opening = [(half, n), (0, half)]
            .into_iter()
            .filter(|(start, end)| start < end)
            .map(|(start, end)| Step::Sorted { start, end })
            .collect();

        debug!(len = n, half, "merge phase started");
        Ok(Self {
            values,
            mapping,
            half,
            opening,
            merge: (n > 0).then(|| Merge::new(0, half, n)),
        })
    }

    /// The mapping as left by the last emitted step.
    pub fn mapping(&self) -> &IndexMapping {
        &*self.mapping
    }

    /// Length of the left half, `floor(n / 2)`.
    pub fn half(&self) -> usize {
        self.half
    }
}

impl Iterator for MergePhase<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if let Some(step) = self.opening.pop() {
            return Some(step);
        }
        let step = self.merge.as_mut()?.step(self.values, self.mapping);
        if step.is_none() {
            self.merge = None;
        }
        step
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Sort { lo: usize, hi: usize },
    Merge { lo: usize, mid: usize, hi: usize },
}

/// Recursive divide-and-conquer merge sort.
///
/// `sort(lo, hi)` marks ranges of length at most one as sorted; longer
/// ranges split at `mid = lo + (hi - lo) / 2`, sort the left half, then the
/// right half, then merge.
pub struct MergeSort<'a> {
    values: &'a Sequence,
    mapping: &'a mut IndexMapping,
    tasks: Vec<Task>,
    active: Option<Merge>,
}

impl<'a> MergeSort<'a> {
    /// Start a sort of `mapping` over `values`.
    pub fn new(values: &'a Sequence, mapping: &'a mut IndexMapping) -> Result<Self> {
        check_lengths(values, mapping)?;
        let n = values.len();
        debug!(len = n, "merge sort started");
        let tasks = if n > 0 {
            vec![Task::Sort { lo: 0, hi: n }]
        } else {
            Vec::new()
        };
        Ok(Self {
            values,
            mapping,
            tasks,
            active: None,
        })
    }

    /// The mapping as left by the last emitted step.
    pub fn mapping(&self) -> &IndexMapping {
        &*self.mapping
    }

    /// Number of pending sort/merge tasks, a proxy for recursion depth.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }
}

impl Iterator for MergeSort<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            if let Some(merge) = self.active.as_mut() {
                if let Some(step) = merge.step(self.values, self.mapping) {
                    return Some(step);
                }
                self.active = None;
            }

            match self.tasks.pop()? {
                Task::Sort { lo, hi } if hi - lo <= 1 => {
                    return Some(Step::Sorted { start: lo, end: hi });
                }
                Task::Sort { lo, hi } => {
                    let mid = lo + (hi - lo) / 2;
                    self.tasks.push(Task::Merge { lo, mid, hi });
                    self.tasks.push(Task::Sort { lo: mid, hi });
                    self.tasks.push(Task::Sort { lo, hi: mid });
                }
                Task::Merge { lo, mid, hi } => {
                    self.active = Some(Merge::new(lo, mid, hi));
                }
            }
        }
    }
}
