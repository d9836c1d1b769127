//! Binary search over a sorted sequence.

use tracing::debug;

use crate::{Comparison, Error, Result, Sequence};

/// One observable step of a binary search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type")
)]
pub enum SearchStep {
    /// The value at `mid` was compared with the target, within `[low, high]`
    Probe {
        low: usize,
        mid: usize,
        high: usize,
        outcome: Comparison,
    },

    /// The target sits at `position`
    Found { position: usize },

    /// The window closed without a match
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Searching,
    Hit(usize),
    Finished,
}

/// Lazy binary search for `target`.
#[derive(Debug, Clone)]
pub struct BinarySearch<'a> {
    values: &'a Sequence,
    target: f64,
    // Half-open window [low, high)
    low: usize,
    high: usize,
    state: State,
}

impl<'a> BinarySearch<'a> {
    /// Start a search. `values` must be non-decreasing and `target` finite.
    pub fn new(values: &'a Sequence, target: f64) -> Result<Self> {
        if let Some(position) = values.first_descent() {
            return Err(Error::Unsorted { position });
        }
        if !target.is_finite() {
            return Err(Error::InvalidInput {
                position: 0,
                value: target.to_string(),
            });
        }
        debug!(len = values.len(), target, "binary search started");
        Ok(Self {
            values,
            target,
            low: 0,
            high: values.len(),
            state: State::Searching,
        })
    }

    /// Inclusive bounds of the remaining window, `None` once it is empty.
    pub fn window(&self) -> Option<(usize, usize)> {
        (self.low < self.high).then(|| (self.low, self.high - 1))
    }
}

impl Iterator for BinarySearch<'_> {
    type Item = SearchStep;

    fn next(&mut self) -> Option<SearchStep> {
        match self.state {
            State::Finished => None,
            State::Hit(position) => {
                self.state = State::Finished;
                Some(SearchStep::Found { position })
            }
            State::Searching if self.low >= self.high => {
                self.state = State::Finished;
                Some(SearchStep::NotFound)
            }
            State::Searching => {
                let (low, high) = (self.low, self.high - 1);
                let mid = low + (high - low) / 2;
                let outcome = Comparison::of(self.values[mid], self.target);
                match outcome {
                    Comparison::Equal => self.state = State::Hit(mid),
                    Comparison::Less => self.low = mid + 1,
                    Comparison::Greater => self.high = mid,
                }
                Some(SearchStep::Probe {
                    low,
                    mid,
                    high,
                    outcome,
                })
            }
        }
    }
}
