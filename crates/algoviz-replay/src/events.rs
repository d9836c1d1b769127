//! Timeline events and mapping snapshots.

use std::collections::BTreeMap;

use algoviz_sort::{IndexMapping, Step};
use serde::{Deserialize, Serialize};

/// One recorded step, stamped with its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub frame: u64,
    pub step: Step,
}

impl TimelineEvent {
    pub fn new(frame: u64, step: Step) -> Self {
        Self { frame, step }
    }
}

/// The state of a sort at a point in its timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSnapshot {
    /// Frame of the last applied event
    pub frame: u64,
    pub mapping: IndexMapping,
    /// Positions inside a reported `Sorted` range
    pub sorted: Vec<bool>,
    pub last_compared: Option<(usize, usize)>,
    pub comparisons: usize,
    pub swaps: usize,
    pub moves: usize,
    /// Destination -> entry for moves not yet committed
    staged: BTreeMap<usize, usize>,
}

impl MappingSnapshot {
    /// The state before any event.
    pub fn new(initial: &IndexMapping) -> Self {
        Self {
            mapping: initial.clone(),
            sorted: vec![false; initial.len()],
            ..Self::default()
        }
    }

    /// Rebuild the state from events up to (but not including) `up_to`.
    ///
    /// Every event position must lie inside `initial`; imported timelines are
    /// checked by [`Timeline::validate`](crate::Timeline::validate).
    pub fn from_events(initial: &IndexMapping, events: &[TimelineEvent], up_to: usize) -> Self {
        let mut snapshot = Self::new(initial);
        for event in events.iter().take(up_to) {
            snapshot.apply(event);
        }
        snapshot
    }

    /// Apply one event.
    ///
    /// Moves are staged per destination and only land in the mapping when a
    /// `Sorted` range covering the destination is reported, which is when the
    /// merge engines commit their buffers.
    pub fn apply(&mut self, event: &TimelineEvent) {
        self.frame = event.frame;
        match event.step {
            Step::Compare { a, b, .. } => {
                self.comparisons += 1;
                self.last_compared = Some((a, b));
            }
            Step::Swap { a, b } => {
                self.swaps += 1;
                self.mapping.swap(a, b);
            }
            Step::Move { from, to } => {
                self.moves += 1;
                self.staged.insert(to, self.mapping[from]);
            }
            Step::Sorted { start, end } => {
                let committed: Vec<usize> = self.staged.range(start..end).map(|(&k, _)| k).collect();
                for position in committed {
                    if let Some(entry) = self.staged.remove(&position) {
                        self.mapping.write_range(position, &[entry]);
                    }
                }
                self.sorted[start..end].iter_mut().for_each(|s| *s = true);
            }
            Step::NoMoreSwaps { .. } | Step::Keep { .. } => {}
        }
    }

    /// Moves shown in flight: `(destination, original index)`, by destination.
    pub fn pending_moves(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.staged.iter().map(|(&to, &entry)| (to, entry))
    }

    /// Number of positions marked sorted.
    pub fn sorted_count(&self) -> usize {
        self.sorted.iter().filter(|&&s| s).count()
    }
}
