//! Scrubbing over a recorded sort timeline.
//!
//! The cursor counts applied events: at position `k` the first `k` events have
//! been shown and `current_event` is the one about to be shown. Timing is left
//! to the renderer, which calls `step_forward` on its own clock.

use algoviz_sort::Step;
use tracing::{debug, trace};

use crate::events::{MappingSnapshot, TimelineEvent};
use crate::timeline::Timeline;

/// Cursor over a timeline with the mapping state at the cursor.
///
/// Stepping forward applies one event to the cached snapshot. Moving backward
/// rebuilds the snapshot from the initial mapping, since staged moves cannot
/// be un-applied.
pub struct Playback {
    timeline: Timeline,
    position: usize,
    snapshot: MappingSnapshot,
}

impl Playback {
    pub fn new(timeline: Timeline) -> Self {
        let snapshot = MappingSnapshot::new(&timeline.initial);
        Self {
            timeline,
            position: 0,
            snapshot,
        }
    }

    /// Number of events applied so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total_events(&self) -> usize {
        self.timeline.events.len()
    }

    pub fn is_at_end(&self) -> bool {
        self.position == self.total_events()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Mapping state at the cursor.
    pub fn snapshot(&self) -> &MappingSnapshot {
        &self.snapshot
    }

    /// The values as shown at the cursor.
    pub fn values(&self) -> Vec<f64> {
        self.snapshot.mapping.apply(&self.timeline.values)
    }

    /// Move the cursor to `position`, clamped to the timeline.
    pub fn seek(&mut self, position: usize) {
        let target = position.min(self.total_events());
        if target < self.position {
            self.snapshot = self.timeline.snapshot_at(target);
            self.position = target;
        } else {
            while self.position < target {
                self.apply_next();
            }
        }
        debug!(position = self.position, "seek");
    }

    /// Back to the initial mapping.
    pub fn rewind(&mut self) {
        self.seek(0);
    }

    /// Apply the next event and return it.
    pub fn step_forward(&mut self) -> Option<TimelineEvent> {
        let event = self.timeline.events.get(self.position).copied()?;
        self.apply_next();
        trace!(frame = event.frame, step = ?event.step, "step forward");
        Some(event)
    }

    /// Un-apply the last event and return it.
    pub fn step_backward(&mut self) -> Option<TimelineEvent> {
        let previous = self.position.checked_sub(1)?;
        let event = self.timeline.events[previous];
        self.snapshot = self.timeline.snapshot_at(previous);
        self.position = previous;
        trace!(frame = event.frame, step = ?event.step, "step backward");
        Some(event)
    }

    /// Step forward until an event matching `stop` has been applied.
    ///
    /// Returns that event, or `None` if the timeline ran out first.
    pub fn advance_until(&mut self, mut stop: impl FnMut(&Step) -> bool) -> Option<TimelineEvent> {
        while let Some(event) = self.step_forward() {
            if stop(&event.step) {
                return Some(event);
            }
        }
        None
    }

    /// All events applied so far.
    pub fn events_to_current(&self) -> &[TimelineEvent] {
        &self.timeline.events[..self.position]
    }

    /// The event about to be applied, if any.
    pub fn current_event(&self) -> Option<&TimelineEvent> {
        self.timeline.events.get(self.position)
    }

    /// Progress as a fraction (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        if self.timeline.events.is_empty() {
            0.0
        } else {
            self.position as f64 / self.total_events() as f64
        }
    }

    fn apply_next(&mut self) {
        if let Some(event) = self.timeline.events.get(self.position) {
            self.snapshot.apply(event);
            self.position += 1;
        }
    }
}

impl Iterator for Playback {
    type Item = TimelineEvent;

    fn next(&mut self) -> Option<TimelineEvent> {
        self.step_forward()
    }
}
