//! Algoviz Replay
//!
//! Recorded sorting runs with scrubbing.
//!
//! # Architecture
//!
//! - **Timeline**: records every step of one engine run, frame-stamped
//! - **Snapshot**: rebuilds the mapping at any point from the initial mapping
//! - **Playback**: cursor over the timeline, driven by the renderer's clock
//!
//! Timelines serialize to JSON, so a run can be recorded once and animated
//! elsewhere.
//!
//! # Usage
//!
//! ```
//! use algoviz_replay::{Playback, Timeline, TimelineConfig};
//!
//! let timeline = Timeline::generate(&TimelineConfig::default()).unwrap();
//! let mut playback = Playback::new(timeline);
//!
//! while playback.step_forward().is_some() {}
//! assert_eq!(playback.snapshot().mapping, playback.timeline().terminal);
//!
//! playback.step_backward();
//! assert_eq!(playback.position(), playback.total_events() - 1);
//! ```

mod error;
mod events;
mod playback;
mod timeline;

pub use error::{Error, Result};
pub use events::{MappingSnapshot, TimelineEvent};
pub use playback::Playback;
pub use timeline::{Timeline, TimelineConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_sort::{Algorithm, Sequence};

    #[test]
    fn playback_can_seek() {
        let values = Sequence::from_integers([9, 4, 7, 1, 3]);
        let timeline = Timeline::record(Algorithm::Selection, &values).unwrap();
        let total = timeline.len();
        let mut playback = Playback::new(timeline);

        assert_eq!(playback.position(), 0);

        playback.seek(total / 2);
        assert_eq!(playback.position(), total / 2);
        assert_eq!(playback.events_to_current().len(), total / 2);

        playback.seek(total);
        assert_eq!(playback.position(), total);
    }

    #[test]
    fn snapshot_follows_cursor() {
        let values = Sequence::from_integers([2, 1]);
        let timeline = Timeline::record(Algorithm::Bubble, &values).unwrap();
        let mut playback = Playback::new(timeline);

        assert!(playback.snapshot().mapping.is_identity());
        playback.seek(playback.total_events());
        assert_eq!(playback.snapshot().mapping.as_slice(), &[1, 0]);

        while playback.step_backward().is_some() {}
        assert!(playback.snapshot().mapping.is_identity());
    }
}
