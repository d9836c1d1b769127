//! Recording engine runs into timelines.

use algoviz_sort::{run, Algorithm, IndexMapping, InputConfig, Sequence, Step};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::events::{MappingSnapshot, TimelineEvent};
use crate::{Error, Result};

/// Configuration for a generated timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub algorithm: Algorithm,
    /// Seeded random input
    pub input: InputConfig,
}

/// Every step of one engine run, with the mappings around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub algorithm: Algorithm,
    pub values: Sequence,
    /// Mapping before the first event
    pub initial: IndexMapping,
    pub events: Vec<TimelineEvent>,
    /// Mapping after the last event
    pub terminal: IndexMapping,
}

impl Timeline {
    /// Run `algorithm` over `values` and record every step.
    pub fn record(algorithm: Algorithm, values: &Sequence) -> Result<Self> {
        let result = run(algorithm, values)?;
        let events: Vec<TimelineEvent> = result
            .steps
            .into_iter()
            .enumerate()
            .map(|(frame, step)| TimelineEvent::new(frame as u64, step))
            .collect();

        debug!(%algorithm, values = values.len(), events = events.len(), "recorded timeline");
        Ok(Self {
            algorithm,
            values: values.clone(),
            initial: result.initial,
            events,
            terminal: result.mapping,
        })
    }

    /// Record a run over seeded random input.
    pub fn generate(config: &TimelineConfig) -> Result<Self> {
        let values = Sequence::random(&config.input)?;
        Self::record(config.algorithm, &values)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// State after the first `up_to` events.
    pub fn snapshot_at(&self, up_to: usize) -> MappingSnapshot {
        MappingSnapshot::from_events(&self.initial, &self.events, up_to)
    }

    /// State after every event.
    pub fn final_snapshot(&self) -> MappingSnapshot {
        self.snapshot_at(self.events.len())
    }

    /// The values as shown after the first `up_to` events.
    pub fn values_at(&self, up_to: usize) -> Vec<f64> {
        self.snapshot_at(up_to).mapping.apply(&self.values)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Import a timeline, rejecting one whose mappings or step positions do
    /// not fit its values.
    pub fn from_json(json: &str) -> Result<Self> {
        let timeline: Self = serde_json::from_str(json)?;
        timeline.validate()?;
        Ok(timeline)
    }

    /// Check that both mappings are permutations over the values and that
    /// every step stays inside them.
    pub fn validate(&self) -> Result<()> {
        let n = self.values.len();
        for (name, mapping) in [("initial", &self.initial), ("terminal", &self.terminal)] {
            if mapping.len() != n {
                return Err(invalid(format!(
                    "{name} mapping has {} entries for {n} values",
                    mapping.len()
                )));
            }
            if !is_permutation(mapping) {
                return Err(invalid(format!("{name} mapping is not a permutation")));
            }
        }

        for event in &self.events {
            let in_range = match event.step {
                Step::Compare { a, b, .. } | Step::Swap { a, b } => a < n && b < n,
                Step::Move { from, to } => from < n && to < n,
                Step::Sorted { start, end } => start <= end && end <= n,
                Step::Keep { position } => position < n,
                Step::NoMoreSwaps { .. } => true,
            };
            if !in_range {
                return Err(invalid(format!(
                    "frame {}: {:?} is out of range for {n} values",
                    event.frame, event.step
                )));
            }
        }
        Ok(())
    }
}

fn invalid(reason: String) -> Error {
    warn!(%reason, "rejecting timeline");
    Error::InvalidTimeline(reason)
}

fn is_permutation(mapping: &IndexMapping) -> bool {
    let mut seen = vec![false; mapping.len()];
    mapping
        .as_slice()
        .iter()
        .all(|&i| i < seen.len() && !std::mem::replace(&mut seen[i], true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_count_up_from_zero() {
        let values = Sequence::from_integers([3, 2, 1]);
        let timeline = Timeline::record(Algorithm::Bubble, &values).unwrap();

        assert!(!timeline.is_empty());
        for (i, event) in timeline.events.iter().enumerate() {
            assert_eq!(event.frame, i as u64);
        }
    }

    #[test]
    fn final_snapshot_matches_terminal() {
        let values = Sequence::from_integers([5, 1, 4, 2, 8, 2]);
        for algorithm in Algorithm::ALL {
            let timeline = Timeline::record(algorithm, &values).unwrap();
            assert_eq!(timeline.final_snapshot().mapping, timeline.terminal, "{algorithm}");
        }
    }

    #[test]
    fn snapshot_counts_steps() {
        let values = Sequence::from_integers([3, 2, 1]);
        let timeline = Timeline::record(Algorithm::Bubble, &values).unwrap();
        let snap = timeline.final_snapshot();

        let swaps = timeline
            .events
            .iter()
            .filter(|e| matches!(e.step, Step::Swap { .. }))
            .count();
        assert_eq!(snap.swaps, swaps);
        assert_eq!(snap.moves, 0);
        assert_eq!(snap.sorted_count(), 3);
        assert_eq!(timeline.values_at(timeline.len()), vec![1.0, 2.0, 3.0]);
        assert_eq!(timeline.values_at(0), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn merge_phase_starts_from_presorted_halves() {
        let values = Sequence::from_integers([3, 8, 1, 5]);
        let timeline = Timeline::record(Algorithm::MergePhase, &values).unwrap();
        assert_eq!(timeline.values_at(0), vec![3.0, 8.0, 1.0, 5.0]);
        assert_eq!(timeline.values_at(timeline.len()), vec![1.0, 3.0, 5.0, 8.0]);
    }

    #[test]
    fn generated_timelines_are_deterministic() {
        let config = TimelineConfig {
            algorithm: Algorithm::MergeSort,
            input: InputConfig {
                size: 12,
                ..InputConfig::default()
            },
        };
        let a = Timeline::generate(&config).unwrap();
        let b = Timeline::generate(&config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.values.len(), 12);
    }

    #[test]
    fn bad_input_config_is_a_sort_error() {
        let config = TimelineConfig {
            input: InputConfig {
                min: 5,
                max: 5,
                ..InputConfig::default()
            },
            ..TimelineConfig::default()
        };
        assert!(matches!(
            Timeline::generate(&config),
            Err(Error::Sort(algoviz_sort::Error::InvalidConfig(_)))
        ));
    }

    #[test]
    fn json_roundtrip() {
        let values = Sequence::from_integers([2, 7, 1]);
        let timeline = Timeline::record(Algorithm::Selection, &values).unwrap();

        let json = timeline.to_json().unwrap();
        assert!(json.contains("\"algorithm\":\"selection\""));
        assert_eq!(Timeline::from_json(&json).unwrap(), timeline);
    }

    fn tampered(edit: impl FnOnce(&mut serde_json::Value)) -> String {
        let values = Sequence::from_integers([2, 1]);
        let timeline = Timeline::record(Algorithm::Bubble, &values).unwrap();
        let mut raw = serde_json::to_value(&timeline).unwrap();
        edit(&mut raw);
        raw.to_string()
    }

    #[test]
    fn out_of_range_swap_is_rejected() {
        let json = tampered(|raw| {
            let swap = raw["events"]
                .as_array_mut()
                .unwrap()
                .iter_mut()
                .find(|e| e["step"]["type"] == "Swap")
                .unwrap();
            swap["step"]["b"] = 9.into();
        });
        assert!(matches!(
            Timeline::from_json(&json),
            Err(Error::InvalidTimeline(_))
        ));
    }

    #[test]
    fn mapping_length_must_match_values() {
        let json = tampered(|raw| raw["initial"] = serde_json::json!([0, 1, 2]));
        assert!(matches!(
            Timeline::from_json(&json),
            Err(Error::InvalidTimeline(_))
        ));
    }

    #[test]
    fn mapping_must_be_a_permutation() {
        let json = tampered(|raw| raw["terminal"] = serde_json::json!([0, 0]));
        assert!(matches!(
            Timeline::from_json(&json),
            Err(Error::InvalidTimeline(_))
        ));
    }

    #[test]
    fn sorted_range_past_the_end_is_rejected() {
        let json = tampered(|raw| {
            raw["events"][0]["step"] = serde_json::json!({"type": "Sorted", "start": 1, "end": 3});
        });
        assert!(matches!(
            Timeline::from_json(&json),
            Err(Error::InvalidTimeline(_))
        ));
    }

    #[test]
    fn recorded_timelines_validate() {
        let values = Sequence::from_integers([4, 1, 3, 1, 2]);
        for algorithm in Algorithm::ALL {
            Timeline::record(algorithm, &values).unwrap().validate().unwrap();
        }
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        assert!(matches!(
            Timeline::from_json("{\"algorithm\":"),
            Err(Error::Serialization(_))
        ));
    }
}
