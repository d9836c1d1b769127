//! Engine selection and buffered runs.

use std::fmt;
use std::str::FromStr;

use crate::{
    BubbleSort, Error, IndexMapping, MergePhase, MergeSort, Result, SelectionSort, Sequence, Step,
};

/// The sorting engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Algorithm {
    #[default]
    Bubble,
    Selection,
    MergePhase,
    MergeSort,
}

impl Algorithm {
    /// Every engine, in presentation order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::MergePhase,
        Algorithm::MergeSort,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::MergePhase => "merge-phase",
            Algorithm::MergeSort => "merge-sort",
        }
    }

    /// Build the engine over `mapping`.
    pub fn engine<'a>(
        &self,
        values: &'a Sequence,
        mapping: &'a mut IndexMapping,
    ) -> Result<Engine<'a>> {
        Ok(match self {
            Algorithm::Bubble => Engine::Bubble(BubbleSort::new(values, mapping)?),
            Algorithm::Selection => Engine::Selection(SelectionSort::new(values, mapping)?),
            Algorithm::MergePhase => Engine::MergePhase(MergePhase::new(values, mapping)?),
            Algorithm::MergeSort => Engine::MergeSort(MergeSort::new(values, mapping)?),
        })
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| Error::InvalidConfig(format!("unknown algorithm: {s}")))
    }
}

/// Any of the sorting engines behind one iterator type.
pub enum Engine<'a> {
    Bubble(BubbleSort<'a>),
    Selection(SelectionSort<'a>),
    MergePhase(MergePhase<'a>),
    MergeSort(MergeSort<'a>),
}

impl Engine<'_> {
    /// The mapping as left by the last emitted step.
    pub fn mapping(&self) -> &IndexMapping {
        match self {
            Engine::Bubble(e) => e.mapping(),
            Engine::Selection(e) => e.mapping(),
            Engine::MergePhase(e) => e.mapping(),
            Engine::MergeSort(e) => e.mapping(),
        }
    }
}

impl Iterator for Engine<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        match self {
            Engine::Bubble(e) => e.next(),
            Engine::Selection(e) => e.next(),
            Engine::MergePhase(e) => e.next(),
            Engine::MergeSort(e) => e.next(),
        }
    }
}

/// A completed, buffered run of one engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub algorithm: Algorithm,
    /// Mapping before the first step (after any construction-time re-order)
    pub initial: IndexMapping,
    /// Every step, in emission order
    pub steps: Vec<Step>,
    /// Terminal mapping
    pub mapping: IndexMapping,
}

impl Run {
    /// The values in terminal order.
    pub fn sorted_values(&self, values: &Sequence) -> Vec<f64> {
        self.mapping.apply(values)
    }

    /// Number of steps matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&Step) -> bool) -> usize {
        self.steps.iter().filter(|s| predicate(s)).count()
    }
}

/// Drive `algorithm` over a fresh identity mapping to completion.
pub fn run(algorithm: Algorithm, values: &Sequence) -> Result<Run> {
    let mut mapping = IndexMapping::identity(values.len());
    let mut engine = algorithm.engine(values, &mut mapping)?;
    let initial = engine.mapping().clone();
    let steps: Vec<Step> = engine.by_ref().collect();
    drop(engine);

    Ok(Run {
        algorithm,
        initial,
        steps,
        mapping,
    })
}
