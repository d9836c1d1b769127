//! Algoviz Sorting Kernel
//!
//! Sorting engines that narrate their work as a stream of steps, for a
//! renderer that animates one step at a time.
//!
//! # Index Mapping
//!
//! Engines never move values. They sort an [`IndexMapping`] `M` over a
//! read-only [`Sequence`] `V`: position `p` shows `V[M[p]]`. A renderer keeps
//! one visual element per original index, so a [`Step::Swap`] or
//! [`Step::Move`] is always a motion of existing elements, never a value
//! substitution.
//!
//! # Engines
//!
//! - [`BubbleSort`]: neighbour swaps with a no-swap early exit
//! - [`SelectionSort`]: running minimum, one swap per outer step
//! - [`MergePhase`]: one two-way merge over pre-sorted halves
//! - [`MergeSort`]: full recursive merge sort
//! - [`BinarySearch`]: probes over already sorted values
//!
//! Every engine is an [`Iterator`]. Each call to `next` performs exactly one
//! step; dropping an engine mid-stream is always safe. Invalid input is
//! rejected by the constructor, before any step exists.
//!
//! # Permutations
//!
//! [`sorted_permutation`] and [`reverse_index_mapping`] convert between "which
//! original slot fills target slot k" and "where does original slot i go",
//! which is how a renderer re-slots its elements after a bulk re-order.

mod bubble;
mod error;
mod mapping;
mod merge;
mod permutation;
mod run;
mod search;
mod selection;
mod sequence;
mod step;

pub use bubble::BubbleSort;
pub use error::{Error, Result};
pub use mapping::IndexMapping;
pub use merge::{MergePhase, MergeSort};
pub use permutation::{reverse_index_mapping, sorted_permutation, Permutation};
pub use run::{run, Algorithm, Engine, Run};
pub use search::{BinarySearch, SearchStep};
pub use selection::SelectionSort;
pub use sequence::{InputConfig, Sequence};
pub use step::{Comparison, Step};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_sorts_like_engines() {
        let values = Sequence::from_integers([31, 4, 15, 9, 26, 5]);
        let by_permutation = sorted_permutation(values.values()).gather(values.values());

        for algorithm in Algorithm::ALL {
            let result = run(algorithm, &values).unwrap();
            assert_eq!(result.sorted_values(&values), by_permutation);
        }
    }

    #[test]
    fn sorted_input_yields_identity_everywhere() {
        let values = Sequence::from_integers([1, 1, 2, 3, 5, 8, 13]);
        for algorithm in Algorithm::ALL {
            assert!(run(algorithm, &values).unwrap().mapping.is_identity());
        }
        assert!(sorted_permutation(values.values()).is_identity());
    }
}
