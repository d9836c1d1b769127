//! Error types for algoviz-sort.

use thiserror::Error;

/// Result type for algoviz-sort operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised before an engine emits its first step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A value is non-finite or not a number at all.
    #[error("invalid input at position {position}: {value:?}")]
    InvalidInput { position: usize, value: String },

    /// The index mapping does not cover the sequence.
    #[error("mapping length {mapping} does not match sequence length {values}")]
    LengthMismatch { values: usize, mapping: usize },

    /// Binary search needs a non-decreasing sequence.
    #[error("sequence is not sorted at position {position}")]
    Unsorted { position: usize },

    /// Random input configuration cannot produce a sequence.
    #[error("invalid input configuration: {0}")]
    InvalidConfig(String),
}
