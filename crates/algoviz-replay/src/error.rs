//! Error types for algoviz-replay.

use thiserror::Error;

/// Result type for replay operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while recording or exporting a timeline.
#[derive(Debug, Error)]
pub enum Error {
    /// The engine rejected its input
    #[error("sort error: {0}")]
    Sort(#[from] algoviz_sort::Error),

    /// An imported timeline does not fit its own values
    #[error("invalid timeline: {0}")]
    InvalidTimeline(String),

    /// Timeline export or import failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
