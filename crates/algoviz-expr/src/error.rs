//! Error types for algoviz-expr.

use thiserror::Error;

/// Result type for algoviz-expr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Evaluation finished with nothing on the stack.
    #[error("expression produced no value")]
    Empty,
}
