/// Error types for a calculation run
use thiserror::Error;

/// Errors surfaced to the user by the calculation pipeline.
///
/// Per-region API failures never appear here; the estimator recovers from them
/// with a fallback estimate.
#[derive(Debug, Error, PartialEq)]
pub enum CalculationError {
    /// Energy amount is non-numeric, non-finite or not strictly positive
    #[error("Invalid energy value: {0}")]
    InvalidInput(String),

    /// Statistics were requested over zero results
    #[error("Cannot aggregate an empty result set")]
    EmptyAggregation,

    /// Another calculation is still running
    #[error("A calculation is already in progress")]
    InProgress,
}
