//! Error types for the visitor-forecast library.

use thiserror::Error;

/// Result type alias for visitor pipeline operations.
pub type Result<T> = std::result::Result<T, VisitorError>;

/// Errors that can occur while loading, aggregating or forecasting visitor data.
#[derive(Error, Debug)]
pub enum VisitorError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// A required column is absent from the input header.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// A data row could not be coerced into a visitor record.
    #[error("invalid record at line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    /// Aggregation selector is not one of Daily, Weekly or Monthly.
    #[error("unknown granularity: {0:?} (expected Daily, Weekly or Monthly)")]
    UnknownGranularity(String),

    /// A selected category value was never observed in the dataset.
    #[error("unknown {kind}: {value:?}")]
    UnknownCategory { kind: &'static str, value: String },

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Computation error (e.g., numerical issues).
    #[error("computation error: {0}")]
    ComputationError(String),

    /// Underlying CSV reader failure.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
