use thiserror::Error;

/// Error types for the minimizer
///
/// Only setup problems are reported here. Infinite or NaN scores and running
/// out of iterations are normal outcomes of a run, not errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MinimizerError {
    #[error("Invalid dimension: a simplex needs at least one parameter")]
    InvalidDimension,

    #[error("Dimension mismatch: expected {expected} parameters, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Simplex has not been initialized")]
    NotInitialized,
}
