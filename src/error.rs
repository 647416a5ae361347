//! Error types for anova_sim.

use thiserror::Error;

/// Result type alias for anova_sim operations.
pub type Result<T> = std::result::Result<T, AnovaError>;

/// Errors that can occur while generating data or running an analysis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnovaError {
    /// Malformed generator parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Too few groups or observations for the error degrees of freedom to be positive.
    #[error(
        "Insufficient data: {groups} group(s) and {observations} observation(s); \
         need at least 2 groups and more observations than groups"
    )]
    InsufficientData { groups: usize, observations: usize },
    /// Column lengths of a dataset do not agree.
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },
    /// A numerical routine failed or produced a non-finite result.
    #[error("Computation error: {0}")]
    Computation(String),
}
