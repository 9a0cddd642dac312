//! Error types for reward computation

use thiserror::Error;

/// Result type alias for reward operations
pub type RewardResult<T> = Result<T, RewardError>;

/// Main error type for reward functions
///
/// Format mismatches and countdown failures are not errors: they score `0.0`.
/// These variants cover contract violations by whoever assembles the batch
/// or the configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RewardError {
    /// No constructor registered under this name
    #[error("Unknown reward function: {0}")]
    UnknownRewardFunction(String),

    /// Candidate is neither plain text nor a turn record with content
    #[error("Malformed completion: {0}")]
    MalformedCompletion(String),

    /// A reward function needs a column the batch does not carry
    #[error("Reward function '{function}' requires field '{field}'")]
    MissingField {
        function: &'static str,
        field: &'static str,
    },

    /// A per-candidate column is not aligned with the completions
    #[error("Field '{field}' has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Invalid construction options
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RewardError {
    /// Create a new unknown-function error
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownRewardFunction(name.into())
    }

    /// Create a new malformed-completion error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedCompletion(message.into())
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new missing-field error
    pub fn missing_field(function: &'static str, field: &'static str) -> Self {
        Self::MissingField { function, field }
    }
}
