//! Error types for the experiment harness.

use thiserror::Error;
use variate_core::GeneratorError;

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error in the config file or an environment override
    #[error("Parse error: {0}")]
    Parse(String),

    /// One or more fields failed validation
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Experiment error type
///
/// Only configuration and generator validation failures abort a run.
/// Degenerate samples and test precondition failures are recorded per trial
/// instead.
#[derive(Debug, Error)]
pub enum ExperimentError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generator rejected its parameters
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// IO error while writing a report
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialisation error
    #[error("Serialisation error: {0}")]
    Serialisation(String),

    /// Invalid argument to a harness operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ExperimentError {
    /// Create a serialisation error
    pub fn serialisation(msg: impl Into<String>) -> Self {
        Self::Serialisation(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

impl From<serde_json::Error> for ExperimentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialisation(err.to_string())
    }
}

impl From<csv::Error> for ExperimentError {
    fn from(err: csv::Error) -> Self {
        Self::Serialisation(err.to_string())
    }
}
