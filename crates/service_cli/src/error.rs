//! Error types for the CLI.

use thiserror::Error;
use variate_experiment::{ConfigError, ExperimentError};

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Experiment run error
    #[error("Experiment error: {0}")]
    Experiment(#[from] ExperimentError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::invalid_argument("samples must be positive");
        assert_eq!(err.to_string(), "Invalid argument: samples must be positive");

        let err: CliError = ConfigError::Parse("bad".to_string()).into();
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_experiment_error_propagates() {
        let err: CliError =
            ExperimentError::invalid_argument("samples must be greater than 0").into();
        assert!(matches!(err, CliError::Experiment(ExperimentError::InvalidArgument(_))));
        assert_eq!(
            err.to_string(),
            "Experiment error: Invalid argument: samples must be greater than 0"
        );
    }
}
