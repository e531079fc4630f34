//! Error types for the variate generators.
//!
//! Validation failures are raised before any draw is made, so a failed call
//! never advances the uniform source.

use thiserror::Error;

/// Generator error.
///
/// # Variants
/// - `InvalidArgument`: a [`GeneratorParameters`](crate::GeneratorParameters)
///   field is outside its domain
///
/// # Examples
/// ```
/// use variate_core::GeneratorError;
///
/// let err = GeneratorError::invalid("sigma", "must be positive, got 0");
/// assert_eq!(
///     err.to_string(),
///     "Invalid argument 'sigma': must be positive, got 0"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// Parameter outside its valid domain.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        reason: String,
    },
}

impl GeneratorError {
    /// Create an invalid argument error
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Name of the offending parameter.
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidArgument { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeneratorError::invalid("mu", "must be finite, got NaN");
        assert!(err.to_string().contains("mu"));
        assert!(err.to_string().contains("NaN"));
        assert_eq!(err.parameter(), "mu");
    }
}
