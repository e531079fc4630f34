//! Error types for the goodness-of-fit tests.

use thiserror::Error;

/// Goodness-of-fit test failure.
///
/// # Variants
/// - `Precondition`: the sample cannot be tested (too small, too large,
///   zero range, non-finite values)
/// - `Numerical`: the reference distribution could not be constructed
///
/// # Examples
/// ```
/// use variate_gof::TestError;
///
/// let err = TestError::precondition("shapiro-wilk", "sample size 2 below minimum 3");
/// assert_eq!(
///     err.to_string(),
///     "shapiro-wilk precondition failed: sample size 2 below minimum 3"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TestError {
    /// The sample violates a precondition of the test.
    #[error("{test} precondition failed: {reason}")]
    Precondition {
        /// Test name.
        test: &'static str,
        /// What was violated.
        reason: String,
    },

    /// Numerical failure inside the test.
    #[error("{test} numerical failure: {reason}")]
    Numerical {
        /// Test name.
        test: &'static str,
        /// Underlying cause.
        reason: String,
    },
}

impl TestError {
    /// Create a precondition error
    pub fn precondition(test: &'static str, reason: impl Into<String>) -> Self {
        Self::Precondition {
            test,
            reason: reason.into(),
        }
    }

    /// Create a numerical error
    pub fn numerical(test: &'static str, reason: impl Into<String>) -> Self {
        Self::Numerical {
            test,
            reason: reason.into(),
        }
    }

    /// Whether the error is a precondition failure.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition { .. })
    }
}
