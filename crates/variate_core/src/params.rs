//! Generator parameters.

use crate::error::GeneratorError;

/// Requested sample size and the affine map applied to standard variates.
///
/// Every generator maps a standard variate `z` to `mu + sigma * z`.
///
/// # Examples
///
/// ```rust
/// use variate_core::GeneratorParameters;
///
/// let params = GeneratorParameters::new(1000, 0.0, 1.0).unwrap();
/// assert_eq!(params.n(), 1000);
///
/// assert!(GeneratorParameters::new(1000, 0.0, 0.0).is_err());
/// assert!(GeneratorParameters::new(0, 0.0, 1.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorParameters {
    n: usize,
    mu: f64,
    sigma: f64,
}

impl GeneratorParameters {
    /// Creates validated parameters.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidArgument`] if:
    /// - `n` is 0
    /// - `mu` is not finite
    /// - `sigma` is not finite or not strictly positive
    pub fn new(n: usize, mu: f64, sigma: f64) -> Result<Self, GeneratorError> {
        let params = Self { n, mu, sigma };
        params.validate()?;
        Ok(params)
    }

    /// Standard normal parameters (`mu = 0`, `sigma = 1`) for `n` draws.
    pub fn standard(n: usize) -> Result<Self, GeneratorError> {
        Self::new(n, 0.0, 1.0)
    }

    /// Requested sample size.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Location.
    #[inline]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Scale.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Maps a standard variate onto `mu + sigma * z`.
    #[inline]
    pub fn scale(&self, z: f64) -> f64 {
        self.mu + self.sigma * z
    }

    /// Checks every field against its domain.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.n == 0 {
            return Err(GeneratorError::invalid("n", "must be a positive integer"));
        }
        if !self.mu.is_finite() {
            return Err(GeneratorError::invalid(
                "mu",
                format!("must be finite, got {}", self.mu),
            ));
        }
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(GeneratorError::invalid(
                "sigma",
                format!("must be finite and positive, got {}", self.sigma),
            ));
        }
        Ok(())
    }
}
