//! # variate_gof: Goodness-of-Fit Collaborators
//!
//! ## Role
//!
//! The experiment harness treats normality tests as black boxes returning a
//! p-value. This crate supplies the two it consumes:
//! - Two-sample Kolmogorov–Smirnov (`ks_two_sample`)
//! - Shapiro–Wilk, Royston's approximation (`shapiro_wilk`)
//!
//! Both are exposed through the [`GoodnessOfFit`] trait so the harness can be
//! driven by any other implementation.
//!
//! ## Usage Example
//!
//! ```rust
//! use variate_gof::{ClassicalTests, GoodnessOfFit};
//!
//! let tests = ClassicalTests;
//! let sample = [-0.8, -0.3, 0.0, 0.2, 0.5, 1.1, -1.4, 0.7];
//! let reference = [-1.0, -0.5, -0.1, 0.1, 0.4, 0.9, 1.3, -0.2];
//!
//! let ks = tests.ks_test(&sample, &reference).unwrap();
//! let sw = tests.shapiro_test(&sample).unwrap();
//! assert!((0.0..=1.0).contains(&ks));
//! assert!((0.0..=1.0).contains(&sw));
//! ```

#![deny(missing_docs)]

mod error;
mod ks;
mod shapiro;

pub use error::TestError;
pub use ks::{ks_two_sample, KsOutcome};
pub use shapiro::{shapiro_wilk, ShapiroOutcome, MAX_SAMPLE_SIZE, MIN_SAMPLE_SIZE};

/// Pair of normality tests consumed by the experiment harness.
pub trait GoodnessOfFit {
    /// p-value of a two-sample KS test of `sample` against `reference`.
    fn ks_test(&self, sample: &[f64], reference: &[f64]) -> Result<f64, TestError>;

    /// p-value of a Shapiro–Wilk normality test of `sample`.
    fn shapiro_test(&self, sample: &[f64]) -> Result<f64, TestError>;
}

/// The classical implementations in this crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassicalTests;

impl GoodnessOfFit for ClassicalTests {
    fn ks_test(&self, sample: &[f64], reference: &[f64]) -> Result<f64, TestError> {
        ks_two_sample(sample, reference).map(|outcome| outcome.p_value)
    }

    fn shapiro_test(&self, sample: &[f64]) -> Result<f64, TestError> {
        shapiro_wilk(sample).map(|outcome| outcome.p_value)
    }
}
