//! Half-normal rejection with a `sqrt(e)`-scaled exponential proposal.
//!
//! The envelope `sqrt(e) * exp(-y)` dominates the half-normal kernel
//! `exp(-y^2 / 2)`; a candidate is kept when a uniform draw scaled onto the
//! envelope falls under the kernel.

use super::{random_sign, NormalGenerator, VariateBatch};
use crate::error::GeneratorError;
use crate::params::GeneratorParameters;
use crate::rng::UniformSource;
use std::f64::consts::E;

/// Single-stream acceptance-rejection generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenericRejection;

impl GenericRejection {
    /// Whether `u` scaled onto the envelope at `y` lies under the kernel.
    #[inline]
    pub fn accepts(u: f64, y: f64) -> bool {
        E.sqrt() * u * (-y).exp() <= (-y * y / 2.0).exp()
    }
}

impl NormalGenerator for GenericRejection {
    fn generate(
        &self,
        params: &GeneratorParameters,
        source: &mut UniformSource,
    ) -> Result<VariateBatch, GeneratorError> {
        params.validate()?;
        let n = params.n();

        let u1 = source.draw(n);
        let y = source.draw_exponential(n);

        let magnitudes: Vec<f64> = u1
            .iter()
            .zip(&y)
            .filter(|&(&u, &v)| Self::accepts(u, v))
            .map(|(_, &v)| v)
            .collect();

        let signs = source.draw(magnitudes.len());
        let values = magnitudes
            .iter()
            .zip(&signs)
            .map(|(&m, &u)| params.scale(random_sign(u) * m))
            .collect();

        Ok(VariateBatch::single(values, n))
    }
}

/// Runs [`GenericRejection`] with unvalidated raw parameters.
pub fn generic_rejection(
    n: usize,
    mu: f64,
    sigma: f64,
    source: &mut UniformSource,
) -> Result<Vec<f64>, GeneratorError> {
    let params = GeneratorParameters::new(n, mu, sigma)?;
    GenericRejection.generate(&params, source).map(VariateBatch::into_values)
}
