//! Box–Muller transform.
//!
//! Every pair of uniforms yields a pair of independent standard normals,
//! so the output length is always exactly `2n`.

use super::{NormalGenerator, VariateBatch};
use crate::error::GeneratorError;
use crate::params::GeneratorParameters;
use crate::rng::UniformSource;
use std::f64::consts::TAU;

/// Exact Box–Muller generator (no rejection).
#[derive(Clone, Copy, Debug, Default)]
pub struct BoxMuller;

impl NormalGenerator for BoxMuller {
    fn generate(
        &self,
        params: &GeneratorParameters,
        source: &mut UniformSource,
    ) -> Result<VariateBatch, GeneratorError> {
        params.validate()?;
        let n = params.n();

        let u1 = source.draw(n);
        let u2 = source.draw(n);

        let mut z1 = Vec::with_capacity(n);
        let mut z2 = Vec::with_capacity(n);
        for (&a, &b) in u1.iter().zip(&u2) {
            // 1 - u lies in (0, 1], so the radius is finite for a draw of 0
            let r = (-2.0 * (1.0 - a).ln()).sqrt();
            let theta = TAU * b;
            z1.push(params.scale(r * theta.cos()));
            z2.push(params.scale(r * theta.sin()));
        }

        Ok(VariateBatch::paired(z1, z2, n))
    }
}

/// Runs [`BoxMuller`] with unvalidated raw parameters.
///
/// # Examples
///
/// ```rust
/// use variate_core::generators::box_muller;
/// use variate_core::rng::UniformSource;
///
/// let mut source = UniformSource::from_seed(5);
/// let values = box_muller(1, 0.0, 1.0, &mut source).unwrap();
/// assert_eq!(values.len(), 2);
/// ```
pub fn box_muller(
    n: usize,
    mu: f64,
    sigma: f64,
    source: &mut UniformSource,
) -> Result<Vec<f64>, GeneratorError> {
    let params = GeneratorParameters::new(n, mu, sigma)?;
    BoxMuller.generate(&params, source).map(VariateBatch::into_values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_length_is_exactly_two_n() {
        let mut source = UniformSource::from_seed(1);
        for n in [1, 2, 17, 1000] {
            let params = GeneratorParameters::standard(n).unwrap();
            let batch = BoxMuller.generate(&params, &mut source).unwrap();
            assert_eq!(batch.len(), 2 * n);
            assert_eq!(batch.acceptance_rate(), 1.0);
        }
    }

    #[test]
    fn test_matches_closed_form() {
        let mut source = UniformSource::from_seed(11);
        let mut replay = UniformSource::from_seed(11);

        let params = GeneratorParameters::new(4, 1.0, 2.0).unwrap();
        let batch = BoxMuller.generate(&params, &mut source).unwrap();

        let u1 = replay.draw(4);
        let u2 = replay.draw(4);
        let (z1, z2) = batch.halves();
        for i in 0..4 {
            let r = (-2.0 * (1.0 - u1[i]).ln()).sqrt();
            let theta = TAU * u2[i];
            assert_abs_diff_eq!(z1[i], 1.0 + 2.0 * r * theta.cos(), epsilon = 1e-12);
            assert_abs_diff_eq!(z2[i], 1.0 + 2.0 * r * theta.sin(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_invalid_sigma_draws_nothing() {
        let mut source = UniformSource::from_seed(3);
        let mut untouched = UniformSource::from_seed(3);

        assert!(box_muller(10, 0.0, 0.0, &mut source).is_err());
        assert!(box_muller(10, 0.0, -1.0, &mut source).is_err());
        assert_eq!(source.gen_uniform(), untouched.gen_uniform());
    }
}
