//! Half-normal rejection from pairs of exponential draws.
//!
//! A candidate `y1 ~ Exp(1)` is accepted when a second exponential draw
//! `y2` exceeds `(1 - y1)^2 / 2`. Accepted values are half-normal; a random
//! sign turns them into standard normals.

use super::{random_sign, NormalGenerator, VariateBatch};
use crate::error::GeneratorError;
use crate::params::GeneratorParameters;
use crate::rng::UniformSource;

/// Single-stream rejection generator driven by exponential pairs.
#[derive(Clone, Copy, Debug, Default)]
pub struct PolarRejection;

impl PolarRejection {
    /// Whether the candidate pair lies under the half-normal envelope.
    #[inline]
    pub fn accepts(y1: f64, y2: f64) -> bool {
        (1.0 - y1).powi(2) / 2.0 < y2
    }
}

impl NormalGenerator for PolarRejection {
    fn generate(
        &self,
        params: &GeneratorParameters,
        source: &mut UniformSource,
    ) -> Result<VariateBatch, GeneratorError> {
        params.validate()?;
        let n = params.n();

        let y1 = source.draw_exponential(n);
        let y2 = source.draw_exponential(n);

        let magnitudes: Vec<f64> = y1
            .iter()
            .zip(&y2)
            .filter(|&(&a, &b)| Self::accepts(a, b))
            .map(|(&a, _)| a)
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

/// Runs [`PolarRejection`] with unvalidated raw parameters.
pub fn polar_rejection(
    n: usize,
    mu: f64,
    sigma: f64,
    source: &mut UniformSource,
) -> Result<Vec<f64>, GeneratorError> {
    let params = GeneratorParameters::new(n, mu, sigma)?;
    PolarRejection.generate(&params, source).map(VariateBatch::into_values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceptance_boundary() {
        // y1 = 1 makes the envelope zero; any positive y2 accepts
        assert!(PolarRejection::accepts(1.0, 1e-9));
        assert!(!PolarRejection::accepts(1.0, 0.0));
        // (1 - 3)^2 / 2 = 2
        assert!(!PolarRejection::accepts(3.0, 2.0));
        assert!(PolarRejection::accepts(3.0, 2.0 + 1e-9));
    }

    #[test]
    fn test_length_bounded_by_n() {
        let mut source = UniformSource::from_seed(8);
        let params = GeneratorParameters::standard(1000).unwrap();
        let batch = PolarRejection.generate(&params, &mut source).unwrap();

        assert!(batch.len() <= 1000);
        assert!(batch.len() > 0);
        assert_eq!(batch.proposals(), 1000);
    }

    #[test]
    fn test_replays_acceptance_from_raw_draws() {
        let mut source = UniformSource::from_seed(21);
        let mut replay = UniformSource::from_seed(21);

        let params = GeneratorParameters::new(200, 0.0, 1.0).unwrap();
        let batch = PolarRejection.generate(&params, &mut source).unwrap();

        let y1 = replay.draw_exponential(200);
        let y2 = replay.draw_exponential(200);
        let expected: Vec<f64> = y1
            .iter()
            .zip(&y2)
            .filter(|&(&a, &b)| PolarRejection::accepts(a, b))
            .map(|(&a, _)| a)
            .collect();

        assert_eq!(batch.len(), expected.len());
        for (value, magnitude) in batch.values().iter().zip(&expected) {
            assert_eq!(value.abs(), *magnitude);
        }
    }
}
