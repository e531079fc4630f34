//! Marsaglia polar method.
//!
//! Points drawn uniformly from the square [-1, 1)^2 are kept when they fall
//! inside the unit disk; each kept point yields two independent normals.

use super::{NormalGenerator, VariateBatch};
use crate::error::GeneratorError;
use crate::params::GeneratorParameters;
use crate::rng::UniformSource;

/// Paired rejection generator over the unit disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarsagliaPolar;

impl MarsagliaPolar {
    /// Whether the squared radius `s` lies inside the unit disk.
    ///
    /// The origin is excluded since it has no direction.
    #[inline]
    pub fn accepts(s: f64) -> bool {
        s > 0.0 && s <= 1.0
    }
}

impl NormalGenerator for MarsagliaPolar {
    fn generate(
        &self,
        params: &GeneratorParameters,
        source: &mut UniformSource,
    ) -> Result<VariateBatch, GeneratorError> {
        params.validate()?;
        let n = params.n();

        let u1 = source.draw(n);
        let u2 = source.draw(n);

        let mut z1 = Vec::new();
        let mut z2 = Vec::new();
        for (&a, &b) in u1.iter().zip(&u2) {
            let x = 2.0 * a - 1.0;
            let y = 2.0 * b - 1.0;
            let s = x * x + y * y;
            if !Self::accepts(s) {
                continue;
            }
            let factor = (-2.0 * s.ln()).sqrt() / s.sqrt();
            z1.push(params.scale(factor * x));
            z2.push(params.scale(factor * y));
        }

        Ok(VariateBatch::paired(z1, z2, n))
    }
}

/// Runs [`MarsagliaPolar`] with unvalidated raw parameters.
pub fn marsaglia_polar(
    n: usize,
    mu: f64,
    sigma: f64,
    source: &mut UniformSource,
) -> Result<Vec<f64>, GeneratorError> {
    let params = GeneratorParameters::new(n, mu, sigma)?;
    MarsagliaPolar.generate(&params, source).map(VariateBatch::into_values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_membership() {
        assert!(MarsagliaPolar::accepts(1.0));
        assert!(MarsagliaPolar::accepts(0.25));
        assert!(!MarsagliaPolar::accepts(0.0));
        assert!(!MarsagliaPolar::accepts(1.0 + 1e-12));
    }

    #[test]
    fn test_output_is_even_and_bounded() {
        let mut source = UniformSource::from_seed(17);
        for n in [1, 3, 50, 999] {
            let params = GeneratorParameters::standard(n).unwrap();
            let batch = MarsagliaPolar.generate(&params, &mut source).unwrap();
            assert_eq!(batch.len() % 2, 0);
            assert!(batch.len() <= 2 * n);
        }
    }

    #[test]
    fn test_values_are_finite() {
        let mut source = UniformSource::from_seed(2);
        let values = marsaglia_polar(10_000, 0.0, 1.0, &mut source).unwrap();
        assert!(values.iter().all(|v| v.is_finite()));
    }
}
