//! Repeated timed invocations of a single generator.
//!
//! Complements the criterion benches with a lightweight sweep that can run
//! from the CLI and report a [`TimingSummary`] per (algorithm, size).

use crate::config::ExperimentConfig;
use crate::error::ExperimentError;
use crate::timing::TimingSummary;
use std::hint::black_box;
use std::time::Instant;
use tracing::{debug, info};
use variate_core::generators::Algorithm;
use variate_core::rng::UniformSource;
use variate_core::GeneratorParameters;

/// Untimed invocations run before measuring.
pub const WARM_UP_ITERATIONS: usize = 3;

/// Times `samples` invocations of `algorithm` at `size` after a warm-up.
///
/// Every invocation uses the standard parameters `(size, 0, 1)` and draws
/// from one source seeded with `seed`.
///
/// # Errors
///
/// Returns an error if `size` or `samples` is zero.
pub fn benchmark(
    algorithm: Algorithm,
    size: usize,
    samples: usize,
    seed: u64,
) -> Result<TimingSummary, ExperimentError> {
    if samples == 0 {
        return Err(ExperimentError::invalid_argument(
            "samples must be greater than 0",
        ));
    }

    let params = GeneratorParameters::standard(size)?;
    let mut source = UniformSource::from_seed(seed);

    for _ in 0..WARM_UP_ITERATIONS {
        black_box(algorithm.generate(&params, &mut source)?);
    }

    let mut durations = Vec::with_capacity(samples);
    for _ in 0..samples {
        let start = Instant::now();
        let batch = algorithm.generate(&params, &mut source)?;
        durations.push(start.elapsed());
        black_box(batch);
    }

    let summary = TimingSummary::from_durations(algorithm, size, &durations)
        .ok_or_else(|| ExperimentError::invalid_argument("no timings collected"))?;
    debug!(
        algorithm = %algorithm,
        size,
        median_us = summary.median * 1e6,
        "benchmark finished"
    );
    Ok(summary)
}

/// Benchmarks every configured algorithm at every configured size.
///
/// Summaries are ordered by size, then algorithm.
pub fn benchmark_all(
    config: &ExperimentConfig,
    samples: usize,
) -> Result<Vec<TimingSummary>, ExperimentError> {
    config.validate()?;
    info!(
        sizes = ?config.target_sizes,
        algorithms = config.algorithms.len(),
        samples,
        "Starting benchmark sweep"
    );

    let mut summaries = Vec::with_capacity(config.target_sizes.len() * config.algorithms.len());
    for &size in &config.target_sizes {
        for &algorithm in &config.algorithms {
            summaries.push(benchmark(algorithm, size, samples, config.seed)?);
        }
    }
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benchmark_summary_shape() {
        let summary = benchmark(Algorithm::MarsagliaPolar, 200, 5, 7).unwrap();

        assert_eq!(summary.samples, 5);
        assert_eq!(summary.target_size, 200);
        assert!(summary.min <= summary.median);
        assert!(summary.median <= summary.max);
        assert!(summary.std_dev >= 0.0);
    }

    #[test]
    fn test_benchmark_rejects_zero_samples() {
        let err = benchmark(Algorithm::BoxMuller, 10, 0, 1).unwrap_err();
        assert!(matches!(err, ExperimentError::InvalidArgument(_)));
    }

    #[test]
    fn test_benchmark_rejects_zero_size() {
        let err = benchmark(Algorithm::BoxMuller, 0, 3, 1).unwrap_err();
        assert!(matches!(err, ExperimentError::Generator(_)));
    }

    #[test]
    fn test_benchmark_all_grid() {
        let config = ExperimentConfig::builder()
            .target_sizes(vec![10, 50])
            .algorithms(vec![Algorithm::BoxMuller, Algorithm::GenericRejection])
            .trials(1)
            .build()
            .unwrap();

        let summaries = benchmark_all(&config, 2).unwrap();
        assert_eq!(summaries.len(), 4);
        assert_eq!(summaries[0].target_size, 10);
        assert_eq!(summaries[1].algorithm, Algorithm::GenericRejection);
        assert_eq!(summaries[3].target_size, 50);
    }
}
