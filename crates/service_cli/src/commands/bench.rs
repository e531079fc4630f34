//! Bench command implementation
//!
//! Times repeated generator invocations outside criterion.

use std::path::Path;
use tracing::info;
use variate_experiment::bench::benchmark_all;

use crate::config::{self, Overrides};
use crate::{CliError, Result};

/// Run the benchmark command
pub fn run(config_path: &str, overrides: &Overrides, samples: usize) -> Result<()> {
    if samples == 0 {
        return Err(CliError::invalid_argument("samples must be greater than 0"));
    }

    let config = config::load(Path::new(config_path), overrides)?;
    info!("Benchmarking {} algorithms...", config.algorithms.len());

    let summaries = benchmark_all(&config, samples)?;

    println!(
        "{:<18} {:>9} {:>12} {:>12} {:>12} {:>14}",
        "Algorithm", "n", "min (µs)", "median (µs)", "max (µs)", "values/s"
    );
    for summary in &summaries {
        println!(
            "{:<18} {:>9} {:>12.1} {:>12.1} {:>12.1} {:>14.3e}",
            summary.algorithm.label(),
            summary.target_size,
            summary.min * 1e6,
            summary.median * 1e6,
            summary.max * 1e6,
            summary.throughput(summary.target_size as f64)
        );
    }

    info!("Benchmark complete");
    Ok(())
}
