//! Repeated-trial driver.
//!
//! The harness invokes every configured algorithm `trials` times at every
//! target size, runs the goodness-of-fit collaborators on each output
//! stream and collects the results into a [`ResultTable`].
//!
//! # Execution modes
//!
//! - Sequential (default): sizes, then algorithms, then trials, all drawing
//!   from one [`UniformSource`] seeded once.
//! - Parallel: one rayon task per (algorithm, size) partition, each with its
//!   own source from [`UniformSource::partitioned`]. Partitions are merged
//!   in grid order, so parallel runs are reproducible too, though their
//!   values differ from the sequential stream.

use crate::aggregate::ResultTable;
use crate::config::ExperimentConfig;
use crate::error::ExperimentError;
use crate::record::TrialRecord;
use crate::report::ExperimentReport;
use crate::timing::TimingTable;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, warn};
use variate_core::generators::{Algorithm, SeriesId};
use variate_core::rng::UniformSource;
use variate_core::GeneratorParameters;
use variate_gof::{GoodnessOfFit, TestError};

/// Drives the generators through the configured trial grid.
#[derive(Clone, Debug)]
pub struct ExperimentHarness<G> {
    config: ExperimentConfig,
    tests: G,
}

/// Records and timings of one partition of the grid.
#[derive(Default)]
struct Partition {
    table: ResultTable,
    timings: TimingTable,
}

impl<G: GoodnessOfFit + Sync> ExperimentHarness<G> {
    /// Creates a harness after validating `config`.
    pub fn new(config: ExperimentConfig, tests: G) -> Result<Self, ExperimentError> {
        config.validate()?;
        Ok(Self { config, tests })
    }

    /// Active configuration.
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Goodness-of-fit collaborator.
    pub fn tests(&self) -> &G {
        &self.tests
    }

    /// Runs the full grid in the configured execution mode.
    pub fn run(&self) -> Result<ExperimentReport, ExperimentError> {
        if self.config.parallel {
            self.run_parallel()
        } else {
            self.run_sequential()
        }
    }

    /// Runs every trial on a single source in grid order.
    pub fn run_sequential(&self) -> Result<ExperimentReport, ExperimentError> {
        info!(
            seed = self.config.seed,
            invocations = self.config.total_invocations(),
            "Starting sequential experiment"
        );

        let mut source = UniformSource::from_seed(self.config.seed);
        let mut partition = Partition::default();

        for &size in &self.config.target_sizes {
            info!(size, "Running tier");
            for &algorithm in &self.config.algorithms {
                self.run_trials(algorithm, size, &mut source, &mut partition)?;
            }
        }

        Ok(self.finish(partition))
    }

    /// Runs each (algorithm, size) partition on its own rayon task.
    pub fn run_parallel(&self) -> Result<ExperimentReport, ExperimentError> {
        info!(
            seed = self.config.seed,
            invocations = self.config.total_invocations(),
            threads = rayon::current_num_threads(),
            "Starting parallel experiment"
        );

        let grid: Vec<(usize, Algorithm)> = self
            .config
            .target_sizes
            .iter()
            .flat_map(|&size| self.config.algorithms.iter().map(move |&a| (size, a)))
            .collect();

        let partitions: Vec<Partition> = grid
            .par_iter()
            .map(|&(size, algorithm)| {
                let key = partition_key(algorithm, size);
                let mut source = UniformSource::partitioned(self.config.seed, key);
                let mut partition = Partition::default();
                self.run_trials(algorithm, size, &mut source, &mut partition)?;
                Ok(partition)
            })
            .collect::<Result<_, ExperimentError>>()?;

        let merged = partitions
            .into_iter()
            .fold(Partition::default(), |mut acc, part| {
                acc.table.merge(part.table);
                acc.timings.merge(part.timings);
                acc
            });

        Ok(self.finish(merged))
    }

    fn run_trials(
        &self,
        algorithm: Algorithm,
        size: usize,
        source: &mut UniformSource,
        partition: &mut Partition,
    ) -> Result<(), ExperimentError> {
        let params = GeneratorParameters::standard(size)?;

        for trial in 1..=self.config.trials {
            let start = Instant::now();
            let batch = algorithm.generate(&params, source)?;
            partition.timings.record(algorithm, size, start.elapsed());

            for (stream, values) in batch.streams() {
                let series = SeriesId::new(algorithm, stream);
                let record = self.evaluate(series, trial, size, values, source);
                partition.table.append(record);
            }
        }

        debug!(
            algorithm = %algorithm,
            size,
            trials = self.config.trials,
            "Partition complete"
        );
        Ok(())
    }

    /// Builds the record for one stream, running whichever tests apply.
    fn evaluate(
        &self,
        series: SeriesId,
        trial: usize,
        size: usize,
        values: &[f64],
        source: &mut UniformSource,
    ) -> TrialRecord {
        let mut record = TrialRecord::new(series, trial, size, values);

        if values.is_empty() {
            warn!(series = %series, size, trial, "Degenerate sample, tests skipped");
            return record;
        }

        let reference = source.draw_normal(values.len());
        record.ks_p_value = p_value_or_missing(
            "ks",
            series,
            trial,
            self.tests.ks_test(values, &reference),
        );

        if self.config.shapiro_applies(size) {
            record.shapiro_p_value = p_value_or_missing(
                "shapiro-wilk",
                series,
                trial,
                self.tests.shapiro_test(values),
            );
        }

        record
    }

    fn finish(&self, partition: Partition) -> ExperimentReport {
        info!(records = partition.table.len(), "Experiment complete");
        ExperimentReport::new(self.config.clone(), partition.table, partition.timings)
    }
}

fn p_value_or_missing(
    test: &str,
    series: SeriesId,
    trial: usize,
    outcome: Result<f64, TestError>,
) -> Option<f64> {
    match outcome {
        Ok(p) => {
            debug!(test, series = %series, trial, p_value = p, "Test complete");
            Some(p)
        }
        Err(err) => {
            debug!(test, series = %series, trial, error = %err, "Test not applicable");
            None
        }
    }
}

/// Stable key for one (algorithm, size) partition.
fn partition_key(algorithm: Algorithm, size: usize) -> u64 {
    ((size as u64) << 8) | algorithm as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use variate_gof::ClassicalTests;

    fn small_config() -> ExperimentConfig {
        ExperimentConfig::builder()
            .target_sizes(vec![50])
            .trials(3)
            .seed(11)
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_validates_config() {
        let config = ExperimentConfig {
            trials: 0,
            ..ExperimentConfig::default()
        };
        assert!(ExperimentHarness::new(config, ClassicalTests).is_err());
    }

    #[test]
    fn test_one_record_per_stream_and_trial() {
        let harness = ExperimentHarness::new(small_config(), ClassicalTests).unwrap();
        let report = harness.run().unwrap();

        // six series, three trials each
        assert_eq!(report.table.len(), 18);
        for series in SeriesId::all() {
            let records = report.table.records(series, 50);
            assert_eq!(records.len(), 3);
            let trials: Vec<usize> = records.iter().map(|r| r.trial).collect();
            assert_eq!(trials, vec![1, 2, 3]);
        }
    }

    #[test]
    fn test_partition_keys_distinct() {
        let mut keys: Vec<u64> = [100, 1000]
            .iter()
            .flat_map(|&size| Algorithm::all().map(|a| partition_key(a, size)))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 8);
    }
}
