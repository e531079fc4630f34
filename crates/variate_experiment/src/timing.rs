//! Elapsed-time collection for generator invocations.
//!
//! Timing is kept apart from the trial records, which must stay
//! bit-reproducible across runs.

use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Distribution, Max, Min, OrderStatistics};
use std::collections::BTreeMap;
use std::time::Duration;
use variate_core::generators::Algorithm;

/// Distribution of elapsed durations for one (algorithm, size).
///
/// All durations are in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimingSummary {
    /// Timed algorithm.
    pub algorithm: Algorithm,
    /// Requested sample size.
    pub target_size: usize,
    /// Number of timed invocations.
    pub samples: usize,
    /// Fastest invocation.
    pub min: f64,
    /// Median invocation.
    pub median: f64,
    /// Mean invocation.
    pub mean: f64,
    /// Slowest invocation.
    pub max: f64,
    /// Sample standard deviation (0 for a single sample).
    pub std_dev: f64,
}

impl TimingSummary {
    /// Summarises `durations`; returns `None` when there are none.
    pub fn from_durations(
        algorithm: Algorithm,
        target_size: usize,
        durations: &[Duration],
    ) -> Option<Self> {
        if durations.is_empty() {
            return None;
        }

        let secs: Vec<f64> = durations.iter().map(Duration::as_secs_f64).collect();
        let samples = secs.len();
        let mut data = Data::new(secs);

        Some(Self {
            algorithm,
            target_size,
            samples,
            min: Min::min(&data),
            median: OrderStatistics::median(&mut data),
            mean: data.mean()?,
            max: Max::max(&data),
            // a single sample has no spread
            std_dev: data.std_dev().filter(|s| s.is_finite()).unwrap_or(0.0),
        })
    }

    /// Generated values per second at the median, given `values_per_call`.
    pub fn throughput(&self, values_per_call: f64) -> f64 {
        if self.median > 0.0 {
            values_per_call / self.median
        } else {
            f64::INFINITY
        }
    }
}

/// Durations per (algorithm, size), appended as invocations complete.
#[derive(Clone, Debug, Default)]
pub struct TimingTable {
    durations: BTreeMap<(Algorithm, usize), Vec<Duration>>,
}

impl TimingTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one invocation.
    pub fn record(&mut self, algorithm: Algorithm, size: usize, elapsed: Duration) {
        self.durations
            .entry((algorithm, size))
            .or_default()
            .push(elapsed);
    }

    /// Moves every duration of `other` into this table.
    pub fn merge(&mut self, other: TimingTable) {
        for (key, durations) in other.durations {
            self.durations.entry(key).or_default().extend(durations);
        }
    }

    /// Summaries for every recorded (algorithm, size).
    pub fn summaries(&self) -> Vec<TimingSummary> {
        self.durations
            .iter()
            .filter_map(|(&(algorithm, size), durations)| {
                TimingSummary::from_durations(algorithm, size, durations)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_summary_statistics() {
        let durations: Vec<Duration> = [4, 1, 3, 2]
            .iter()
            .map(|&ms| Duration::from_millis(ms))
            .collect();

        let summary =
            TimingSummary::from_durations(Algorithm::BoxMuller, 100, &durations).unwrap();

        assert_eq!(summary.samples, 4);
        assert_abs_diff_eq!(summary.min, 0.001, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.max, 0.004, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.median, 0.0025, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.mean, 0.0025, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.std_dev, 0.00129099, epsilon = 1e-8);
        assert_abs_diff_eq!(summary.throughput(200.0), 80_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_single_duration_has_zero_spread() {
        let summary = TimingSummary::from_durations(
            Algorithm::GenericRejection,
            10,
            &[Duration::from_micros(250)],
        )
        .unwrap();

        assert_eq!(summary.samples, 1);
        assert_abs_diff_eq!(summary.median, 0.00025, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.min, summary.max, epsilon = 1e-15);
        assert_eq!(summary.std_dev, 0.0);
    }

    #[test]
    fn test_odd_count_median() {
        let durations: Vec<Duration> = [9, 1, 5]
            .iter()
            .map(|&us| Duration::from_micros(us))
            .collect();
        let summary =
            TimingSummary::from_durations(Algorithm::BoxMuller, 10, &durations).unwrap();
        assert_abs_diff_eq!(summary.median, 5e-6, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_durations() {
        assert!(TimingSummary::from_durations(Algorithm::BoxMuller, 1, &[]).is_none());
    }

    #[test]
    fn test_table_merge() {
        let mut a = TimingTable::new();
        a.record(Algorithm::MarsagliaPolar, 10, Duration::from_micros(5));
        let mut b = TimingTable::new();
        b.record(Algorithm::MarsagliaPolar, 10, Duration::from_micros(7));
        b.record(Algorithm::BoxMuller, 10, Duration::from_micros(3));

        a.merge(b);
        let summaries = a.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].algorithm, Algorithm::BoxMuller);
        assert_eq!(summaries[1].samples, 2);
    }
}
