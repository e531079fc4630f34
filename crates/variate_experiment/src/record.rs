//! Per-trial records.

use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Distribution};
use variate_core::generators::SeriesId;

/// One stream of one generator invocation at one target size.
///
/// Records are immutable once built. They hold no timing so that two runs
/// with the same seed produce identical record sequences.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Series the stream belongs to.
    pub series: SeriesId,
    /// Trial index, starting at 1.
    pub trial: usize,
    /// Requested sample size `n`.
    pub requested_size: usize,
    /// Number of values the stream actually holds.
    pub produced_length: usize,
    /// KS p-value against a fresh reference sample, if computed.
    pub ks_p_value: Option<f64>,
    /// Shapiro–Wilk p-value, if computed.
    pub shapiro_p_value: Option<f64>,
    /// Sample mean of the stream.
    pub sample_mean: Option<f64>,
    /// Sample standard deviation of the stream.
    pub sample_std_dev: Option<f64>,
}

impl TrialRecord {
    /// Starts a record for `values`, filling in length and moments.
    ///
    /// p-values are left missing until the tests have run.
    pub fn new(series: SeriesId, trial: usize, requested_size: usize, values: &[f64]) -> Self {
        let (sample_mean, sample_std_dev) = if values.is_empty() {
            (None, None)
        } else {
            let data = Data::new(values.to_vec());
            (data.mean(), data.std_dev().filter(|s| s.is_finite()))
        };

        Self {
            series,
            trial,
            requested_size,
            produced_length: values.len(),
            ks_p_value: None,
            shapiro_p_value: None,
            sample_mean,
            sample_std_dev,
        }
    }

    /// Whether the stream came out empty.
    pub fn is_degenerate(&self) -> bool {
        self.produced_length == 0
    }
}
