//! Aggregation of trial records per (series, target size).
//!
//! The [`ResultTable`] is the single append-only store for every record of a
//! run. [`AggregateResult`]s are derived from it on demand and never updated
//! in place.

use crate::record::TrialRecord;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Distribution};
use std::collections::BTreeMap;
use variate_core::generators::SeriesId;

/// Key of one aggregate: a series at one target size.
pub type TupleKey = (SeriesId, usize);

/// Append-only mapping from `(series, target size)` to its trial records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultTable {
    records: BTreeMap<TupleKey, Vec<TrialRecord>>,
}

impl ResultTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record under its own series and requested size.
    pub fn append(&mut self, record: TrialRecord) {
        self.records
            .entry((record.series, record.requested_size))
            .or_default()
            .push(record);
    }

    /// Moves every record of `other` into this table.
    ///
    /// Records of a tuple present in both tables are appended after the
    /// existing ones.
    pub fn merge(&mut self, other: ResultTable) {
        for (key, records) in other.records {
            self.records.entry(key).or_default().extend(records);
        }
    }

    /// Records for one tuple, in insertion order.
    pub fn records(&self, series: SeriesId, size: usize) -> &[TrialRecord] {
        self.records
            .get(&(series, size))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All records, ordered by tuple and then by insertion.
    pub fn iter(&self) -> impl Iterator<Item = &TrialRecord> {
        self.records.values().flatten()
    }

    /// Tuples present in the table.
    pub fn keys(&self) -> impl Iterator<Item = &TupleKey> {
        self.records.keys()
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    /// Whether no record has been appended.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Aggregates every tuple at significance level `alpha`.
    pub fn aggregate(&self, alpha: f64) -> Vec<AggregateResult> {
        self.records
            .iter()
            .map(|(&(series, size), records)| {
                AggregateResult::from_records(series, size, records, alpha)
            })
            .collect()
    }
}

/// Summary of all trials of one series at one target size.
///
/// p-value means are arithmetic means over the trials where the test ran;
/// rejections count p-values at or below the significance level. A mean is
/// `None` when every trial's value is missing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Series aggregated.
    pub series: SeriesId,
    /// Requested sample size.
    pub target_size: usize,
    /// Number of trial records.
    pub trials: usize,
    /// Mean produced length over all trials, degenerate ones included.
    pub mean_produced_length: f64,
    /// Trials whose stream came out empty.
    pub degenerate_trials: usize,
    /// Mean KS p-value.
    pub mean_ks_p_value: Option<f64>,
    /// KS p-values at or below the significance level.
    pub ks_rejections: usize,
    /// Trials without a KS p-value.
    pub ks_missing: usize,
    /// Mean Shapiro–Wilk p-value.
    pub mean_shapiro_p_value: Option<f64>,
    /// Shapiro–Wilk p-values at or below the significance level.
    pub shapiro_rejections: usize,
    /// Trials without a Shapiro–Wilk p-value.
    pub shapiro_missing: usize,
    /// Mean of the per-trial sample means.
    pub mean_sample_mean: Option<f64>,
    /// Mean of the per-trial sample standard deviations.
    pub mean_sample_std_dev: Option<f64>,
    /// Mean produced length divided by the target size.
    pub observed_acceptance: f64,
    /// Analytic acceptance probability of the producing algorithm.
    pub theoretical_acceptance: f64,
    /// Significance level used for the rejection counts.
    pub significance: f64,
}

impl AggregateResult {
    /// Derives the aggregate of `records` for one tuple.
    pub fn from_records(
        series: SeriesId,
        target_size: usize,
        records: &[TrialRecord],
        alpha: f64,
    ) -> Self {
        let trials = records.len();
        let mean_produced_length =
            mean_of(records.iter().map(|r| r.produced_length as f64)).unwrap_or(0.0);

        let ks = PValueSummary::collect(records.iter().map(|r| r.ks_p_value), alpha);
        let shapiro = PValueSummary::collect(records.iter().map(|r| r.shapiro_p_value), alpha);

        let observed_acceptance = if target_size == 0 {
            0.0
        } else {
            mean_produced_length / target_size as f64
        };

        Self {
            series,
            target_size,
            trials,
            mean_produced_length,
            degenerate_trials: records.iter().filter(|r| r.is_degenerate()).count(),
            mean_ks_p_value: ks.mean,
            ks_rejections: ks.rejections,
            ks_missing: ks.missing,
            mean_shapiro_p_value: shapiro.mean,
            shapiro_rejections: shapiro.rejections,
            shapiro_missing: shapiro.missing,
            mean_sample_mean: mean_of(records.iter().filter_map(|r| r.sample_mean)),
            mean_sample_std_dev: mean_of(records.iter().filter_map(|r| r.sample_std_dev)),
            observed_acceptance,
            theoretical_acceptance: series.algorithm.theoretical_acceptance(),
            significance: alpha,
        }
    }

    /// Whether no trial produced a KS p-value.
    pub fn all_missing(&self) -> bool {
        self.trials == self.ks_missing
    }
}

struct PValueSummary {
    mean: Option<f64>,
    rejections: usize,
    missing: usize,
}

impl PValueSummary {
    fn collect(values: impl Iterator<Item = Option<f64>>, alpha: f64) -> Self {
        let mut present = Vec::new();
        let mut missing = 0;
        for value in values {
            match value {
                Some(p) => present.push(p),
                None => missing += 1,
            }
        }

        Self {
            rejections: present.iter().filter(|&&p| p <= alpha).count(),
            mean: mean_of(present.into_iter()),
            missing,
        }
    }
}

fn mean_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        return None;
    }
    Data::new(values).mean()
}
