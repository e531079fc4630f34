//! Integration tests for the experiment harness: reproducibility, record
//! layout, collaborator failure handling and report output.

use std::sync::atomic::{AtomicUsize, Ordering};
use variate_core::generators::{Algorithm, SeriesId, Stream};
use variate_experiment::{ExperimentConfig, ExperimentHarness, OutputFormat, TrialRecord};
use variate_gof::{ClassicalTests, GoodnessOfFit, TestError};

fn config(sizes: Vec<usize>, trials: usize, seed: u64) -> ExperimentConfig {
    ExperimentConfig::builder()
        .target_sizes(sizes)
        .trials(trials)
        .seed(seed)
        .build()
        .unwrap()
}

fn records(config: ExperimentConfig) -> Vec<TrialRecord> {
    let harness = ExperimentHarness::new(config, ClassicalTests).unwrap();
    harness.run().unwrap().table.iter().cloned().collect()
}

/// Collaborator whose tests always fail their preconditions.
struct FailingTests;

impl GoodnessOfFit for FailingTests {
    fn ks_test(&self, _: &[f64], _: &[f64]) -> Result<f64, TestError> {
        Err(TestError::precondition("ks", "unavailable"))
    }

    fn shapiro_test(&self, _: &[f64]) -> Result<f64, TestError> {
        Err(TestError::precondition("shapiro-wilk", "unavailable"))
    }
}

/// Collaborator returning a fixed p-value and counting Shapiro calls.
#[derive(Default)]
struct CountingTests {
    shapiro_calls: AtomicUsize,
}

impl GoodnessOfFit for CountingTests {
    fn ks_test(&self, sample: &[f64], reference: &[f64]) -> Result<f64, TestError> {
        assert_eq!(sample.len(), reference.len());
        Ok(0.5)
    }

    fn shapiro_test(&self, _: &[f64]) -> Result<f64, TestError> {
        self.shapiro_calls.fetch_add(1, Ordering::Relaxed);
        Ok(0.5)
    }
}

/// Collaborator that refuses empty samples and counts KS calls.
#[derive(Default)]
struct NonEmptyTests {
    ks_calls: AtomicUsize,
}

impl GoodnessOfFit for NonEmptyTests {
    fn ks_test(&self, sample: &[f64], _: &[f64]) -> Result<f64, TestError> {
        assert!(!sample.is_empty(), "KS invoked on an empty stream");
        self.ks_calls.fetch_add(1, Ordering::Relaxed);
        Ok(0.5)
    }

    fn shapiro_test(&self, sample: &[f64]) -> Result<f64, TestError> {
        assert!(!sample.is_empty(), "Shapiro-Wilk invoked on an empty stream");
        Ok(0.5)
    }
}

#[test]
fn test_same_seed_same_records() {
    let first = records(config(vec![100, 300], 4, 99));
    let second = records(config(vec![100, 300], 4, 99));

    assert_eq!(first.len(), 2 * 6 * 4);
    assert_eq!(first, second);
}

#[test]
fn test_different_seed_different_records() {
    let first = records(config(vec![200], 3, 1));
    let second = records(config(vec![200], 3, 2));
    assert_ne!(first, second);
}

#[test]
fn test_parallel_runs_reproducible() {
    let mut parallel = config(vec![100, 500], 3, 5);
    parallel.parallel = true;

    let first = records(parallel.clone());
    let second = records(parallel);

    assert_eq!(first.len(), 2 * 6 * 3);
    assert_eq!(first, second);
}

#[test]
fn test_six_series_per_size() {
    let harness = ExperimentHarness::new(config(vec![100, 1000], 2, 3), ClassicalTests).unwrap();
    let report = harness.run().unwrap();

    assert_eq!(report.aggregates.len(), 12);
    for size in [100, 1000] {
        for series in SeriesId::all() {
            assert_eq!(report.table.records(series, size).len(), 2);
        }
    }
}

#[test]
fn test_paired_streams_have_equal_length() {
    let harness = ExperimentHarness::new(config(vec![400], 5, 8), ClassicalTests).unwrap();
    let report = harness.run().unwrap();

    for algorithm in [Algorithm::BoxMuller, Algorithm::MarsagliaPolar] {
        let z1 = report
            .table
            .records(SeriesId::new(algorithm, Stream::First), 400);
        let z2 = report
            .table
            .records(SeriesId::new(algorithm, Stream::Second), 400);
        for (a, b) in z1.iter().zip(z2) {
            assert_eq!(a.produced_length, b.produced_length);
        }
    }

    let box_muller = report
        .table
        .records(SeriesId::new(Algorithm::BoxMuller, Stream::First), 400);
    assert!(box_muller.iter().all(|r| r.produced_length == 400));
}

#[test]
fn test_shapiro_skipped_above_cutoff() {
    let tests = CountingTests::default();
    let cfg = ExperimentConfig::builder()
        .target_sizes(vec![100, 2000])
        .trials(2)
        .shapiro_max_size(1000)
        .build()
        .unwrap();
    let harness = ExperimentHarness::new(cfg, tests).unwrap();
    let report = harness.run().unwrap();

    for record in report.table.iter() {
        assert!(record.ks_p_value.is_some());
        if record.requested_size > 1000 {
            assert!(record.shapiro_p_value.is_none());
        } else {
            assert!(record.shapiro_p_value.is_some());
        }
    }
}

#[test]
fn test_shapiro_call_count() {
    let cfg = ExperimentConfig::builder()
        .target_sizes(vec![100, 2000])
        .trials(2)
        .build()
        .unwrap();
    let harness = ExperimentHarness::new(cfg, CountingTests::default()).unwrap();
    harness.run().unwrap();

    // six streams, two trials, only the size-100 tier
    let calls = harness.tests().shapiro_calls.load(Ordering::Relaxed);
    assert_eq!(calls, 12);
}

#[test]
fn test_failing_collaborator_yields_missing_values() {
    let harness = ExperimentHarness::new(config(vec![100], 3, 4), FailingTests).unwrap();
    let report = harness.run().unwrap();

    assert_eq!(report.table.len(), 18);
    for agg in &report.aggregates {
        assert!(agg.all_missing());
        assert!(agg.mean_ks_p_value.is_none());
        assert!(agg.mean_shapiro_p_value.is_none());
        assert!(agg.mean_produced_length > 0.0);
    }
}

#[test]
fn test_ks_mostly_accepts_generators() {
    let harness = ExperimentHarness::new(config(vec![1000], 20, 77), ClassicalTests).unwrap();
    let report = harness.run().unwrap();

    for agg in &report.aggregates {
        assert!(
            agg.ks_rejections <= 6,
            "{} rejected {} of 20",
            agg.series,
            agg.ks_rejections
        );
        assert!(agg.mean_ks_p_value.unwrap() > 0.2);
        assert!((agg.observed_acceptance - agg.theoretical_acceptance).abs() < 0.05);
    }
}

#[test]
fn test_report_outputs() {
    let harness = ExperimentHarness::new(config(vec![100], 2, 12), ClassicalTests).unwrap();
    let report = harness.run().unwrap();

    let table = report.render(OutputFormat::Table).unwrap();
    assert!(table.contains("Marsaglia polar z2"));
    assert!(table.contains("Generic rejection"));

    let json: serde_json::Value =
        serde_json::from_str(&report.render(OutputFormat::Json).unwrap()).unwrap();
    assert_eq!(json["aggregates"].as_array().unwrap().len(), 6);
    assert_eq!(json["timings"].as_array().unwrap().len(), 4);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");
    report
        .write_csv(std::fs::File::create(&path).unwrap())
        .unwrap();
    let csv = std::fs::read_to_string(&path).unwrap();
    assert_eq!(csv.lines().count(), 7);
}

#[test]
fn test_degenerate_streams_skip_tests() {
    let harness = ExperimentHarness::new(config(vec![1], 200, 3), NonEmptyTests::default())
        .unwrap();
    let report = harness.run().unwrap();

    let mut degenerate = 0;
    for record in report.table.iter() {
        if record.produced_length == 0 {
            degenerate += 1;
            assert!(record.is_degenerate());
            assert!(record.ks_p_value.is_none());
            assert!(record.shapiro_p_value.is_none());
            assert!(record.sample_mean.is_none());
        } else {
            assert_eq!(record.ks_p_value, Some(0.5));
        }
    }

    // one KS call per non-empty stream
    let calls = harness.tests().ks_calls.load(Ordering::Relaxed);
    assert_eq!(calls, report.table.len() - degenerate);

    for agg in &report.aggregates {
        assert_eq!(agg.trials, 200);
        assert_eq!(agg.ks_missing, agg.degenerate_trials);
        match agg.series.algorithm {
            Algorithm::BoxMuller => assert_eq!(agg.degenerate_trials, 0),
            _ => {
                assert!(agg.degenerate_trials > 0, "{} never came out empty", agg.series);
                assert!(agg.mean_produced_length < 1.0);
            }
        }
    }
}
