//! Rendering of experiment results.
//!
//! An [`ExperimentReport`] bundles the configuration, the raw result table,
//! the derived aggregates and the timing summaries of one run, and renders
//! them as a terminal table, JSON or CSV.

use crate::aggregate::{AggregateResult, ResultTable};
use crate::config::ExperimentConfig;
use crate::error::ExperimentError;
use crate::timing::{TimingSummary, TimingTable};
use chrono::Utc;
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::io;
use std::str::FromStr;

/// Output format for a report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Box-drawn terminal table.
    #[default]
    Table,
    /// Pretty-printed JSON document.
    Json,
    /// One CSV row per aggregate.
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ExperimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(ExperimentError::serialisation(format!(
                "unknown output format '{}'. Supported: table, json, csv",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}

/// Results of one harness run.
#[derive(Clone, Debug)]
pub struct ExperimentReport {
    /// Configuration the run used.
    pub config: ExperimentConfig,
    /// Every trial record.
    pub table: ResultTable,
    /// Aggregates derived from `table`, in table order.
    pub aggregates: Vec<AggregateResult>,
    /// Timing per (algorithm, size).
    pub timings: Vec<TimingSummary>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    seed: u64,
    config: &'a ExperimentConfig,
    aggregates: &'a [AggregateResult],
    timings: &'a [TimingSummary],
}

#[derive(Serialize)]
struct CsvRow {
    series: String,
    target_size: usize,
    trials: usize,
    mean_produced_length: f64,
    degenerate_trials: usize,
    observed_acceptance: f64,
    theoretical_acceptance: f64,
    mean_ks_p_value: Option<f64>,
    ks_rejections: usize,
    mean_shapiro_p_value: Option<f64>,
    shapiro_rejections: usize,
    mean_sample_mean: Option<f64>,
    mean_sample_std_dev: Option<f64>,
}

impl From<&AggregateResult> for CsvRow {
    fn from(agg: &AggregateResult) -> Self {
        Self {
            series: agg.series.to_string(),
            target_size: agg.target_size,
            trials: agg.trials,
            mean_produced_length: agg.mean_produced_length,
            degenerate_trials: agg.degenerate_trials,
            observed_acceptance: agg.observed_acceptance,
            theoretical_acceptance: agg.theoretical_acceptance,
            mean_ks_p_value: agg.mean_ks_p_value,
            ks_rejections: agg.ks_rejections,
            mean_shapiro_p_value: agg.mean_shapiro_p_value,
            shapiro_rejections: agg.shapiro_rejections,
            mean_sample_mean: agg.mean_sample_mean,
            mean_sample_std_dev: agg.mean_sample_std_dev,
        }
    }
}

const COLUMNS: [(&str, usize); 9] = [
    ("Series", 22),
    ("n", 8),
    ("Mean len", 11),
    ("Accept", 15),
    ("KS p", 8),
    ("KS rej", 7),
    ("SW p", 8),
    ("SW rej", 7),
    ("Mean / SD", 17),
];

impl ExperimentReport {
    /// Builds a report, deriving aggregates at the configured significance.
    pub fn new(config: ExperimentConfig, table: ResultTable, timings: TimingTable) -> Self {
        let aggregates = table.aggregate(config.significance);
        Self {
            config,
            table,
            aggregates,
            timings: timings.summaries(),
        }
    }

    /// Renders the report in `format`.
    pub fn render(&self, format: OutputFormat) -> Result<String, ExperimentError> {
        match format {
            OutputFormat::Table => Ok(self.render_table()),
            OutputFormat::Json => self.to_json(),
            OutputFormat::Csv => {
                let mut buffer = Vec::new();
                self.write_csv(&mut buffer)?;
                String::from_utf8(buffer).map_err(|e| ExperimentError::serialisation(e.to_string()))
            }
        }
    }

    /// Box-drawn table of the aggregates followed by the timing summary.
    ///
    /// Missing means print as `n/a`.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let rule = |left: char, mid: char, right: char| {
            let mut line = String::new();
            line.push(left);
            for (i, (_, width)) in COLUMNS.iter().enumerate() {
                line.push_str(&"─".repeat(width + 2));
                line.push(if i + 1 == COLUMNS.len() { right } else { mid });
            }
            line
        };

        let _ = writeln!(
            out,
            "Seed {}  trials {}  α = {}",
            self.config.seed, self.config.trials, self.config.significance
        );
        let _ = writeln!(out, "{}", rule('┌', '┬', '┐'));
        let header: Vec<String> = COLUMNS.iter().map(|(h, _)| h.to_string()).collect();
        let _ = writeln!(out, "{}", table_row(&header));
        let _ = writeln!(out, "{}", rule('├', '┼', '┤'));

        for agg in &self.aggregates {
            let cells = vec![
                agg.series.label(),
                agg.target_size.to_string(),
                format!("{:.1}", agg.mean_produced_length),
                format!(
                    "{:.4}/{:.4}",
                    agg.observed_acceptance, agg.theoretical_acceptance
                ),
                fmt_opt(agg.mean_ks_p_value, 4),
                agg.ks_rejections.to_string(),
                fmt_opt(agg.mean_shapiro_p_value, 4),
                agg.shapiro_rejections.to_string(),
                format!(
                    "{}/{}",
                    fmt_opt(agg.mean_sample_mean, 3),
                    fmt_opt(agg.mean_sample_std_dev, 3)
                ),
            ];
            let _ = writeln!(out, "{}", table_row(&cells));
        }
        let _ = writeln!(out, "{}", rule('└', '┴', '┘'));

        if !self.timings.is_empty() {
            let _ = writeln!(out, "\nTiming (median per invocation)");
            for timing in &self.timings {
                let _ = writeln!(
                    out,
                    "  {:<18} n={:<8} median {:>10.1} µs  mean {:>10.1} µs  sd {:>8.1} µs",
                    timing.algorithm.label(),
                    timing.target_size,
                    timing.median * 1e6,
                    timing.mean * 1e6,
                    timing.std_dev * 1e6
                );
            }
        }

        out
    }

    /// Pretty JSON with a UTC generation timestamp.
    pub fn to_json(&self) -> Result<String, ExperimentError> {
        let doc = JsonReport {
            generated_at: Utc::now().to_rfc3339(),
            seed: self.config.seed,
            config: &self.config,
            aggregates: &self.aggregates,
            timings: &self.timings,
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Writes one CSV row per aggregate, with a header row.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), ExperimentError> {
        let mut csv = csv::Writer::from_writer(writer);
        for agg in &self.aggregates {
            csv.serialize(CsvRow::from(agg))?;
        }
        csv.flush()?;
        Ok(())
    }
}

fn table_row(cells: &[String]) -> String {
    let mut line = String::from("│");
    for (cell, (_, width)) in cells.iter().zip(COLUMNS.iter()) {
        let _ = write!(line, " {:<width$} │", cell, width = *width);
    }
    line
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "n/a".to_string(),
    }
}
