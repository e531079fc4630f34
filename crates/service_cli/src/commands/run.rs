//! Run command implementation
//!
//! Executes the repeated-trial experiment and renders the report.

use std::path::Path;
use tracing::{info, warn};
use variate_experiment::{ExperimentHarness, OutputFormat};
use variate_gof::ClassicalTests;

use crate::config::{self, Overrides};
use crate::Result;

/// Run the experiment command
pub fn run(
    config_path: &str,
    overrides: &Overrides,
    format: OutputFormat,
    output: Option<&str>,
) -> Result<()> {
    let config = config::load(Path::new(config_path), overrides)?;
    info!("Running experiment...");
    info!("  Seed: {}", config.seed);
    info!("  Sizes: {:?}", config.target_sizes);
    info!("  Trials: {}", config.trials);
    info!("  Mode: {}", if config.parallel { "parallel" } else { "sequential" });

    let harness = ExperimentHarness::new(config, ClassicalTests)?;
    let report = harness.run()?;

    let degenerate: usize = report.aggregates.iter().map(|a| a.degenerate_trials).sum();
    if degenerate > 0 {
        warn!("{} streams came out empty and have no p-values", degenerate);
    }

    let rendered = report.render(format)?;
    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            info!("Report written to {}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
