//! Check command implementation
//!
//! Prints the effective configuration and the analytic acceptance rates.

use std::path::Path;
use tracing::info;
use variate_core::generators::Algorithm;
use variate_gof::{MAX_SAMPLE_SIZE, MIN_SAMPLE_SIZE};

use crate::config::{self, Overrides};
use crate::Result;

/// Run the check command
pub fn run(config_path: &str) -> Result<()> {
    info!("Checking configuration...");

    let path = Path::new(config_path);
    if path.exists() {
        info!("  Config file: {}", config_path);
    } else {
        info!("  Config file: {} (not found, using defaults)", config_path);
    }

    let config = config::load(path, &Overrides::default())?;

    println!("Seed:              {}", config.seed);
    println!("Target sizes:      {:?}", config.target_sizes);
    println!("Trials:            {}", config.trials);
    println!("Significance:      {}", config.significance);
    println!("Shapiro max size:  {}", config.shapiro_max_size);
    println!("Shapiro range:     [{}, {}]", MIN_SAMPLE_SIZE, MAX_SAMPLE_SIZE);
    println!("Parallel:          {}", config.parallel);
    println!("Invocations:       {}", config.total_invocations());
    println!();
    println!("Theoretical acceptance");
    for algorithm in Algorithm::all() {
        let marker = if config.algorithms.contains(&algorithm) {
            ""
        } else {
            "  (disabled)"
        };
        println!(
            "  {:<18} {:.6}{}",
            algorithm.label(),
            algorithm.theoretical_acceptance(),
            marker
        );
    }

    info!("Configuration is valid");
    Ok(())
}
