//! Variate CLI - Command Line Operations for the Normal Variate Harness
//!
//! This is the operational entry point for the generator experiments.
//!
//! # Commands
//!
//! - `variate run` - Run the repeated-trial experiment and print a report
//! - `variate bench` - Time each generator across the configured sizes
//! - `variate check` - Show the effective configuration and acceptance constants
//!
//! # Architecture
//!
//! As the **S**ervice layer, this crate loads configuration, wires the
//! classical goodness-of-fit tests into the harness and renders output. It
//! holds no numerical logic of its own.

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use variate_core::generators::Algorithm;
use variate_experiment::OutputFormat;

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::Overrides;

/// Normal variate generator experiments
#[derive(Parser)]
#[command(name = "variate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "variate.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by the commands that run generators.
#[derive(clap::Args)]
struct GridArgs {
    /// Seed for the uniform source
    #[arg(long)]
    seed: Option<u64>,

    /// Comma-separated target sizes (e.g. 100,1000)
    #[arg(long, value_delimiter = ',')]
    sizes: Vec<usize>,

    /// Comma-separated algorithms (box-muller, polar-rejection,
    /// generic-rejection, marsaglia-polar)
    #[arg(short, long, value_delimiter = ',')]
    algorithms: Vec<Algorithm>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the repeated-trial experiment
    Run {
        #[command(flatten)]
        grid: GridArgs,

        /// Trials per (algorithm, size)
        #[arg(short, long)]
        trials: Option<usize>,

        /// Significance level for rejection counts
        #[arg(long)]
        alpha: Option<f64>,

        /// Run each (algorithm, size) partition on its own thread
        #[arg(short, long)]
        parallel: bool,

        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Time each generator across the configured sizes
    Bench {
        #[command(flatten)]
        grid: GridArgs,

        /// Timed invocations per (algorithm, size)
        #[arg(short, long, default_value = "20")]
        samples: usize,
    },

    /// Check configuration and print acceptance constants
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Reports go to stdout, logs to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    debug!("Using configuration file {}", cli.config);

    match cli.command {
        Commands::Run {
            grid,
            trials,
            alpha,
            parallel,
            format,
            output,
        } => {
            let overrides = Overrides {
                seed: grid.seed,
                trials,
                sizes: grid.sizes,
                alpha,
                algorithms: grid.algorithms,
                parallel,
            };
            commands::run::run(&cli.config, &overrides, format, output.as_deref())?
        }
        Commands::Bench { grid, samples } => {
            let overrides = Overrides {
                seed: grid.seed,
                sizes: grid.sizes,
                algorithms: grid.algorithms,
                ..Overrides::default()
            };
            commands::bench::run(&cli.config, &overrides, samples)?
        }
        Commands::Check => commands::check::run(&cli.config)?,
    }

    Ok(())
}
