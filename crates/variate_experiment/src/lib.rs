//! # variate_experiment: Repeated-Trial Validation Harness
//!
//! ## Experiment Layer Role
//!
//! variate_experiment sits on top of the generator and collaborator layers,
//! providing:
//! - Run configuration with TOML loading and environment overrides (`config`)
//! - The trial driver, sequential or rayon-parallel (`harness`)
//! - Per-trial records and the append-only result table (`record`, `aggregate`)
//! - Elapsed-time summaries and a standalone benchmark sweep (`timing`, `bench`)
//! - Table, JSON and CSV reports (`report`)
//!
//! ## Usage Example
//!
//! ```rust
//! use variate_experiment::{ExperimentConfig, ExperimentHarness};
//! use variate_gof::ClassicalTests;
//!
//! let config = ExperimentConfig::builder()
//!     .target_sizes(vec![100])
//!     .trials(5)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! let harness = ExperimentHarness::new(config, ClassicalTests).unwrap();
//! let report = harness.run().unwrap();
//!
//! // four algorithms yield six series
//! assert_eq!(report.aggregates.len(), 6);
//! println!("{}", report.render_table());
//! ```

#![deny(missing_docs)]

pub mod aggregate;
pub mod bench;
pub mod config;
pub mod error;
pub mod harness;
pub mod record;
pub mod report;
pub mod timing;

pub use aggregate::{AggregateResult, ResultTable};
pub use config::{ExperimentConfig, ExperimentConfigBuilder};
pub use error::{ConfigError, ExperimentError};
pub use harness::ExperimentHarness;
pub use record::TrialRecord;
pub use report::{ExperimentReport, OutputFormat};
pub use timing::{TimingSummary, TimingTable};
