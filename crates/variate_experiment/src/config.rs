//! Experiment configuration.
//!
//! Handles loading of the harness configuration from TOML files with
//! environment variable overrides, plus a builder for programmatic use.
//! Both paths end in [`ExperimentConfig::validate`].

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use variate_core::generators::Algorithm;

/// Significance threshold used when none is configured.
pub const DEFAULT_SIGNIFICANCE: f64 = 0.05;

/// Largest target size at which Shapiro–Wilk is attempted by default.
pub const DEFAULT_SHAPIRO_MAX_SIZE: usize = 1000;

/// Upper bound on any target size.
pub const MAX_TARGET_SIZE: usize = 100_000_000;

/// Harness configuration.
///
/// # Examples
///
/// ```rust
/// use variate_experiment::ExperimentConfig;
///
/// let config = ExperimentConfig::builder()
///     .target_sizes(vec![100, 1000])
///     .trials(20)
///     .seed(7)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.trials, 20);
/// assert_eq!(config.significance, 0.05);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Requested sample sizes, one tier each.
    #[serde(default = "default_target_sizes")]
    pub target_sizes: Vec<usize>,

    /// Trials per (algorithm, size).
    #[serde(default = "default_trials")]
    pub trials: usize,

    /// p-values at or below this threshold count as rejections.
    #[serde(default = "default_significance")]
    pub significance: f64,

    /// Seed for the shared uniform source.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Shapiro–Wilk is only attempted for target sizes up to this value.
    #[serde(default = "default_shapiro_max_size")]
    pub shapiro_max_size: usize,

    /// Run each (algorithm, size) partition on its own thread.
    #[serde(default)]
    pub parallel: bool,

    /// Algorithms to exercise.
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<Algorithm>,
}

fn default_target_sizes() -> Vec<usize> {
    vec![100, 1_000, 10_000, 100_000]
}

fn default_trials() -> usize {
    100
}

fn default_significance() -> f64 {
    DEFAULT_SIGNIFICANCE
}

fn default_seed() -> u64 {
    42
}

fn default_shapiro_max_size() -> usize {
    DEFAULT_SHAPIRO_MAX_SIZE
}

fn default_algorithms() -> Vec<Algorithm> {
    Algorithm::all().to_vec()
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            target_sizes: default_target_sizes(),
            trials: default_trials(),
            significance: default_significance(),
            seed: default_seed(),
            shapiro_max_size: default_shapiro_max_size(),
            parallel: false,
            algorithms: default_algorithms(),
        }
    }
}

impl ExperimentConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ExperimentConfigBuilder {
        ExperimentConfigBuilder::default()
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Load from file if it exists, otherwise start from defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides from the process environment.
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Recognised keys: `VARIATE_SEED`, `VARIATE_TRIALS`, `VARIATE_SIZES`
    /// (comma separated), `VARIATE_ALPHA`, `VARIATE_PARALLEL`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup("VARIATE_SEED") {
            self.seed = parse_value("VARIATE_SEED", &seed)?;
        }

        if let Some(trials) = lookup("VARIATE_TRIALS") {
            self.trials = parse_value("VARIATE_TRIALS", &trials)?;
        }

        if let Some(sizes) = lookup("VARIATE_SIZES") {
            self.target_sizes = sizes
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| parse_value("VARIATE_SIZES", s))
                .collect::<Result<_, _>>()?;
        }

        if let Some(alpha) = lookup("VARIATE_ALPHA") {
            self.significance = parse_value("VARIATE_ALPHA", &alpha)?;
        }

        if let Some(parallel) = lookup("VARIATE_PARALLEL") {
            self.parallel = match parallel.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::Parse(format!(
                        "VARIATE_PARALLEL='{}': expected true or false",
                        parallel
                    )))
                }
            };
        }

        Ok(self)
    }

    /// Validate the configuration, collecting every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.target_sizes.is_empty() {
            errors.push("target_sizes cannot be empty".to_string());
        }
        for &size in &self.target_sizes {
            if size == 0 || size > MAX_TARGET_SIZE {
                errors.push(format!(
                    "target size {} outside range [1, {}]",
                    size, MAX_TARGET_SIZE
                ));
            }
        }

        if self.trials == 0 {
            errors.push("trials must be greater than 0".to_string());
        }

        if !(self.significance > 0.0 && self.significance < 1.0) {
            errors.push(format!(
                "significance {} must lie strictly between 0 and 1",
                self.significance
            ));
        }

        if self.algorithms.is_empty() {
            errors.push("algorithms cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load configuration from file, apply environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?.with_env_override()?;
        config.validate()?;
        Ok(config)
    }

    /// Whether Shapiro–Wilk is attempted at `size`.
    pub fn shapiro_applies(&self, size: usize) -> bool {
        size <= self.shapiro_max_size
    }

    /// Total generator invocations a run performs.
    pub fn total_invocations(&self) -> usize {
        self.target_sizes.len() * self.algorithms.len() * self.trials
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ConfigError::Parse(format!("{}='{}': {}", key, raw, e)))
}

/// Builder for [`ExperimentConfig`].
///
/// Unset fields fall back to the defaults of [`ExperimentConfig::default`].
#[derive(Clone, Debug, Default)]
pub struct ExperimentConfigBuilder {
    target_sizes: Option<Vec<usize>>,
    trials: Option<usize>,
    significance: Option<f64>,
    seed: Option<u64>,
    shapiro_max_size: Option<usize>,
    parallel: bool,
    algorithms: Option<Vec<Algorithm>>,
}

impl ExperimentConfigBuilder {
    /// Sets the target sample sizes.
    pub fn target_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.target_sizes = Some(sizes);
        self
    }

    /// Sets the number of trials per (algorithm, size).
    pub fn trials(mut self, trials: usize) -> Self {
        self.trials = Some(trials);
        self
    }

    /// Sets the significance threshold.
    pub fn significance(mut self, alpha: f64) -> Self {
        self.significance = Some(alpha);
        self
    }

    /// Sets the seed for reproducibility.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the largest size at which Shapiro–Wilk is attempted.
    pub fn shapiro_max_size(mut self, size: usize) -> Self {
        self.shapiro_max_size = Some(size);
        self
    }

    /// Enables partition-parallel execution.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Restricts the run to the given algorithms.
    pub fn algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = Some(algorithms);
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<ExperimentConfig, ConfigError> {
        let defaults = ExperimentConfig::default();
        let config = ExperimentConfig {
            target_sizes: self.target_sizes.unwrap_or(defaults.target_sizes),
            trials: self.trials.unwrap_or(defaults.trials),
            significance: self.significance.unwrap_or(defaults.significance),
            seed: self.seed.unwrap_or(defaults.seed),
            shapiro_max_size: self.shapiro_max_size.unwrap_or(defaults.shapiro_max_size),
            parallel: self.parallel,
            algorithms: self.algorithms.unwrap_or(defaults.algorithms),
        };

        config.validate()?;
        Ok(config)
    }
}
