//! Effective configuration for a CLI invocation.
//!
//! Precedence, lowest first: built-in defaults, the TOML file (if present),
//! `VARIATE_*` environment variables, command-line flags.

use crate::Result;
use std::path::Path;
use variate_core::generators::Algorithm;
use variate_experiment::ExperimentConfig;

/// Values given on the command line. Empty or `None` means "not given".
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub trials: Option<usize>,
    pub sizes: Vec<usize>,
    pub alpha: Option<f64>,
    pub algorithms: Vec<Algorithm>,
    pub parallel: bool,
}

impl Overrides {
    /// Applies the given flags on top of `config`.
    pub fn apply(&self, mut config: ExperimentConfig) -> ExperimentConfig {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if !self.sizes.is_empty() {
            config.target_sizes = self.sizes.clone();
        }
        if let Some(alpha) = self.alpha {
            config.significance = alpha;
        }
        if !self.algorithms.is_empty() {
            config.algorithms = self.algorithms.clone();
        }
        if self.parallel {
            config.parallel = true;
        }
        config
    }
}

/// Loads, overrides and validates the configuration at `path`.
pub fn load(path: &Path, overrides: &Overrides) -> Result<ExperimentConfig> {
    let config = ExperimentConfig::load_or_default(path)?.with_env_override()?;
    let config = overrides.apply(config);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "target_sizes = [10, 20]\ntrials = 7\nseed = 3").unwrap();

        let overrides = Overrides {
            seed: Some(99),
            algorithms: vec![Algorithm::MarsagliaPolar],
            ..Overrides::default()
        };
        let config = load(file.path(), &overrides).unwrap();

        assert_eq!(config.target_sizes, vec![10, 20]);
        assert_eq!(config.trials, 7);
        assert_eq!(config.seed, 99);
        assert_eq!(config.algorithms, vec![Algorithm::MarsagliaPolar]);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = Overrides {
            sizes: vec![100],
            ..Overrides::default()
        };
        let config = load(&dir.path().join("absent.toml"), &overrides).unwrap();

        assert_eq!(config.target_sizes, vec![100]);
        assert_eq!(config.algorithms.len(), 4);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = Overrides {
            alpha: Some(1.5),
            ..Overrides::default()
        };
        assert!(load(&dir.path().join("absent.toml"), &overrides).is_err());
    }
}
