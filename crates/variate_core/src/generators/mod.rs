//! # Normal Variate Generators
//!
//! Four independent algorithms turning uniform draws into normal variates:
//!
//! | Algorithm | Proposals | Output | Acceptance |
//! |-----------|-----------|--------|------------|
//! | [`BoxMuller`] | `n` uniform pairs | `2n` (paired) | 1 |
//! | [`PolarRejection`] | `n` exponential pairs | `k <= n` | `sqrt(pi / 2e)` |
//! | [`GenericRejection`] | `n` (uniform, exponential) pairs | `k <= n` | `sqrt(pi / 2e)` |
//! | [`MarsagliaPolar`] | `n` points in the square | `2k <= 2n` (paired) | `pi / 4` |
//!
//! Generators share nothing but the [`UniformSource`] they draw from. Static
//! dispatch goes through the [`Algorithm`] enum.
//!
//! ## Usage Example
//!
//! ```rust
//! use variate_core::generators::Algorithm;
//! use variate_core::rng::UniformSource;
//! use variate_core::GeneratorParameters;
//!
//! let mut source = UniformSource::from_seed(42);
//! let params = GeneratorParameters::new(1000, 0.0, 1.0).unwrap();
//!
//! for algorithm in Algorithm::all() {
//!     let batch = algorithm.generate(&params, &mut source).unwrap();
//!     assert!(batch.len() <= 2 * params.n());
//! }
//! ```

mod batch;
mod box_muller;
mod generic_rejection;
mod marsaglia_polar;
mod polar_rejection;

pub use batch::{BatchLayout, Stream, VariateBatch};
pub use box_muller::{box_muller, BoxMuller};
pub use generic_rejection::{generic_rejection, GenericRejection};
pub use marsaglia_polar::{marsaglia_polar, MarsagliaPolar};
pub use polar_rejection::{polar_rejection, PolarRejection};

use crate::error::GeneratorError;
use crate::params::GeneratorParameters;
use crate::rng::UniformSource;
use std::f64::consts::{E, PI};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A normal variate generator.
///
/// Implementations validate `params` before drawing anything, so a failed
/// call leaves the source untouched.
pub trait NormalGenerator {
    /// Produces one batch of variates distributed as `N(mu, sigma^2)`.
    fn generate(
        &self,
        params: &GeneratorParameters,
        source: &mut UniformSource,
    ) -> Result<VariateBatch, GeneratorError>;
}

/// Maps a uniform draw to a sign via `sign(2u - 1)`.
///
/// The exact midpoint `u = 0.5` maps to 0. It has probability zero under
/// continuous draws and is kept rather than resampled.
#[inline]
pub fn random_sign(u: f64) -> f64 {
    let centred = 2.0 * u - 1.0;
    if centred > 0.0 {
        1.0
    } else if centred < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Generator selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Algorithm {
    /// Box–Muller transform.
    BoxMuller,
    /// Exponential-pair rejection, single stream.
    PolarRejection,
    /// `sqrt(e)`-scaled exponential envelope, single stream.
    GenericRejection,
    /// Marsaglia polar method, paired output.
    MarsagliaPolar,
}

impl Algorithm {
    /// All algorithms in reporting order.
    pub fn all() -> [Self; 4] {
        [
            Self::BoxMuller,
            Self::PolarRejection,
            Self::GenericRejection,
            Self::MarsagliaPolar,
        ]
    }

    /// Stable identifier used in configuration files and CLI flags.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BoxMuller => "box-muller",
            Self::PolarRejection => "polar-rejection",
            Self::GenericRejection => "generic-rejection",
            Self::MarsagliaPolar => "marsaglia-polar",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BoxMuller => "Box-Muller",
            Self::PolarRejection => "Polar rejection",
            Self::GenericRejection => "Generic rejection",
            Self::MarsagliaPolar => "Marsaglia polar",
        }
    }

    /// Output arrangement of this algorithm's batches.
    pub fn layout(&self) -> BatchLayout {
        match self {
            Self::BoxMuller | Self::MarsagliaPolar => BatchLayout::Paired,
            Self::PolarRejection | Self::GenericRejection => BatchLayout::Single,
        }
    }

    /// Long-run fraction of proposals accepted.
    ///
    /// Both half-normal samplers accept with probability
    /// `E[exp(-(Y - 1)^2 / 2)] = sqrt(pi / (2e))` for `Y ~ Exp(1)`.
    pub fn theoretical_acceptance(&self) -> f64 {
        match self {
            Self::BoxMuller => 1.0,
            Self::PolarRejection | Self::GenericRejection => (PI / (2.0 * E)).sqrt(),
            Self::MarsagliaPolar => PI / 4.0,
        }
    }

    /// Series produced by one invocation of this algorithm.
    pub fn series(&self) -> Vec<SeriesId> {
        let streams: &[Stream] = match self.layout() {
            BatchLayout::Single => &[Stream::Single],
            BatchLayout::Paired => &[Stream::First, Stream::Second],
        };
        streams
            .iter()
            .map(|&stream| SeriesId::new(*self, stream))
            .collect()
    }

    /// Dispatches to the matching generator.
    pub fn generate(
        &self,
        params: &GeneratorParameters,
        source: &mut UniformSource,
    ) -> Result<VariateBatch, GeneratorError> {
        match self {
            Self::BoxMuller => BoxMuller.generate(params, source),
            Self::PolarRejection => PolarRejection.generate(params, source),
            Self::GenericRejection => GenericRejection.generate(params, source),
            Self::MarsagliaPolar => MarsagliaPolar.generate(params, source),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase().replace('_', "-");
        Self::all()
            .into_iter()
            .find(|algorithm| algorithm.name() == normalised)
            .ok_or_else(|| {
                GeneratorError::invalid(
                    "algorithm",
                    format!(
                        "unknown algorithm '{}'. Supported: box-muller, polar-rejection, \
                         generic-rejection, marsaglia-polar",
                        s
                    ),
                )
            })
    }
}

/// One derived output series: an algorithm plus one of its streams.
///
/// Box–Muller and Marsaglia each contribute two series, the rejection
/// samplers one each, for six in total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeriesId {
    /// Producing algorithm.
    pub algorithm: Algorithm,
    /// Stream within the algorithm's batch.
    pub stream: Stream,
}

impl SeriesId {
    /// Create a new series identifier.
    pub fn new(algorithm: Algorithm, stream: Stream) -> Self {
        Self { algorithm, stream }
    }

    /// All six series in reporting order.
    pub fn all() -> Vec<Self> {
        Algorithm::all().iter().flat_map(Algorithm::series).collect()
    }

    /// Label such as `Box-Muller z1` or `Polar rejection`.
    pub fn label(&self) -> String {
        match self.stream {
            Stream::Single => self.algorithm.label().to_string(),
            stream => format!("{} {}", self.algorithm.label(), stream.suffix()),
        }
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stream {
            Stream::Single => f.write_str(self.algorithm.name()),
            stream => write!(f, "{}/{}", self.algorithm.name(), stream.suffix()),
        }
    }
}
