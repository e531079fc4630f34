//! # variate_core: Normal Variate Generators
//!
//! ## Core Layer Role
//!
//! variate_core is the bottom layer of the workspace, providing:
//! - A seeded uniform source (`rng::UniformSource`)
//! - Validated generator parameters (`GeneratorParameters`)
//! - Four normal variate generators (`generators`)
//! - The generator error type (`GeneratorError`)
//!
//! ## Zero Dependency Principle
//!
//! The Core layer has no dependencies on other variate_* crates and only
//! minimal external dependencies:
//! - rand / rand_distr: the underlying PRNG and reference normal sampler
//! - thiserror: error derivation
//! - serde: serialisation of identifiers (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use variate_core::generators::{Algorithm, Stream};
//! use variate_core::rng::UniformSource;
//! use variate_core::GeneratorParameters;
//!
//! let mut source = UniformSource::from_seed(7);
//! let params = GeneratorParameters::new(100, 0.0, 1.0).unwrap();
//!
//! let batch = Algorithm::BoxMuller.generate(&params, &mut source).unwrap();
//! assert_eq!(batch.len(), 200);
//!
//! let streams = batch.streams();
//! assert_eq!(streams[0].0, Stream::First);
//! assert_eq!(streams[0].1.len(), 100);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: serialisation for `Algorithm`, `Stream` and `SeriesId`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod generators;
pub mod params;
pub mod rng;

pub use error::GeneratorError;
pub use params::GeneratorParameters;
