//! # Uniform Source
//!
//! Seeded randomness shared by every generator in the crate.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: one `u64` seed determines an entire experiment run
//! - **Monotonic consumption**: each draw advances the stream; nothing is
//!   replayed or rewound
//! - **Static dispatch**: a concrete `StdRng` wrapper, no trait objects in
//!   the sampling loops
//!
//! ## Usage Example
//!
//! ```rust
//! use variate_core::rng::UniformSource;
//!
//! let mut source = UniformSource::from_seed(2024);
//!
//! let uniforms = source.draw(100);
//! let exponentials = source.draw_exponential(100);
//! let reference = source.draw_normal(100);
//!
//! assert_eq!(uniforms.len() + exponentials.len() + reference.len(), 300);
//! ```

mod source;

pub use source::UniformSource;
