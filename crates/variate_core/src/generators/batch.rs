//! Variable-length generator output.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the values of a [`VariateBatch`] are arranged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BatchLayout {
    /// One stream occupying the whole batch.
    Single,
    /// Two equal-length streams: all first-stream values, then all
    /// second-stream values.
    Paired,
}

/// One output stream within a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Stream {
    /// The only stream of a single-stream generator.
    Single,
    /// First half of a paired batch (`z1`).
    First,
    /// Second half of a paired batch (`z2`).
    Second,
}

impl Stream {
    /// Short suffix used in series labels.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Single => "",
            Self::First => "z1",
            Self::Second => "z2",
        }
    }
}

/// Ordered output of one generator invocation.
///
/// The length is data dependent for the rejection-based generators, so the
/// batch carries it explicitly together with the number of raw proposals
/// the generator requested.
///
/// # Examples
///
/// ```rust
/// use variate_core::generators::{Algorithm, BatchLayout};
/// use variate_core::rng::UniformSource;
/// use variate_core::GeneratorParameters;
///
/// let mut source = UniformSource::from_seed(1);
/// let params = GeneratorParameters::standard(500).unwrap();
/// let batch = Algorithm::MarsagliaPolar.generate(&params, &mut source).unwrap();
///
/// assert_eq!(batch.layout(), BatchLayout::Paired);
/// let (z1, z2) = batch.halves();
/// assert_eq!(z1.len(), z2.len());
/// assert!(batch.len() <= 1000);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct VariateBatch {
    values: Vec<f64>,
    layout: BatchLayout,
    proposals: usize,
}

impl VariateBatch {
    /// Wraps a single stream produced from `proposals` candidate draws.
    pub fn single(values: Vec<f64>, proposals: usize) -> Self {
        Self {
            values,
            layout: BatchLayout::Single,
            proposals,
        }
    }

    /// Concatenates two equal-length streams produced from `proposals`
    /// candidate pairs.
    ///
    /// # Panics
    ///
    /// Panics if the streams differ in length.
    pub fn paired(mut first: Vec<f64>, second: Vec<f64>, proposals: usize) -> Self {
        assert_eq!(
            first.len(),
            second.len(),
            "paired streams must have equal length"
        );
        first.extend_from_slice(&second);
        Self {
            values: first,
            layout: BatchLayout::Paired,
            proposals,
        }
    }

    /// Total number of values across all streams.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the batch holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All values in output order.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the batch, returning its values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Stream arrangement.
    #[inline]
    pub fn layout(&self) -> BatchLayout {
        self.layout
    }

    /// Number of raw candidates (or candidate pairs) requested.
    #[inline]
    pub fn proposals(&self) -> usize {
        self.proposals
    }

    /// Number of accepted candidates.
    ///
    /// Equals the batch length for single streams and half of it for paired
    /// batches, since each accepted pair yields one value per stream.
    pub fn accepted(&self) -> usize {
        match self.layout {
            BatchLayout::Single => self.values.len(),
            BatchLayout::Paired => self.values.len() / 2,
        }
    }

    /// Observed fraction of proposals that were accepted.
    pub fn acceptance_rate(&self) -> f64 {
        if self.proposals == 0 {
            return 0.0;
        }
        self.accepted() as f64 / self.proposals as f64
    }

    /// Splits the batch at its midpoint.
    ///
    /// For single-stream batches the split is purely positional.
    pub fn halves(&self) -> (&[f64], &[f64]) {
        self.values.split_at(self.values.len() / 2)
    }

    /// Streams contained in the batch, in output order.
    pub fn streams(&self) -> Vec<(Stream, &[f64])> {
        match self.layout {
            BatchLayout::Single => vec![(Stream::Single, self.values.as_slice())],
            BatchLayout::Paired => {
                let (first, second) = self.halves();
                vec![(Stream::First, first), (Stream::Second, second)]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_batch() {
        let batch = VariateBatch::single(vec![0.1, -0.2, 0.3], 4);

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.accepted(), 3);
        assert_eq!(batch.acceptance_rate(), 0.75);
        assert_eq!(batch.streams().len(), 1);
        assert_eq!(batch.streams()[0].0, Stream::Single);
    }

    #[test]
    fn test_paired_batch() {
        let batch = VariateBatch::paired(vec![1.0, 2.0], vec![3.0, 4.0], 4);

        assert_eq!(batch.values(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(batch.accepted(), 2);
        assert_eq!(batch.acceptance_rate(), 0.5);

        let streams = batch.streams();
        assert_eq!(streams[0], (Stream::First, &[1.0, 2.0][..]));
        assert_eq!(streams[1], (Stream::Second, &[3.0, 4.0][..]));
    }

    #[test]
    fn test_empty_batch() {
        let batch = VariateBatch::paired(vec![], vec![], 10);

        assert!(batch.is_empty());
        assert_eq!(batch.acceptance_rate(), 0.0);
        let (first, second) = batch.halves();
        assert!(first.is_empty() && second.is_empty());
    }

    #[test]
    #[should_panic(expected = "paired streams must have equal length")]
    fn test_unequal_pairs_panic() {
        let _ = VariateBatch::paired(vec![1.0], vec![], 1);
    }
}
