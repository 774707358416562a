//! Labelled sequences of EMG samples.
//!
//! A [`Sequence`] pairs every sample with the gesture label recorded at the same
//! time step. The two lists always have the same length.

use crate::error::{EmgError, Result};
use crate::types::{Label, Sample};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered samples with a parallel list of labels.
///
/// # Example
///
/// ```rust
/// use hdemg::types::Sequence;
///
/// let seq = Sequence::new(
///     vec![[0.0, 1.0, 2.0, 3.0], [4.0, 5.0, 6.0, 7.0]],
///     vec![1, 2],
/// ).unwrap();
///
/// assert_eq!(seq.len(), 2);
/// assert_eq!(seq.min_label(), Some(1));
/// assert!(Sequence::new(vec![[0.0; 4]], vec![1, 1]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sequence {
    samples: Vec<Sample>,
    labels: Vec<Label>,
}

impl Sequence {
    /// Creates a sequence from samples and their labels.
    ///
    /// # Errors
    ///
    /// Returns [`EmgError::LengthMismatch`] if the lists differ in length.
    pub fn new(samples: Vec<Sample>, labels: Vec<Label>) -> Result<Self> {
        if samples.len() != labels.len() {
            return Err(EmgError::LengthMismatch {
                samples: samples.len(),
                labels: labels.len(),
            });
        }

        Ok(Self { samples, labels })
    }

    /// Number of time steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if the sequence holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All samples in order.
    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// All labels in order.
    #[inline]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Returns the sample at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EmgError::IndexOutOfBounds`] past the end of the sequence.
    pub fn sample(&self, index: usize) -> Result<&Sample> {
        self.samples.get(index).ok_or(EmgError::IndexOutOfBounds {
            index,
            size: self.samples.len(),
        })
    }

    /// Returns the label at `index`, if any.
    #[inline]
    pub fn label(&self, index: usize) -> Option<Label> {
        self.labels.get(index).copied()
    }

    /// Smallest label present, or `None` for an empty sequence.
    pub fn min_label(&self) -> Option<Label> {
        self.labels.iter().copied().min()
    }

    /// Number of window starts that leave room for a full window of `width` samples.
    #[inline]
    pub fn window_count(&self, width: usize) -> usize {
        (self.len() + 1).saturating_sub(width)
    }

    /// Builds a new sequence from the entries at `indices`, in that order.
    pub(crate) fn select(&self, indices: impl IntoIterator<Item = usize>) -> Self {
        let (samples, labels) = indices
            .into_iter()
            .map(|i| (self.samples[i], self.labels[i]))
            .unzip();
        Self { samples, labels }
    }
}
