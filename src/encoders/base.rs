//! Base encoder trait.

use crate::error::Result;
use crate::types::Sequence;

/// Trait for encoders that turn a window of a labelled sequence into one value.
///
/// The trainer and the evaluators only see this trait, so any windowed encoder
/// producing hypervectors can drive them.
pub trait Encoder {
    /// Encoded representation.
    type Output;

    /// Number of consecutive samples consumed by one encoding.
    fn window(&self) -> usize;

    /// Encodes the window starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if the window runs past the end of `sequence`.
    fn encode(&self, start: usize, sequence: &Sequence) -> Result<Self::Output>;

    /// Returns true if a full window fits at `start`.
    fn fits(&self, start: usize, sequence: &Sequence) -> bool {
        start + self.window() <= sequence.len()
    }
}
