//! Amplitude quantizer.
//!
//! Maps a raw channel amplitude onto one of a fixed number of equal-width bins.

use crate::error::{EmgError, Result};
use crate::types::{Amplitude, Level};

/// Linear partition of an amplitude range into `levels` bins.
///
/// Amplitudes above the maximum are clamped to it; amplitudes at or below the
/// minimum fall into bin 0. A value exactly on a bin edge belongs to the lower bin.
/// Edges are computed in `f32`, matching the precision the recordings were binned at.
///
/// # Example
///
/// ```rust
/// use hdemg::encoders::AmplitudeQuantizer;
///
/// let q = AmplitudeQuantizer::new(0.0, 20.0, 10).unwrap();
///
/// assert_eq!(q.quantize(0.0), 0);
/// assert_eq!(q.quantize(2.0), 0);   // upper edge of bin 0
/// assert_eq!(q.quantize(2.1), 1);
/// assert_eq!(q.quantize(20.0), 9);
/// assert_eq!(q.quantize(25.0), 9);  // clamped
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmplitudeQuantizer {
    minimum: f32,
    maximum: f32,
    levels: usize,
    step: f32,
}

impl AmplitudeQuantizer {
    /// Creates a quantizer over `[minimum, maximum]` with `levels` bins.
    ///
    /// # Errors
    ///
    /// Returns an error if `levels` is zero or the range is empty.
    pub fn new(minimum: f32, maximum: f32, levels: usize) -> Result<Self> {
        if levels == 0 {
            return Err(EmgError::InvalidParameter {
                name: "levels",
                message: "Must be > 0".to_string(),
            });
        }

        if minimum.is_nan() || maximum.is_nan() || maximum <= minimum {
            return Err(EmgError::InvalidParameter {
                name: "amplitude_range",
                message: format!("Maximum ({maximum}) must be greater than minimum ({minimum})"),
            });
        }

        Ok(Self {
            minimum,
            maximum,
            levels,
            step: (maximum - minimum) / levels as f32,
        })
    }

    /// Number of bins.
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Lower and upper bound of the amplitude range.
    pub fn range(&self) -> (f32, f32) {
        (self.minimum, self.maximum)
    }

    /// Returns the bin of `amplitude`, always in `[0, levels)`.
    ///
    /// # Panics
    ///
    /// Never in practice: the clamp guarantees the top bin matches. A miss would mean
    /// the partition itself is broken.
    pub fn quantize(&self, amplitude: Amplitude) -> Level {
        // Some recordings slightly exceed the nominal maximum.
        let amp = (amplitude as f32).min(self.maximum);

        for i in 0..self.levels {
            let top = if i + 1 == self.levels {
                self.maximum
            } else {
                self.minimum + self.step * (i + 1) as f32
            };
            if amp <= top {
                return i;
            }
        }

        unreachable!("amplitude {amp} matched no quantization bin")
    }
}
