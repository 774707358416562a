//! EMG hypervector encoder.
//!
//! Encodes one sample (spatial) or a window of consecutive samples (temporal
//! n-gram) of a multi-channel recording into a single hypervector.

use crate::encoders::{AmplitudeQuantizer, Encoder};
use crate::error::{EmgError, Result};
use crate::hypervector::{max_levels, ContinuousItemMemory, Hypervector, ItemMemory};
use crate::types::{Sample, Sequence, CHANNELS};
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a window of samples is composed into one hypervector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EncodingMode {
    /// Bundle every channel binding of every sample in the window.
    #[default]
    Spatial,
    /// Permute each sample's spatial bundle by its offset, then bind across the window.
    Temporal,
}

impl std::fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodingMode::Spatial => write!(f, "SPATIAL"),
            EncodingMode::Temporal => write!(f, "TEMPORAL"),
        }
    }
}

impl std::str::FromStr for EncodingMode {
    type Err = EmgError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "SPATIAL" => Ok(EncodingMode::Spatial),
            "TEMPORAL" => Ok(EncodingMode::Temporal),
            _ => Err(EmgError::InvalidParameter {
                name: "mode",
                message: format!("Unknown encoding mode '{s}'. Expected: SPATIAL, TEMPORAL"),
            }),
        }
    }
}

/// Parameters for creating an EMG encoder.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmgEncoderParams {
    /// Number of amplitude quantization levels.
    pub levels: usize,

    /// Number of consecutive samples per encoded window.
    pub n_grams: usize,

    /// Composition of the samples in a window.
    pub mode: EncodingMode,

    /// Amplitude range split by the quantizer.
    pub amplitude_range: (f32, f32),
}

impl Default for EmgEncoderParams {
    fn default() -> Self {
        Self {
            levels: 10,
            n_grams: 1,
            mode: EncodingMode::Spatial,
            amplitude_range: (0.0, 20.0),
        }
    }
}

/// Encodes EMG windows into hypervectors using two item memories.
///
/// Each channel amplitude is quantized, the channel vector is bound to the level
/// vector, and the bindings are bundled across channels. In temporal mode every
/// step of the n-gram is permuted by its position before the steps are bound,
/// which makes the encoding order-sensitive.
///
/// # Example
///
/// ```rust
/// use hdemg::encoders::{EmgEncoder, EmgEncoderParams, EncodingMode, Encoder};
/// use hdemg::hypervector::{BinaryHypervector, ContinuousItemMemory, ItemMemory};
/// use hdemg::types::{Sequence, CHANNELS};
/// use hdemg::utils::Random;
///
/// let mut rng = Random::new(42);
/// let idm = ItemMemory::<BinaryHypervector>::new(CHANNELS, 512, &mut rng);
/// let cim = ContinuousItemMemory::<BinaryHypervector>::new(10, 512, &mut rng);
///
/// let encoder = EmgEncoder::new(
///     EmgEncoderParams { n_grams: 3, mode: EncodingMode::Temporal, ..Default::default() },
///     &idm,
///     &cim,
/// ).unwrap();
///
/// let seq = Sequence::new(vec![[1.0, 5.0, 9.0, 13.0]; 4], vec![1; 4]).unwrap();
/// assert!(encoder.encode(1, &seq).is_ok());
/// assert!(encoder.encode(2, &seq).is_err()); // window would run past the end
/// ```
#[derive(Debug, Clone)]
pub struct EmgEncoder<'a, V> {
    quantizer: AmplitudeQuantizer,
    n_grams: usize,
    mode: EncodingMode,
    channels: &'a ItemMemory<V>,
    levels: &'a ContinuousItemMemory<V>,
}

impl<'a, V: Hypervector> EmgEncoder<'a, V> {
    /// Creates a new EMG encoder over shared item memories.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_grams` is zero, the quantizer parameters are invalid,
    /// or the item memories do not cover every channel and level.
    pub fn new(
        params: EmgEncoderParams,
        channels: &'a ItemMemory<V>,
        levels: &'a ContinuousItemMemory<V>,
    ) -> Result<Self> {
        if params.n_grams == 0 {
            return Err(EmgError::InvalidParameter {
                name: "n_grams",
                message: "Must be > 0".to_string(),
            });
        }

        let (minimum, maximum) = params.amplitude_range;
        let quantizer = AmplitudeQuantizer::new(minimum, maximum, params.levels)?;

        if channels.len() < CHANNELS {
            return Err(EmgError::InvalidParameter {
                name: "channels",
                message: format!(
                    "Item memory holds {} vectors, need one per channel ({CHANNELS})",
                    channels.len()
                ),
            });
        }

        if levels.len() != params.levels {
            return Err(EmgError::InvalidParameter {
                name: "levels",
                message: format!(
                    "Continuous item memory holds {} levels, quantizer uses {}",
                    levels.len(),
                    params.levels
                ),
            });
        }

        if params.levels > max_levels(levels.dim()) {
            return Err(EmgError::InvalidParameter {
                name: "levels",
                message: format!(
                    "{} levels need at least {} dimensions",
                    params.levels,
                    2 * (params.levels - 1)
                ),
            });
        }

        if channels.dim() != levels.dim() {
            return Err(EmgError::InvalidParameter {
                name: "dimensions",
                message: format!(
                    "Item memories disagree on dimensionality: {} vs {}",
                    channels.dim(),
                    levels.dim()
                ),
            });
        }

        Ok(Self {
            quantizer,
            n_grams: params.n_grams,
            mode: params.mode,
            channels,
            levels,
        })
    }

    /// Returns the quantizer.
    pub fn quantizer(&self) -> &AmplitudeQuantizer {
        &self.quantizer
    }

    /// Returns the encoding mode.
    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    /// Returns the n-gram size.
    pub fn n_grams(&self) -> usize {
        self.n_grams
    }

    /// Binds every channel vector to the level vector of its amplitude.
    fn channel_bindings(&self, sample: &Sample) -> Result<SmallVec<[V; CHANNELS]>> {
        sample
            .iter()
            .enumerate()
            .map(|(channel, &amp)| {
                let level = self.quantizer.quantize(amp);
                Ok(self.channels.get(channel)?.bind(self.levels.get(level)?))
            })
            .collect()
    }

    /// Encodes a single sample by bundling its channel bindings.
    ///
    /// # Errors
    ///
    /// Returns an error if an item memory lookup fails.
    pub fn encode_sample(&self, sample: &Sample) -> Result<V> {
        Ok(V::bundle(&self.channel_bindings(sample)?))
    }
}

impl<V: Hypervector> Encoder for EmgEncoder<'_, V> {
    type Output = V;

    fn window(&self) -> usize {
        self.n_grams
    }

    fn encode(&self, start: usize, sequence: &Sequence) -> Result<V> {
        if !self.fits(start, sequence) {
            return Err(EmgError::IndexOutOfBounds {
                index: start + self.n_grams - 1,
                size: sequence.len(),
            });
        }

        let window = &sequence.samples()[start..start + self.n_grams];

        match self.mode {
            EncodingMode::Spatial => {
                let mut bindings = Vec::with_capacity(CHANNELS * self.n_grams);
                for sample in window {
                    bindings.extend(self.channel_bindings(sample)?);
                }
                Ok(V::bundle(&bindings))
            }
            EncodingMode::Temporal => {
                let steps = window
                    .iter()
                    .enumerate()
                    .map(|(offset, sample)| Ok(self.encode_sample(sample)?.permute(offset)))
                    .collect::<Result<Vec<V>>>()?;
                Ok(V::bind_all(&steps))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypervector::{BinaryHypervector, FloatHypervector};
    use crate::utils::Random;

    fn memories<V: Hypervector>(dim: usize) -> (ItemMemory<V>, ContinuousItemMemory<V>) {
        let mut rng = Random::new(42);
        let idm = ItemMemory::new(CHANNELS, dim, &mut rng);
        let cim = ContinuousItemMemory::new(10, dim, &mut rng);
        (idm, cim)
    }

    fn params(n_grams: usize, mode: EncodingMode) -> EmgEncoderParams {
        EmgEncoderParams {
            n_grams,
            mode,
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_params() {
        let (idm, cim) = memories::<BinaryHypervector>(256);
        assert!(EmgEncoder::new(params(0, EncodingMode::Spatial), &idm, &cim).is_err());

        let wrong_levels = EmgEncoderParams {
            levels: 5,
            ..Default::default()
        };
        assert!(EmgEncoder::new(wrong_levels, &idm, &cim).is_err());

        let few = ItemMemory::<BinaryHypervector>::new(2, 256, &mut Random::new(1));
        assert!(EmgEncoder::new(EmgEncoderParams::default(), &few, &cim).is_err());
    }

    #[test]
    fn test_levels_exceeding_dimension() {
        let (idm, cim) = memories::<BinaryHypervector>(16);
        let err = EmgEncoder::new(EmgEncoderParams::default(), &idm, &cim).unwrap_err();
        assert!(matches!(err, EmgError::InvalidParameter { name: "levels", .. }));

        let (idm, cim) = memories::<BinaryHypervector>(18);
        assert!(EmgEncoder::new(EmgEncoderParams::default(), &idm, &cim).is_ok());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("spatial".parse::<EncodingMode>().unwrap(), EncodingMode::Spatial);
        assert_eq!("TEMPORAL".parse::<EncodingMode>().unwrap(), EncodingMode::Temporal);
        assert!("spectral".parse::<EncodingMode>().is_err());
        assert_eq!(EncodingMode::Temporal.to_string(), "TEMPORAL");
    }

    #[test]
    fn test_spatial_matches_manual_bundle() {
        let (idm, cim) = memories::<FloatHypervector>(128);
        let encoder = EmgEncoder::new(EmgEncoderParams::default(), &idm, &cim).unwrap();
        let sample = [0.5, 4.5, 12.0, 30.0];
        let seq = Sequence::new(vec![sample], vec![1]).unwrap();

        let expected = FloatHypervector::bundle(&[
            idm.get(0).unwrap().bind(cim.get(0).unwrap()),
            idm.get(1).unwrap().bind(cim.get(2).unwrap()),
            idm.get(2).unwrap().bind(cim.get(5).unwrap()),
            idm.get(3).unwrap().bind(cim.get(9).unwrap()),
        ]);
        assert_eq!(encoder.encode(0, &seq).unwrap(), expected);
    }

    #[test]
    fn test_temporal_matches_manual_ngram() {
        let (idm, cim) = memories::<FloatHypervector>(128);
        let encoder = EmgEncoder::new(params(2, EncodingMode::Temporal), &idm, &cim).unwrap();
        let a = [1.0, 3.0, 5.0, 7.0];
        let b = [9.0, 11.0, 13.0, 15.0];
        let seq = Sequence::new(vec![a, b], vec![1, 1]).unwrap();

        let first = encoder.encode_sample(&a).unwrap();
        let second = encoder.encode_sample(&b).unwrap().permute(1);
        assert_eq!(encoder.encode(0, &seq).unwrap(), first.bind(&second));
    }

    #[test]
    fn test_deterministic() {
        let (idm, cim) = memories::<BinaryHypervector>(1024);
        let encoder = EmgEncoder::new(params(3, EncodingMode::Temporal), &idm, &cim).unwrap();
        let seq = Sequence::new(
            vec![[2.0, 4.0, 6.0, 8.0], [10.0, 12.0, 14.0, 16.0], [18.0, 1.0, 3.0, 5.0]],
            vec![1, 1, 1],
        )
        .unwrap();
        assert_eq!(encoder.encode(0, &seq).unwrap(), encoder.encode(0, &seq).unwrap());
    }

    #[test]
    fn test_temporal_is_order_sensitive() {
        let (idm, cim) = memories::<BinaryHypervector>(2048);
        let encoder = EmgEncoder::new(params(2, EncodingMode::Temporal), &idm, &cim).unwrap();
        let a = [1.0, 1.0, 1.0, 1.0];
        let b = [19.0, 19.0, 19.0, 19.0];
        let forward = Sequence::new(vec![a, b], vec![1, 1]).unwrap();
        let backward = Sequence::new(vec![b, a], vec![1, 1]).unwrap();

        let f = encoder.encode(0, &forward).unwrap();
        let r = encoder.encode(0, &backward).unwrap();
        assert_ne!(f, r);
        assert!(f.distance(&r) > 0.3);
    }

    #[test]
    fn test_window_past_end() {
        let (idm, cim) = memories::<BinaryHypervector>(256);
        let encoder = EmgEncoder::new(params(4, EncodingMode::Temporal), &idm, &cim).unwrap();
        let seq = Sequence::new(vec![[0.0; 4]; 5], vec![1; 5]).unwrap();
        assert!(encoder.encode(1, &seq).is_ok());
        assert!(matches!(
            encoder.encode(2, &seq),
            Err(EmgError::IndexOutOfBounds { index: 5, size: 5 })
        ));
    }
}
