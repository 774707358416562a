//! Encoders for converting EMG samples into hypervectors.
//!
//! # Available Encoders
//!
//! - [`AmplitudeQuantizer`]: Maps a raw amplitude onto a discrete level
//! - [`EmgEncoder`]: Spatial (per sample) and temporal (n-gram) hypervector encoding
//!
//! # Example
//!
//! ```rust
//! use hdemg::encoders::{EmgEncoder, EmgEncoderParams, Encoder};
//! use hdemg::hypervector::{ContinuousItemMemory, FloatHypervector, ItemMemory};
//! use hdemg::types::{Sequence, CHANNELS};
//! use hdemg::utils::Random;
//!
//! let mut rng = Random::new(0);
//! let idm = ItemMemory::<FloatHypervector>::new(CHANNELS, 256, &mut rng);
//! let cim = ContinuousItemMemory::<FloatHypervector>::new(10, 256, &mut rng);
//! let encoder = EmgEncoder::new(EmgEncoderParams::default(), &idm, &cim).unwrap();
//!
//! let seq = Sequence::new(vec![[3.0, 6.0, 9.0, 12.0]], vec![1]).unwrap();
//! let hv = encoder.encode(0, &seq).unwrap();
//! assert_eq!(hv.components().len(), 256);
//! ```

mod base;
mod emg;
mod quantizer;

pub use base::Encoder;
pub use emg::{EmgEncoder, EmgEncoderParams, EncodingMode};
pub use quantizer::AmplitudeQuantizer;
