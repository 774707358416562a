//! # hdemg - Hyperdimensional EMG gesture classification
//!
//! hdemg classifies windows of multi-channel electromyography (EMG) signals into
//! hand-gesture labels using Hyperdimensional Computing (HDC).
//!
//! ## Overview
//!
//! Raw amplitudes are mapped into very high-dimensional vectors through item-memory
//! lookups and algebraic binding/bundling, then classified by nearest-neighbour search
//! against one prototype hypervector per gesture class. The main components are:
//!
//! - **Hypervectors**: binary, integer and float representations behind one algebra trait
//! - **Item Memories**: per-channel and per-amplitude-level codebooks
//! - **Encoders**: amplitude quantization plus spatial and temporal (n-gram) encoding
//! - **Associative Memory**: class-wise bundling of training windows and prototype search
//! - **Evaluation**: whole-sequence accuracy and run-level slicing accuracy
//!
//! ## Quick Start
//!
//! ```rust
//! use hdemg::prelude::*;
//!
//! let samples = vec![[1.0, 2.0, 3.0, 4.0]; 6]
//!     .into_iter()
//!     .chain(vec![[15.0, 12.0, 9.0, 18.0]; 6])
//!     .collect();
//! let labels = vec![1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2];
//! let sequence = Sequence::new(samples, labels).unwrap();
//!
//! let mut rng = Random::new(7);
//! let channels = ItemMemory::<BinaryHypervector>::new(CHANNELS, 1024, &mut rng);
//! let levels = ContinuousItemMemory::<BinaryHypervector>::new(10, 1024, &mut rng);
//!
//! let encoder = EmgEncoder::new(EmgEncoderParams::default(), &channels, &levels).unwrap();
//! let memory = AssociativeMemory::train(&encoder, &sequence).unwrap();
//! assert_eq!(memory.len(), 2);
//!
//! let score = predict_accuracy(&encoder, &sequence, &memory).unwrap();
//! assert_eq!(score.percent(), Some(100.0));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialization of parameters and JSON configuration files
//! - `rayon`: Evaluate subjects in parallel

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

pub mod algorithms;
pub mod dataset;
pub mod encoders;
pub mod experiment;
pub mod hypervector;
pub mod types;
pub mod utils;

/// Re-export of commonly used types and traits for convenience.
pub mod prelude {
    pub use crate::types::{Label, Sample, Sequence, CHANNELS};
    pub use crate::hypervector::{
        BinaryHypervector, ContinuousItemMemory, FloatHypervector, Hypervector,
        IntegerHypervector, ItemMemory, VectorKind,
    };
    pub use crate::encoders::{
        AmplitudeQuantizer, EmgEncoder, EmgEncoderParams, Encoder, EncodingMode,
    };
    pub use crate::algorithms::{
        predict_accuracy, predict_window_max, slice_evaluate, AssociativeMemory, Score,
    };
    pub use crate::dataset::{downsample, training_split, Subject};
    pub use crate::experiment::{EmgParams, Evaluation, ExperimentPlan, SubjectReport};
    pub use crate::utils::Random;
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for the library.
pub mod error {
    use thiserror::Error;

    /// Main error type for hdemg operations.
    #[derive(Error, Debug)]
    pub enum EmgError {
        /// Invalid parameter value.
        #[error("Invalid parameter '{name}': {message}")]
        InvalidParameter {
            /// Name of the invalid parameter.
            name: &'static str,
            /// Description of the error.
            message: String,
        },

        /// Index out of bounds.
        #[error("Index {index} out of bounds (size: {size})")]
        IndexOutOfBounds {
            /// The invalid index.
            index: usize,
            /// The valid size.
            size: usize,
        },

        /// Two parallel collections that must have the same length do not.
        #[error("Length mismatch: {samples} samples but {labels} labels")]
        LengthMismatch {
            /// Number of samples.
            samples: usize,
            /// Number of labels.
            labels: usize,
        },

        /// A raw dataset buffer is not a whole number of elements.
        #[error("Malformed buffer: {len} bytes is not a multiple of {element_size}")]
        MalformedBuffer {
            /// Buffer length in bytes.
            len: usize,
            /// Size of one element in bytes.
            element_size: usize,
        },

        /// A class produced no encodable training window.
        #[error("Class {label} has no training window to bundle")]
        EmptyClass {
            /// Label of the empty class.
            label: u8,
        },

        /// Search against an associative memory without prototypes.
        #[error("Associative memory holds no prototypes")]
        EmptyMemory,

        /// The labels violate the contiguity the slicing scan relies on.
        #[error("Unreachable condition in slicing at position {position}: {message}")]
        LabelInconsistency {
            /// Position in the label sequence.
            position: usize,
            /// Description of the violation.
            message: String,
        },

        /// Serialization error.
        #[cfg(feature = "serde")]
        #[error("Serialization error: {message}")]
        SerializationError {
            /// Description of the serialization error.
            message: String,
        },

        /// I/O error.
        #[error("I/O error: {message}")]
        IoError {
            /// Description of the I/O error.
            message: String,
        },
    }

    /// Result type alias using EmgError.
    pub type Result<T> = std::result::Result<T, EmgError>;
}

pub use error::{EmgError, Result};
