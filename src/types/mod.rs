//! Core types for the EMG pipeline.
//!
//! This module contains the primitive aliases shared by every component and the
//! labelled [`Sequence`] of multi-channel samples that all encoders and evaluators read.

mod primitives;
mod sequence;

pub use primitives::*;
pub use sequence::*;
