//! Primitive type definitions for EMG processing.

/// Number of EMG channels recorded per sample.
pub const CHANNELS: usize = 4;

/// Raw channel amplitude as stored in the dataset files.
pub type Amplitude = f64;

/// One time step: the amplitude of every channel.
pub type Sample = [Amplitude; CHANNELS];

/// Gesture label. The dataset uses small positive values, "no gesture" being the lowest.
pub type Label = u8;

/// Label that index 0 of an associative memory stands for in whole-sequence scoring.
pub const FIRST_LABEL: Label = 1;

/// Discrete amplitude bin produced by the quantizer.
pub type Level = usize;

/// Size in bytes of one serialized sample (four little-endian `f64`).
pub const SAMPLE_BYTES: usize = std::mem::size_of::<Amplitude>() * CHANNELS;

/// Size in bytes of one serialized label.
pub const LABEL_BYTES: usize = std::mem::size_of::<Label>();
