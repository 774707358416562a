//! Dataset loading and preparation.
//!
//! Recordings are stored per subject as two raw binary files:
//!
//! - `complete{n}.bin`: little-endian `f64` amplitudes, four channels per sample
//! - `labels{n}.bin`: one `u8` gesture label per sample
//!
//! Besides parsing, this module derives the sequences an experiment runs on:
//! stride downsampling and the stratified training split.

use crate::error::{EmgError, Result};
use crate::types::{Amplitude, Label, Sample, Sequence, CHANNELS, LABEL_BYTES, SAMPLE_BYTES};
use ahash::AHashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parses a buffer of little-endian `f64` quadruples into samples.
///
/// # Errors
///
/// Returns [`EmgError::MalformedBuffer`] if the length is not a whole number of samples.
pub fn parse_samples(buffer: &[u8]) -> Result<Vec<Sample>> {
    if buffer.len() % SAMPLE_BYTES != 0 {
        return Err(EmgError::MalformedBuffer {
            len: buffer.len(),
            element_size: SAMPLE_BYTES,
        });
    }

    let width = std::mem::size_of::<Amplitude>();
    Ok(buffer
        .chunks_exact(SAMPLE_BYTES)
        .map(|chunk| {
            let mut sample = [0.0; CHANNELS];
            for (value, bytes) in sample.iter_mut().zip(chunk.chunks_exact(width)) {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(bytes);
                *value = Amplitude::from_le_bytes(raw);
            }
            sample
        })
        .collect())
}

/// Parses a buffer of one-byte labels.
///
/// # Errors
///
/// Never fails for single-byte labels; kept fallible so wider label types can
/// share the signature.
pub fn parse_labels(buffer: &[u8]) -> Result<Vec<Label>> {
    if buffer.len() % LABEL_BYTES != 0 {
        return Err(EmgError::MalformedBuffer {
            len: buffer.len(),
            element_size: LABEL_BYTES,
        });
    }
    Ok(buffer.to_vec())
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| EmgError::IoError {
        message: format!("Failed to read {}: {}", path.display(), e),
    })
}

/// Reads a sample file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed.
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<Sample>> {
    parse_samples(&read_file(path.as_ref())?)
}

/// Reads a label file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_labels<P: AsRef<Path>>(path: P) -> Result<Vec<Label>> {
    parse_labels(&read_file(path.as_ref())?)
}

/// The full recording of one subject.
#[derive(Debug, Clone)]
pub struct Subject {
    /// One-based subject number used in the file names.
    pub index: usize,
    /// Samples and labels of the recording.
    pub sequence: Sequence,
}

impl Subject {
    /// Path of the sample file of subject `index` in `dir`.
    pub fn data_path(dir: &Path, index: usize) -> PathBuf {
        dir.join(format!("complete{index}.bin"))
    }

    /// Path of the label file of subject `index` in `dir`.
    pub fn labels_path(dir: &Path, index: usize) -> PathBuf {
        dir.join(format!("labels{index}.bin"))
    }

    /// Loads subject `index` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is missing or malformed, or if the two files
    /// describe different numbers of samples.
    pub fn load<P: AsRef<Path>>(dir: P, index: usize) -> Result<Self> {
        let dir = dir.as_ref();
        let samples = read_dataset(Self::data_path(dir, index))?;
        let labels = read_labels(Self::labels_path(dir, index))?;
        debug!(subject = index, samples = samples.len(), "loaded recording");

        Ok(Self {
            index,
            sequence: Sequence::new(samples, labels)?,
        })
    }
}

/// Keeps every `stride`-th sample, starting with the first.
///
/// # Errors
///
/// Returns an error if `stride` is zero.
pub fn downsample(sequence: &Sequence, stride: usize) -> Result<Sequence> {
    if stride == 0 {
        return Err(EmgError::InvalidParameter {
            name: "downsample",
            message: "Must be > 0".to_string(),
        });
    }
    Ok(sequence.select((0..sequence.len()).step_by(stride)))
}

/// Builds a training sequence from the first `fraction` of each class.
///
/// For every label, in ascending order, the first `floor(count * fraction)` samples
/// carrying it are taken in their original order. The result is grouped by label.
///
/// # Errors
///
/// Returns an error if `fraction` is outside `[0, 1]`.
pub fn training_split(sequence: &Sequence, fraction: f32) -> Result<Sequence> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(EmgError::InvalidParameter {
            name: "training_fraction",
            message: format!("Must be within [0, 1], got {fraction}"),
        });
    }

    let mut counts: AHashMap<Label, usize> = AHashMap::new();
    for &label in sequence.labels() {
        *counts.entry(label).or_default() += 1;
    }

    let mut classes: Vec<Label> = counts.keys().copied().collect();
    classes.sort_unstable();

    let mut indices = Vec::new();
    for label in classes {
        let quota = (counts[&label] as f32 * fraction) as usize;
        indices.extend(
            sequence
                .labels()
                .iter()
                .enumerate()
                .filter(|&(_, &l)| l == label)
                .map(|(i, _)| i)
                .take(quota),
        );
    }

    Ok(sequence.select(indices))
}
