//! Accuracy evaluation against a trained associative memory.
//!
//! Two scoring schemes are provided:
//!
//! - [`predict_accuracy`]: classify every window start and compare it to its label
//! - [`slice_evaluate`]: split the labels into runs of one gesture and classify each
//!   run as a whole through [`predict_window_max`]

use crate::algorithms::AssociativeMemory;
use crate::encoders::Encoder;
use crate::error::{EmgError, Result};
use crate::hypervector::Hypervector;
use crate::types::{Label, Sequence, FIRST_LABEL};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Count of correct predictions out of a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Score {
    /// Number of correct predictions.
    pub correct: usize,
    /// Denominator of the accuracy.
    pub total: usize,
}

impl Score {
    /// Accuracy in percent, or `None` when nothing was predicted.
    pub fn percent(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.correct as f64 / self.total as f64 * 100.0)
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.percent() {
            Some(p) => write!(f, "{p}%"),
            None => write!(f, "no predictions"),
        }
    }
}

/// Classifies every window start of `sequence` and scores it against its label.
///
/// Predicted index `i` stands for label `i + 1`. The denominator is the full sequence
/// length, so samples too close to the end to start a window count as misses.
///
/// # Errors
///
/// Returns an error if the memory is empty or encoding fails.
pub fn predict_accuracy<E, V>(
    encoder: &E,
    sequence: &Sequence,
    memory: &AssociativeMemory<V>,
) -> Result<Score>
where
    E: Encoder<Output = V>,
    V: Hypervector,
{
    let labels = sequence.labels();
    let mut correct = 0;

    for i in 0..sequence.window_count(encoder.window()) {
        let query = encoder.encode(i, sequence)?;
        let predicted = memory.search(&query)?;
        if predicted + usize::from(FIRST_LABEL) == usize::from(labels[i]) {
            correct += 1;
        }
    }

    Ok(Score {
        correct,
        total: sequence.len(),
    })
}

/// A run of samples sharing one label, as found by [`label_runs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// First sample of the run.
    pub start: usize,
    /// Position where the run was closed: its last sample when followed by a
    /// different label, one past the last scanned position at the end of the scan.
    pub stop: usize,
    /// Label of the run.
    pub label: Label,
}

impl Run {
    /// Window starts evaluated for this run: `max(stop - start, window)` starts from
    /// `start`, cut off where a full window no longer fits in a sequence of `len`.
    pub fn window_starts(&self, window: usize, len: usize) -> std::ops::Range<usize> {
        let width = (self.stop - self.start).max(window);
        let end = (self.start + width).min((len + 1).saturating_sub(window));
        self.start..end
    }
}

/// Splits the labels of `sequence` into runs of one label.
///
/// Positions are scanned while a full window of `window` samples and a successor
/// label exist. A run opens at the first of two equal labels and closes at the first
/// position followed by a different label. A run still open when the scan ends is
/// closed there.
///
/// # Errors
///
/// Returns [`EmgError::LabelInconsistency`] on a label change with no open run,
/// i.e. a run of a single sample.
pub fn label_runs(sequence: &Sequence, window: usize) -> Result<Vec<Run>> {
    let labels = sequence.labels();
    let scan_end = sequence
        .window_count(window)
        .min(labels.len().saturating_sub(1));

    let mut runs = Vec::new();
    let mut open: Option<usize> = None;

    for i in 0..scan_end {
        let same = labels[i] == labels[i + 1];
        match (same, open) {
            (true, None) => open = Some(i),
            (true, Some(_)) => {}
            (false, Some(start)) => {
                runs.push(Run {
                    start,
                    stop: i,
                    label: labels[start],
                });
                open = None;
            }
            (false, None) => {
                return Err(EmgError::LabelInconsistency {
                    position: i,
                    message: format!(
                        "label {} changes to {} without forming a run",
                        labels[i],
                        labels[i + 1]
                    ),
                });
            }
        }
    }

    if let Some(start) = open {
        runs.push(Run {
            start,
            stop: scan_end,
            label: labels[start],
        });
    }

    Ok(runs)
}

/// Returns the class of the single best match between any window in `[start, stop)`
/// and any prototype.
///
/// This is not a majority vote: one very close window decides the whole range.
/// Ties keep the earliest window and the lowest prototype index.
///
/// # Errors
///
/// Returns an error if the range is empty, the memory is empty or encoding fails.
pub fn predict_window_max<E, V>(
    encoder: &E,
    start: usize,
    stop: usize,
    sequence: &Sequence,
    memory: &AssociativeMemory<V>,
) -> Result<usize>
where
    E: Encoder<Output = V>,
    V: Hypervector,
{
    if start >= stop {
        return Err(EmgError::InvalidParameter {
            name: "stop",
            message: format!("Empty window range [{start}, {stop})"),
        });
    }

    let mut best: Option<(usize, f32)> = None;
    for i in start..stop {
        let query = encoder.encode(i, sequence)?;
        let (index, dist) = memory.nearest(&query)?;
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((index, dist));
        }
    }

    best.map(|(index, _)| index).ok_or(EmgError::EmptyMemory)
}

/// Scores run-level classification of `sequence`.
///
/// Each run from [`label_runs`] is classified with [`predict_window_max`] and counts
/// as correct when the predicted index plus the smallest label equals the run label.
///
/// # Errors
///
/// Returns an error on inconsistent labels, an empty memory or encoding failure.
pub fn slice_evaluate<E, V>(
    encoder: &E,
    sequence: &Sequence,
    memory: &AssociativeMemory<V>,
) -> Result<Score>
where
    E: Encoder<Output = V>,
    V: Hypervector,
{
    let Some(min) = sequence.min_label() else {
        return Ok(Score::default());
    };

    let window = encoder.window();
    let mut score = Score::default();

    for run in label_runs(sequence, window)? {
        let starts = run.window_starts(window, sequence.len());
        let predicted = predict_window_max(encoder, starts.start, starts.end, sequence, memory)?;
        let expected = usize::from(run.label - min);

        debug!(
            start = run.start,
            stop = run.stop,
            label = run.label,
            predicted,
            expected,
            "classified run"
        );

        score.total += 1;
        if predicted == expected {
            score.correct += 1;
        }
    }

    Ok(score)
}
