//! Experiment configuration and per-subject drivers.
//!
//! An experiment downsamples each subject's recording into a test sequence, takes
//! the first fraction of every class as training data, trains an associative memory
//! and scores it on the test sequence. The item memories are generated once from the
//! configured seed and shared by every subject.

use crate::algorithms::{predict_accuracy, slice_evaluate, AssociativeMemory, Score};
use crate::dataset::{downsample, training_split, Subject};
use crate::encoders::{EmgEncoder, EmgEncoderParams, EncodingMode};
use crate::error::{EmgError, Result};
use crate::hypervector::{
    max_levels, BinaryHypervector, ContinuousItemMemory, FloatHypervector, Hypervector,
    IntegerHypervector, ItemMemory, VectorKind,
};
use crate::types::CHANNELS;
use crate::utils::Random;
use tracing::{debug, info};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters shared by all experiments.
///
/// # Example
///
/// ```rust
/// use hdemg::experiment::EmgParams;
/// use hdemg::hypervector::VectorKind;
///
/// let params = EmgParams {
///     dimensions: 2048,
///     vector_kind: VectorKind::Float,
///     ..Default::default()
/// };
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EmgParams {
    /// Hypervector dimensionality.
    pub dimensions: usize,

    /// Number of amplitude quantization levels.
    pub levels: usize,

    /// Samples per encoded window.
    pub n_grams: usize,

    /// Window composition.
    pub mode: EncodingMode,

    /// Keep every n-th sample of a recording.
    pub downsample: usize,

    /// Fraction of each class used for training.
    pub training_fraction: f32,

    /// Amplitude range split by the quantizer.
    pub amplitude_range: (f32, f32),

    /// Seed of the item memories.
    pub seed: u64,

    /// Hypervector representation.
    pub vector_kind: VectorKind,

    /// Number of subjects in the dataset directory.
    pub subjects: usize,
}

impl Default for EmgParams {
    fn default() -> Self {
        Self {
            dimensions: 10_000,
            levels: 10,
            n_grams: 1,
            mode: EncodingMode::Spatial,
            downsample: 1,
            training_fraction: 0.25,
            amplitude_range: (0.0, 20.0),
            seed: 42,
            vector_kind: VectorKind::Binary,
            subjects: 5,
        }
    }
}

impl EmgParams {
    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// Returns [`EmgError::InvalidParameter`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("dimensions", self.dimensions),
            ("levels", self.levels),
            ("n_grams", self.n_grams),
            ("downsample", self.downsample),
            ("subjects", self.subjects),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(EmgError::InvalidParameter {
                    name,
                    message: "Must be > 0".to_string(),
                });
            }
        }

        if !(0.0..=1.0).contains(&self.training_fraction) {
            return Err(EmgError::InvalidParameter {
                name: "training_fraction",
                message: format!("Must be within [0, 1], got {}", self.training_fraction),
            });
        }

        if self.levels > max_levels(self.dimensions) {
            return Err(EmgError::InvalidParameter {
                name: "levels",
                message: format!(
                    "{} levels need at least {} dimensions, got {}",
                    self.levels,
                    2 * (self.levels - 1),
                    self.dimensions
                ),
            });
        }

        let (minimum, maximum) = self.amplitude_range;
        if minimum.is_nan() || maximum.is_nan() || maximum <= minimum {
            return Err(EmgError::InvalidParameter {
                name: "amplitude_range",
                message: format!("Maximum {maximum} must exceed minimum {minimum}"),
            });
        }

        Ok(())
    }

    /// Loads and validates parameters from a JSON file. Missing fields take their
    /// default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or holds
    /// invalid parameters.
    #[cfg(feature = "serde")]
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| EmgError::IoError {
            message: format!("Failed to open file {}: {}", path.display(), e),
        })?;
        let params: Self =
            serde_json::from_str(&text).map_err(|e| EmgError::SerializationError {
                message: format!("Failed to parse {}: {}", path.display(), e),
            })?;
        params.validate()?;
        Ok(params)
    }

    /// Encoder parameters for a plan.
    pub fn encoder_params(&self, plan: &ExperimentPlan) -> EmgEncoderParams {
        EmgEncoderParams {
            levels: self.levels,
            n_grams: plan.n_grams,
            mode: plan.mode,
            amplitude_range: self.amplitude_range,
        }
    }
}

/// How a trained memory is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Evaluation {
    /// Classify every window start ([`predict_accuracy`]).
    WholeSequence,
    /// Classify each label run as a whole ([`slice_evaluate`]).
    Slicing,
}

/// Encoding and scoring settings of one experiment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExperimentPlan {
    /// Name printed in reports.
    pub name: String,
    /// Window composition.
    pub mode: EncodingMode,
    /// Samples per window.
    pub n_grams: usize,
    /// Downsampling stride.
    pub downsample: usize,
    /// Stride for the last subject, if it differs.
    pub last_subject_downsample: Option<usize>,
    /// Scoring scheme.
    pub evaluation: Evaluation,
}

impl ExperimentPlan {
    /// Single-sample spatial encoding scored on every window.
    pub fn spatial() -> Self {
        Self {
            name: "Spatial encoding".to_string(),
            mode: EncodingMode::Spatial,
            n_grams: 1,
            downsample: 1,
            last_subject_downsample: None,
            evaluation: Evaluation::WholeSequence,
        }
    }

    /// 4-gram temporal encoding on heavily downsampled recordings, scored per run.
    /// The last subject's recording is shorter and uses a finer stride.
    pub fn temporal() -> Self {
        Self {
            name: "Temporal encoding".to_string(),
            mode: EncodingMode::Temporal,
            n_grams: 4,
            downsample: 250,
            last_subject_downsample: Some(50),
            evaluation: Evaluation::Slicing,
        }
    }

    /// A plan that follows the encoding settings of `params`.
    ///
    /// Temporal encoding is scored per run, spatial encoding on every window.
    pub fn from_params(params: &EmgParams) -> Self {
        let evaluation = match params.mode {
            EncodingMode::Spatial => Evaluation::WholeSequence,
            EncodingMode::Temporal => Evaluation::Slicing,
        };
        Self {
            name: format!("{} encoding", params.mode),
            mode: params.mode,
            n_grams: params.n_grams,
            downsample: params.downsample,
            last_subject_downsample: None,
            evaluation,
        }
    }

    /// Stride for subject `position` out of `count`.
    pub fn downsample_for(&self, position: usize, count: usize) -> usize {
        match self.last_subject_downsample {
            Some(stride) if position + 1 == count => stride,
            _ => self.downsample,
        }
    }
}

/// Result of one subject.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubjectReport {
    /// Subject number.
    pub subject: usize,
    /// Stride the recording was downsampled with.
    pub downsample: usize,
    /// Number of trained class prototypes.
    pub classes: usize,
    /// Score on the downsampled recording.
    pub score: Score,
}

impl std::fmt::Display for SubjectReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Accuracy[{}]: {}", self.subject, self.score)
    }
}

/// Trains and scores one subject with the given item memories.
///
/// # Errors
///
/// Returns an error if the parameters are invalid, a class has no training window,
/// or evaluation fails.
pub fn run_subject<V: Hypervector>(
    params: &EmgParams,
    plan: &ExperimentPlan,
    subject: &Subject,
    stride: usize,
    channels: &ItemMemory<V>,
    levels: &ContinuousItemMemory<V>,
) -> Result<SubjectReport> {
    let encoder = EmgEncoder::new(params.encoder_params(plan), channels, levels)?;

    let test = downsample(&subject.sequence, stride)?;
    let train = training_split(&test, params.training_fraction)?;
    let memory = AssociativeMemory::train(&encoder, &train)?;

    let score = match plan.evaluation {
        Evaluation::WholeSequence => predict_accuracy(&encoder, &test, &memory)?,
        Evaluation::Slicing => slice_evaluate(&encoder, &test, &memory)?,
    };

    info!(
        subject = subject.index,
        stride,
        test_samples = test.len(),
        train_samples = train.len(),
        classes = memory.len(),
        accuracy = ?score.percent(),
        "evaluated subject"
    );

    Ok(SubjectReport {
        subject: subject.index,
        downsample: stride,
        classes: memory.len(),
        score,
    })
}

/// Runs `plan` on every subject with the representation chosen in `params`.
///
/// # Errors
///
/// Returns the first error of any subject.
pub fn run(
    params: &EmgParams,
    plan: &ExperimentPlan,
    subjects: &[Subject],
) -> Result<Vec<SubjectReport>> {
    params.validate()?;
    info!(
        name = %plan.name,
        kind = %params.vector_kind,
        dimensions = params.dimensions,
        levels = params.levels,
        mode = %plan.mode,
        n_grams = plan.n_grams,
        training_fraction = params.training_fraction,
        downsample = plan.downsample,
        "starting experiment"
    );

    match params.vector_kind {
        VectorKind::Binary => run_with::<BinaryHypervector>(params, plan, subjects),
        VectorKind::Integer => run_with::<IntegerHypervector>(params, plan, subjects),
        VectorKind::Float => run_with::<FloatHypervector>(params, plan, subjects),
    }
}

fn run_with<V: Hypervector>(
    params: &EmgParams,
    plan: &ExperimentPlan,
    subjects: &[Subject],
) -> Result<Vec<SubjectReport>> {
    let mut rng = Random::new(params.seed);
    let channels = ItemMemory::<V>::new(CHANNELS, params.dimensions, &mut rng);
    let levels = ContinuousItemMemory::<V>::new(params.levels, params.dimensions, &mut rng);
    debug!(kind = %V::KIND, seed = rng.seed(), "generated item memories");

    let count = subjects.len();
    let evaluate = |(position, subject): (usize, &Subject)| {
        let stride = plan.downsample_for(position, count);
        run_subject(params, plan, subject, stride, &channels, &levels)
    };

    #[cfg(feature = "rayon")]
    let reports = subjects.par_iter().enumerate().map(evaluate).collect();

    #[cfg(not(feature = "rayon"))]
    let reports = subjects.iter().enumerate().map(evaluate).collect();

    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Sample, Sequence};

    fn subject(index: usize, blocks: &[(u8, Sample, usize)]) -> Subject {
        let mut samples = Vec::new();
        let mut labels = Vec::new();
        for &(label, sample, len) in blocks {
            samples.extend(std::iter::repeat(sample).take(len));
            labels.extend(std::iter::repeat(label).take(len));
        }
        Subject {
            index,
            sequence: Sequence::new(samples, labels).unwrap(),
        }
    }

    fn small_params(kind: VectorKind) -> EmgParams {
        EmgParams {
            dimensions: 512,
            training_fraction: 0.5,
            vector_kind: kind,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_params_are_valid() {
        assert!(EmgParams::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = [
            EmgParams { dimensions: 0, ..Default::default() },
            EmgParams { downsample: 0, ..Default::default() },
            EmgParams { training_fraction: 1.5, ..Default::default() },
            EmgParams { amplitude_range: (5.0, 5.0), ..Default::default() },
            EmgParams { amplitude_range: (0.0, f32::NAN), ..Default::default() },
            EmgParams { dimensions: 16, levels: 10, ..Default::default() },
        ];
        for params in cases {
            assert!(matches!(
                params.validate(),
                Err(EmgError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_plan_strides() {
        let temporal = ExperimentPlan::temporal();
        assert_eq!(temporal.downsample_for(0, 5), 250);
        assert_eq!(temporal.downsample_for(4, 5), 50);

        let spatial = ExperimentPlan::spatial();
        assert_eq!(spatial.downsample_for(4, 5), 1);
    }

    #[test]
    fn test_plan_from_params() {
        let params = EmgParams {
            mode: EncodingMode::Temporal,
            n_grams: 3,
            downsample: 10,
            ..Default::default()
        };
        let plan = ExperimentPlan::from_params(&params);
        assert_eq!(plan.evaluation, Evaluation::Slicing);
        assert_eq!(plan.n_grams, 3);
        assert_eq!(plan.downsample_for(0, 1), 10);
    }

    #[test]
    fn test_spatial_run_separates_classes() {
        let subjects = vec![
            subject(1, &[(1, [1.0, 2.0, 1.0, 2.0], 8), (2, [18.0, 16.0, 19.0, 17.0], 8)]),
            subject(2, &[(1, [9.0, 1.0, 9.0, 1.0], 8), (2, [1.0, 9.0, 1.0, 9.0], 8)]),
        ];
        for kind in [VectorKind::Binary, VectorKind::Integer, VectorKind::Float] {
            let reports = run(&small_params(kind), &ExperimentPlan::spatial(), &subjects).unwrap();
            assert_eq!(reports.len(), 2);
            for report in reports {
                assert_eq!(report.classes, 2);
                assert_eq!(report.score.percent(), Some(100.0));
            }
        }
    }

    #[test]
    fn test_slicing_run() {
        let subjects = vec![subject(
            3,
            &[
                (1, [2.0, 2.0, 2.0, 2.0], 12),
                (2, [17.0, 17.0, 17.0, 17.0], 16),
                (1, [2.0, 2.0, 2.0, 2.0], 12),
            ],
        )];
        let plan = ExperimentPlan {
            downsample: 2,
            last_subject_downsample: None,
            ..ExperimentPlan::temporal()
        };
        let params = EmgParams {
            training_fraction: 0.5,
            dimensions: 1024,
            ..Default::default()
        };
        // Downsampled to 6 + 8 + 6 samples; training keeps 6 of label 1 and 4 of label 2.
        let reports = run(&params, &plan, &subjects).unwrap();
        assert_eq!(reports[0].downsample, 2);
        assert_eq!(reports[0].classes, 2);
        assert_eq!(reports[0].score, Score { correct: 3, total: 3 });
        assert_eq!(reports[0].to_string(), "Accuracy[3]: 100%");
    }

    #[test]
    fn test_run_reports_empty_class() {
        // With a tiny fraction no class keeps a training sample.
        let subjects = vec![subject(1, &[(1, [1.0; 4], 3), (2, [15.0; 4], 3)])];
        let params = EmgParams {
            training_fraction: 0.1,
            dimensions: 128,
            ..Default::default()
        };
        assert!(run(&params, &ExperimentPlan::spatial(), &subjects).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_params_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        std::fs::write(&path, r#"{ "dimensions": 4096, "vector_kind": "float" }"#).unwrap();

        let params = EmgParams::from_json_file(&path).unwrap();
        assert_eq!(params.dimensions, 4096);
        assert_eq!(params.vector_kind, VectorKind::Float);
        assert_eq!(params.levels, 10);

        std::fs::write(&path, r#"{ "levels": 0 }"#).unwrap();
        assert!(EmgParams::from_json_file(&path).is_err());

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            EmgParams::from_json_file(&path),
            Err(EmgError::SerializationError { .. })
        ));
    }
}
