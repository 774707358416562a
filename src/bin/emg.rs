//! EMG gesture classification experiments.
//!
//! Loads `complete{i}.bin` / `labels{i}.bin` for every subject from a dataset
//! directory and prints the accuracy of each subject.
//!
//! Usage:
//!   cargo run --release --bin emg -- <DATASET_DIR> [OPTIONS]
//!
//! Logging is controlled through `RUST_LOG`, e.g. `RUST_LOG=hdemg=debug`.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hdemg::dataset::Subject;
use hdemg::experiment::{self, EmgParams, ExperimentPlan};
use hdemg::hypervector::VectorKind;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Which experiments to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExperimentChoice {
    /// Single-sample spatial encoding, every window scored.
    Spatial,
    /// 4-gram temporal encoding, scored per gesture run.
    Temporal,
    /// Spatial followed by temporal.
    Both,
    /// Encoding mode, n-grams and stride taken from the parameters.
    Configured,
}

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "emg")]
#[command(about = "Hyperdimensional EMG hand gesture classification")]
struct Args {
    /// Path to the dataset directory.
    dataset: PathBuf,

    /// Hypervector representation: bin, int or float.
    #[arg(long)]
    hdc: Option<VectorKind>,

    /// Hypervector dimensionality.
    #[arg(short, long)]
    dim: Option<usize>,

    /// Number of amplitude levels.
    #[arg(short, long)]
    levels: Option<usize>,

    /// Number of subjects to load.
    #[arg(long)]
    subjects: Option<usize>,

    /// Seed of the item memories.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON parameter file. Command line options override its values.
    #[cfg(feature = "serde")]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Experiments to run.
    #[arg(long, value_enum, default_value = "both")]
    experiment: ExperimentChoice,
}

impl Args {
    fn params(&self) -> Result<EmgParams> {
        #[cfg(feature = "serde")]
        let mut params = match &self.config {
            Some(path) => EmgParams::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => EmgParams::default(),
        };
        #[cfg(not(feature = "serde"))]
        let mut params = EmgParams::default();

        if let Some(kind) = self.hdc {
            params.vector_kind = kind;
        }
        if let Some(dim) = self.dim {
            params.dimensions = dim;
        }
        if let Some(levels) = self.levels {
            params.levels = levels;
        }
        if let Some(subjects) = self.subjects {
            params.subjects = subjects;
        }
        if let Some(seed) = self.seed {
            params.seed = seed;
        }

        params.validate()?;
        Ok(params)
    }

    fn plans(&self, params: &EmgParams) -> Vec<ExperimentPlan> {
        match self.experiment {
            ExperimentChoice::Spatial => vec![ExperimentPlan::spatial()],
            ExperimentChoice::Temporal => vec![ExperimentPlan::temporal()],
            ExperimentChoice::Both => vec![ExperimentPlan::spatial(), ExperimentPlan::temporal()],
            ExperimentChoice::Configured => vec![ExperimentPlan::from_params(params)],
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    let args = Args::parse();
    let params = args.params()?;

    let subjects = (1..=params.subjects)
        .map(|i| {
            Subject::load(&args.dataset, i)
                .with_context(|| format!("loading subject {i} from {}", args.dataset.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    info!(subjects = subjects.len(), kind = %params.vector_kind, "dataset loaded");

    for plan in args.plans(&params) {
        println!(
            "{}: D: {} Levels: {} Encode type: {} N-grams: {} Training Fraction: {}% Downsample: {}",
            plan.name,
            params.dimensions,
            params.levels,
            plan.mode,
            plan.n_grams,
            params.training_fraction * 100.0,
            plan.downsample
        );

        let reports = experiment::run(&params, &plan, &subjects)
            .with_context(|| format!("running {}", plan.name))?;
        for report in reports {
            println!("{report}");
        }
    }

    Ok(())
}
