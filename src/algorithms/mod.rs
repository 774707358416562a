//! Training and classification algorithms.
//!
//! - **Associative Memory**: bundles training windows into class prototypes and
//!   answers nearest-prototype queries
//! - **Evaluation**: whole-sequence accuracy and run-level slicing accuracy

mod associative_memory;
mod evaluation;

pub use associative_memory::AssociativeMemory;
pub use evaluation::{
    label_runs, predict_accuracy, predict_window_max, slice_evaluate, Run, Score,
};
