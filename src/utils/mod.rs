//! Utility modules.
//!
//! Currently holds the seedable random number generator behind every item memory.

mod random;

pub use random::Random;
