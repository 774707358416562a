//! Hypervector algebra and item memories.
//!
//! Every representation implements [`Hypervector`], the single algebra capability the
//! encoders, trainer and evaluators consume:
//!
//! - **bundle**: similarity-preserving superposition of many vectors
//! - **bind**: association of two vectors into one dissimilar to both
//! - **permute**: cyclic shift used to tag sequence position
//! - **distance**: symmetric, normalized to `[0, 1]`, smaller is closer
//!
//! # Available Representations
//!
//! - [`BinaryHypervector`]: bit-packed, XOR binding, majority bundling, Hamming distance
//! - [`IntegerHypervector`]: bipolar `i32` components, sum bundling, cosine distance
//! - [`FloatHypervector`]: bipolar `f32` components, sum bundling, cosine distance
//!
//! The representation is picked once per run through [`VectorKind`].

mod binary;
mod float;
mod integer;
mod item_memory;

pub use binary::BinaryHypervector;
pub use float::FloatHypervector;
pub use integer::IntegerHypervector;
pub use item_memory::{ContinuousItemMemory, ItemMemory};

use crate::error::{EmgError, Result};
use crate::utils::Random;
use std::fmt::Debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Algebra shared by all hypervector representations.
///
/// Values are never mutated after construction; every operation returns a new vector.
pub trait Hypervector: Clone + Debug + PartialEq + Send + Sync + Sized {
    /// Runtime tag of this representation.
    const KIND: VectorKind;

    /// Draws an independent random vector of `dim` components.
    fn random(dim: usize, rng: &mut Random) -> Self;

    /// Number of components.
    fn dim(&self) -> usize;

    /// Returns a copy with the components at `positions` inverted.
    fn flip(&self, positions: &[usize]) -> Self;

    /// Superposes `vectors` into one vector similar to each of them.
    ///
    /// # Panics
    ///
    /// Panics if `vectors` is empty.
    fn bundle(vectors: &[Self]) -> Self;

    /// Binds two vectors.
    fn bind(&self, other: &Self) -> Self;

    /// Cyclically shifts every component `shift` positions up.
    fn permute(&self, shift: usize) -> Self;

    /// Normalized distance in `[0, 1]`.
    fn distance(&self, other: &Self) -> f32;

    /// Binds all `vectors` together, left to right.
    ///
    /// # Panics
    ///
    /// Panics if `vectors` is empty.
    fn bind_all(vectors: &[Self]) -> Self {
        assert!(!vectors.is_empty(), "cannot bind an empty set of hypervectors");
        vectors[1..]
            .iter()
            .fold(vectors[0].clone(), |acc, v| acc.bind(v))
    }

    /// Draws `count` correlated vectors where adjacent entries are closer than distant ones.
    ///
    /// Level 0 is random. Level `l` inverts the components of its predecessor between
    /// `(l - 1) * dim / (2 * (count - 1))` and `l * dim / (2 * (count - 1))` of one random
    /// order, so the first and last levels differ in `dim / 2` components. Every level is
    /// distinct as long as `count <= max_levels(dim)`.
    fn level_set(count: usize, dim: usize, rng: &mut Random) -> Vec<Self> {
        if count == 0 {
            return Vec::new();
        }

        let order = rng.permutation(dim);
        let blocks = 2 * count.saturating_sub(1);
        let boundary = |level: usize| if blocks == 0 { 0 } else { level * dim / blocks };

        let mut levels = Vec::with_capacity(count);
        levels.push(Self::random(dim, rng));
        for level in 1..count {
            let flipped = &order[boundary(level - 1)..boundary(level)];
            let next = levels[level - 1].flip(flipped);
            levels.push(next);
        }
        levels
    }
}

/// Runtime selection of the hypervector representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VectorKind {
    /// Bit-packed binary vectors.
    #[default]
    Binary,
    /// Bipolar integer vectors.
    Integer,
    /// Bipolar floating point vectors.
    Float,
}

impl std::fmt::Display for VectorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorKind::Binary => write!(f, "bin"),
            VectorKind::Integer => write!(f, "int"),
            VectorKind::Float => write!(f, "float"),
        }
    }
}

impl std::str::FromStr for VectorKind {
    type Err = EmgError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bin" | "binary" => Ok(VectorKind::Binary),
            "int" | "integer" => Ok(VectorKind::Integer),
            "float" => Ok(VectorKind::Float),
            _ => Err(EmgError::InvalidParameter {
                name: "hdc",
                message: format!("Unknown vector kind '{s}'. Expected: bin, int, float"),
            }),
        }
    }
}

/// Largest level count whose level set has no two equal levels at dimensionality `dim`.
pub fn max_levels(dim: usize) -> usize {
    dim / 2 + 1
}

/// Cosine distance mapped to `[0, 1]`. Zero vectors count as orthogonal.
pub(crate) fn cosine_distance(dot: f64, norm_a: f64, norm_b: f64) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.5;
    }
    let cos = (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0);
    ((1.0 - cos) / 2.0) as f32
}

/// Index that component `i` moves to under a cyclic shift of `shift` over `dim` components.
#[inline]
pub(crate) fn rotated_index(i: usize, shift: usize, dim: usize) -> usize {
    (i + shift) % dim
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("bin".parse::<VectorKind>().unwrap(), VectorKind::Binary);
        assert_eq!("INT".parse::<VectorKind>().unwrap(), VectorKind::Integer);
        assert_eq!("float".parse::<VectorKind>().unwrap(), VectorKind::Float);
        assert!("complex".parse::<VectorKind>().is_err());
    }

    #[test]
    fn test_representation_tags() {
        assert_eq!(BinaryHypervector::KIND, VectorKind::Binary);
        assert_eq!(IntegerHypervector::KIND, VectorKind::Integer);
        assert_eq!(FloatHypervector::KIND, VectorKind::Float);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(VectorKind::Binary.to_string(), "bin");
        assert_eq!(VectorKind::Integer.to_string(), "int");
        assert_eq!(VectorKind::Float.to_string(), "float");
    }

    #[test]
    fn test_cosine_distance_bounds() {
        assert!((cosine_distance(4.0, 4.0, 4.0) - 0.0).abs() < 1e-6);
        assert!((cosine_distance(-4.0, 4.0, 4.0) - 1.0).abs() < 1e-6);
        assert!((cosine_distance(0.0, 4.0, 4.0) - 0.5).abs() < 1e-6);
        assert!((cosine_distance(0.0, 0.0, 4.0) - 0.5).abs() < 1e-6);
    }

    fn check_level_set<V: Hypervector>() {
        let mut rng = Random::new(3);
        let levels = V::level_set(11, 2000, &mut rng);
        assert_eq!(levels.len(), 11);

        let near = levels[0].distance(&levels[1]);
        let mid = levels[0].distance(&levels[5]);
        let far = levels[0].distance(&levels[10]);
        assert!(near < mid);
        assert!(mid < far);
        assert!((far - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_level_sets_are_graded() {
        check_level_set::<BinaryHypervector>();
        check_level_set::<IntegerHypervector>();
        check_level_set::<FloatHypervector>();
    }

    #[test]
    fn test_level_set_small_dimension() {
        let mut rng = Random::new(5);
        let dim = 18;
        assert_eq!(max_levels(dim), 10);

        let levels = BinaryHypervector::level_set(10, dim, &mut rng);
        for pair in levels.windows(2) {
            assert!(pair[0].distance(&pair[1]) > 0.0);
        }
        assert_eq!(levels[0].distance(&levels[9]), 0.5);
    }

    #[test]
    fn test_level_set_spreads_remainder() {
        // 100 components over 66 blocks: uneven block sizes, still 50 flips in total.
        let mut rng = Random::new(6);
        let levels = BinaryHypervector::level_set(34, 100, &mut rng);
        for pair in levels.windows(2) {
            assert!(pair[0].distance(&pair[1]) > 0.0);
        }
        assert_eq!(levels[0].distance(&levels[33]), 0.5);
    }

    #[test]
    fn test_single_level() {
        let mut rng = Random::new(3);
        let levels = IntegerHypervector::level_set(1, 64, &mut rng);
        assert_eq!(levels.len(), 1);
        assert!(IntegerHypervector::level_set(0, 64, &mut rng).is_empty());
    }
}
