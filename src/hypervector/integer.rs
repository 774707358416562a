//! Integer hypervectors with bipolar initialization.

use crate::hypervector::{cosine_distance, rotated_index, Hypervector, VectorKind};
use crate::utils::Random;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An integer hypervector.
///
/// Random vectors hold `+1`/`-1` components. Bundling is the element-wise sum,
/// binding the element-wise product; both saturate instead of overflowing.
/// Distance is the cosine distance scaled to `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntegerHypervector {
    components: Vec<i32>,
}

impl IntegerHypervector {
    /// Wraps explicit components.
    pub fn from_components(components: Vec<i32>) -> Self {
        Self { components }
    }

    /// Component values.
    pub fn components(&self) -> &[i32] {
        &self.components
    }
}

impl Hypervector for IntegerHypervector {
    const KIND: VectorKind = VectorKind::Integer;

    fn random(dim: usize, rng: &mut Random) -> Self {
        Self {
            components: (0..dim).map(|_| i32::from(rng.get_bipolar())).collect(),
        }
    }

    fn dim(&self) -> usize {
        self.components.len()
    }

    fn flip(&self, positions: &[usize]) -> Self {
        let mut components = self.components.clone();
        for &i in positions {
            components[i] = components[i].saturating_neg();
        }
        Self { components }
    }

    fn bundle(vectors: &[Self]) -> Self {
        assert!(!vectors.is_empty(), "cannot bundle an empty set of hypervectors");
        let mut components = vectors[0].components.clone();
        for v in &vectors[1..] {
            debug_assert_eq!(v.dim(), components.len());
            for (acc, &c) in components.iter_mut().zip(&v.components) {
                *acc = acc.saturating_add(c);
            }
        }
        Self { components }
    }

    fn bind(&self, other: &Self) -> Self {
        debug_assert_eq!(self.dim(), other.dim());
        Self {
            components: self
                .components
                .iter()
                .zip(&other.components)
                .map(|(a, b)| a.saturating_mul(*b))
                .collect(),
        }
    }

    fn permute(&self, shift: usize) -> Self {
        let dim = self.dim();
        if dim == 0 {
            return self.clone();
        }
        let mut components = vec![0; dim];
        for (i, &c) in self.components.iter().enumerate() {
            components[rotated_index(i, shift, dim)] = c;
        }
        Self { components }
    }

    fn distance(&self, other: &Self) -> f32 {
        debug_assert_eq!(self.dim(), other.dim());
        let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
        for (&a, &b) in self.components.iter().zip(&other.components) {
            let (a, b) = (f64::from(a), f64::from(b));
            dot += a * b;
            norm_a += a * a;
            norm_b += b * b;
        }
        cosine_distance(dot, norm_a, norm_b)
    }
}
