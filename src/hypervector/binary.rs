//! Bit-packed binary hypervectors.

use crate::hypervector::{rotated_index, Hypervector, VectorKind};
use crate::utils::Random;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const WORD_BITS: usize = 64;

/// A binary hypervector packed 64 components per word.
///
/// Binding is XOR, bundling is a bitwise majority vote and distance is the
/// normalized Hamming distance.
///
/// # Example
///
/// ```rust
/// use hdemg::hypervector::{BinaryHypervector, Hypervector};
/// use hdemg::utils::Random;
///
/// let mut rng = Random::new(5);
/// let a = BinaryHypervector::random(1000, &mut rng);
/// let b = BinaryHypervector::random(1000, &mut rng);
///
/// // XOR binding is its own inverse
/// assert_eq!(a.bind(&b).bind(&b), a);
///
/// // Independent random vectors are quasi-orthogonal
/// assert!((a.distance(&b) - 0.5).abs() < 0.1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinaryHypervector {
    words: Vec<u64>,
    dim: usize,
}

impl BinaryHypervector {
    /// Creates the all-zero vector.
    pub fn zeros(dim: usize) -> Self {
        Self {
            words: vec![0; dim.div_ceil(WORD_BITS)],
            dim,
        }
    }

    /// Builds a vector from explicit bits.
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut v = Self::zeros(bits.len());
        for (i, &bit) in bits.iter().enumerate() {
            if bit {
                v.set(i);
            }
        }
        v
    }

    /// Returns the component at `i`.
    #[inline]
    pub fn get(&self, i: usize) -> bool {
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    #[inline]
    fn set(&mut self, i: usize) {
        self.words[i / WORD_BITS] |= 1 << (i % WORD_BITS);
    }

    /// Number of set components.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Clears the unused high bits of the last word.
    fn mask_tail(&mut self) {
        let used = self.dim % WORD_BITS;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << used) - 1;
            }
        }
    }
}

impl Hypervector for BinaryHypervector {
    const KIND: VectorKind = VectorKind::Binary;

    fn random(dim: usize, rng: &mut Random) -> Self {
        let mut v = Self {
            words: (0..dim.div_ceil(WORD_BITS))
                .map(|_| rng.get_uint64())
                .collect(),
            dim,
        };
        v.mask_tail();
        v
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn flip(&self, positions: &[usize]) -> Self {
        let mut v = self.clone();
        for &i in positions {
            v.words[i / WORD_BITS] ^= 1 << (i % WORD_BITS);
        }
        v
    }

    /// Bitwise majority. With an even operand count, ties take the bit of the XOR of
    /// the first two operands.
    fn bundle(vectors: &[Self]) -> Self {
        assert!(!vectors.is_empty(), "cannot bundle an empty set of hypervectors");
        if vectors.len() == 1 {
            return vectors[0].clone();
        }

        let n = vectors.len();
        let dim = vectors[0].dim;
        let mut words = Vec::with_capacity(vectors[0].words.len());

        for w in 0..vectors[0].words.len() {
            let tie_breaker = vectors[0].words[w] ^ vectors[1].words[w];
            let mut word = 0u64;
            for bit in 0..WORD_BITS {
                let mask = 1u64 << bit;
                let ones = vectors.iter().filter(|v| v.words[w] & mask != 0).count();
                let set = match (2 * ones).cmp(&n) {
                    std::cmp::Ordering::Greater => true,
                    std::cmp::Ordering::Less => false,
                    std::cmp::Ordering::Equal => tie_breaker & mask != 0,
                };
                if set {
                    word |= mask;
                }
            }
            words.push(word);
        }

        let mut result = Self { words, dim };
        result.mask_tail();
        result
    }

    fn bind(&self, other: &Self) -> Self {
        debug_assert_eq!(self.dim, other.dim);
        Self {
            words: self
                .words
                .iter()
                .zip(&other.words)
                .map(|(a, b)| a ^ b)
                .collect(),
            dim: self.dim,
        }
    }

    fn permute(&self, shift: usize) -> Self {
        if self.dim == 0 || shift % self.dim == 0 {
            return self.clone();
        }

        let mut result = Self::zeros(self.dim);
        for i in (0..self.dim).filter(|&i| self.get(i)) {
            result.set(rotated_index(i, shift, self.dim));
        }
        result
    }

    fn distance(&self, other: &Self) -> f32 {
        debug_assert_eq!(self.dim, other.dim);
        if self.dim == 0 {
            return 0.0;
        }
        let hamming: u32 = self
            .words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a ^ b).count_ones())
            .sum();
        hamming as f32 / self.dim as f32
    }
}
