//! Item memories: fixed codebooks of hypervectors built once per run.

use crate::error::{EmgError, Result};
use crate::hypervector::Hypervector;
use crate::utils::Random;

/// Independent random hypervectors, one per discrete symbol (here: channel index).
///
/// # Example
///
/// ```rust
/// use hdemg::hypervector::{Hypervector, IntegerHypervector, ItemMemory};
/// use hdemg::utils::Random;
///
/// let mut rng = Random::new(1);
/// let idm = ItemMemory::<IntegerHypervector>::new(4, 2048, &mut rng);
///
/// assert_eq!(idm.len(), 4);
/// assert!(idm.get(0).unwrap().distance(idm.get(1).unwrap()) > 0.4);
/// assert!(idm.get(4).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ItemMemory<V> {
    items: Vec<V>,
    dim: usize,
}

impl<V: Hypervector> ItemMemory<V> {
    /// Draws `count` independent vectors of `dim` components.
    pub fn new(count: usize, dim: usize, rng: &mut Random) -> Self {
        Self {
            items: (0..count).map(|_| V::random(dim, rng)).collect(),
            dim,
        }
    }

    /// Wraps explicitly constructed vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if the vectors do not share one dimensionality.
    pub fn from_items(items: Vec<V>) -> Result<Self> {
        let dim = check_uniform_dim(&items)?;
        Ok(Self { items, dim })
    }

    /// Returns the vector for symbol `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EmgError::IndexOutOfBounds`] for an unknown symbol.
    pub fn get(&self, index: usize) -> Result<&V> {
        self.items.get(index).ok_or(EmgError::IndexOutOfBounds {
            index,
            size: self.items.len(),
        })
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the memory holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Dimensionality of every stored vector.
    pub fn dim(&self) -> usize {
        self.dim
    }
}

/// Correlated hypervectors, one per quantization level.
///
/// Adjacent levels are close and the distance grows with the level gap, so similar
/// amplitudes encode to similar vectors.
#[derive(Debug, Clone)]
pub struct ContinuousItemMemory<V> {
    levels: Vec<V>,
    dim: usize,
}

impl<V: Hypervector> ContinuousItemMemory<V> {
    /// Draws a graded set of `levels` vectors of `dim` components.
    pub fn new(levels: usize, dim: usize, rng: &mut Random) -> Self {
        Self {
            levels: V::level_set(levels, dim, rng),
            dim,
        }
    }

    /// Wraps explicitly constructed level vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if the vectors do not share one dimensionality.
    pub fn from_levels(levels: Vec<V>) -> Result<Self> {
        let dim = check_uniform_dim(&levels)?;
        Ok(Self { levels, dim })
    }

    /// Returns the vector of quantization level `level`.
    ///
    /// # Errors
    ///
    /// Returns [`EmgError::IndexOutOfBounds`] past the top level.
    pub fn get(&self, level: usize) -> Result<&V> {
        self.levels.get(level).ok_or(EmgError::IndexOutOfBounds {
            index: level,
            size: self.levels.len(),
        })
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns true if the memory holds no levels.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Dimensionality of every stored vector.
    pub fn dim(&self) -> usize {
        self.dim
    }
}

fn check_uniform_dim<V: Hypervector>(items: &[V]) -> Result<usize> {
    let dim = items.first().map_or(0, Hypervector::dim);
    if let Some(bad) = items.iter().find(|v| v.dim() != dim) {
        return Err(EmgError::InvalidParameter {
            name: "items",
            message: format!("Mixed dimensionality: {} and {}", dim, bad.dim()),
        });
    }
    Ok(dim)
}
