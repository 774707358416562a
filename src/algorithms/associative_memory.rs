//! Associative memory: one prototype hypervector per gesture class.
//!
//! Training bundles every encodable window of a class into its prototype.
//! Classification returns the prototype nearest to a query.

use crate::encoders::Encoder;
use crate::error::{EmgError, Result};
use crate::hypervector::Hypervector;
use crate::types::{Label, Sequence};
use tracing::debug;

/// Class prototypes ordered by the class they stand for.
///
/// Index 0 is the class of the smallest training label, index 1 the next class
/// encountered, and so on.
///
/// # Example
///
/// ```rust
/// use hdemg::algorithms::AssociativeMemory;
/// use hdemg::hypervector::BinaryHypervector;
///
/// let am = AssociativeMemory::from_prototypes(vec![
///     BinaryHypervector::from_bits(&[true, true, false, false]),
///     BinaryHypervector::from_bits(&[false, false, true, true]),
/// ]);
///
/// let query = BinaryHypervector::from_bits(&[false, true, true, true]);
/// assert_eq!(am.search(&query).unwrap(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AssociativeMemory<V> {
    prototypes: Vec<V>,
    labels: Vec<Label>,
}

impl<V: Hypervector> AssociativeMemory<V> {
    /// Wraps prototypes built elsewhere. Labels are assigned 1, 2, 3, ... in order.
    pub fn from_prototypes(prototypes: Vec<V>) -> Self {
        let labels = (1..=prototypes.len())
            .map(|l| Label::try_from(l).unwrap_or(Label::MAX))
            .collect();
        Self { prototypes, labels }
    }

    /// Trains one prototype per label run of `sequence`.
    ///
    /// The scan starts in the class of the smallest label. Every time the label at a
    /// window start differs from the current class, the windows gathered so far are
    /// bundled into a prototype and the scan switches class. Windows whose first and
    /// last label differ straddle a class change and are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`EmgError::EmptyClass`] if a class has no window to bundle (including
    /// a sequence that does not start with its smallest label), or an encoder error.
    pub fn train<E>(encoder: &E, sequence: &Sequence) -> Result<Self>
    where
        E: Encoder<Output = V>,
    {
        let min = sequence.min_label().ok_or(EmgError::InvalidParameter {
            name: "sequence",
            message: "Training sequence is empty".to_string(),
        })?;

        let n = encoder.window();
        let labels = sequence.labels();

        let mut memory = Self {
            prototypes: Vec::new(),
            labels: Vec::new(),
        };
        let mut current = min;
        let mut encoded: Vec<V> = Vec::new();

        for i in 0..sequence.window_count(n) {
            if labels[i] != current {
                memory.push_class(current, &mut encoded)?;
                current = labels[i];
            }

            if labels[i] == labels[i + n - 1] {
                encoded.push(encoder.encode(i, sequence)?);
            }
        }

        memory.push_class(current, &mut encoded)?;
        Ok(memory)
    }

    fn push_class(&mut self, label: Label, encoded: &mut Vec<V>) -> Result<()> {
        if encoded.is_empty() {
            return Err(EmgError::EmptyClass { label });
        }

        debug!(label, windows = encoded.len(), "bundling class prototype");
        self.prototypes.push(V::bundle(encoded));
        self.labels.push(label);
        encoded.clear();
        Ok(())
    }

    /// Returns the index of the prototype nearest to `query` and its distance.
    /// Ties go to the lowest index.
    ///
    /// # Errors
    ///
    /// Returns [`EmgError::EmptyMemory`] if there are no prototypes.
    pub fn nearest(&self, query: &V) -> Result<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (i, prototype) in self.prototypes.iter().enumerate() {
            let dist = query.distance(prototype);
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((i, dist));
            }
        }
        best.ok_or(EmgError::EmptyMemory)
    }

    /// Returns the index of the prototype nearest to `query`.
    ///
    /// # Errors
    ///
    /// Returns [`EmgError::EmptyMemory`] if there are no prototypes.
    pub fn search(&self, query: &V) -> Result<usize> {
        self.nearest(query).map(|(i, _)| i)
    }

    /// Prototype vectors in class order.
    pub fn prototypes(&self) -> &[V] {
        &self.prototypes
    }

    /// Training label each prototype was bundled from.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Number of prototypes.
    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    /// Returns true if there are no prototypes.
    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}
