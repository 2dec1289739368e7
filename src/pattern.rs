/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Bipolar patterns and the training-pattern store.
//!
//! - [`Pattern`]: one memorised configuration over {-1, +1}^N, validated on construction.
//! - [`PatternStore`]: the ordered training set; every entry shares one dimension N.
//!
//! # Invariants
//!
//! - Every stored pattern has the same length N. The first pattern establishes N
//!   unless the store was created with an explicit dimension.
//! - A pattern is never mutated after construction; noisy variants are new patterns.

use alloc::vec::Vec;

use tracing::debug;

use crate::error::{HopfieldError, Result};

/// A single neuron value: `-1` (off) or `+1` (on).
pub type Spin = i8;

/// Check that every entry of `values` is a bipolar spin.
pub(crate) fn validate_spins(values: &[Spin]) -> Result<()> {
    match values.iter().position(|&v| v != 1 && v != -1) {
        Some(index) => Err(HopfieldError::InvalidSpin { index, value: values[index] }),
        None => Ok(()),
    }
}

/// Check that `values` has exactly `expected` entries.
pub(crate) fn validate_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(HopfieldError::DimensionMismatch { what, expected, actual })
    }
}

// ─── Pattern ────────────────────────────────────────────────────────────────

/// An immutable bipolar vector of length N.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<i8>", into = "Vec<i8>")
)]
pub struct Pattern {
    spins: Vec<Spin>,
}

impl Pattern {
    /// Build a pattern, rejecting any entry that is not -1 or +1.
    pub fn new(spins: Vec<Spin>) -> Result<Self> {
        validate_spins(&spins)?;
        Ok(Self { spins })
    }

    /// All neurons off (-1): the state of a freshly cleared grid.
    pub fn blank(n: usize) -> Self {
        Self { spins: alloc::vec![-1; n] }
    }

    /// Build a pattern from on/off cells: `true` → +1, `false` → -1.
    pub fn from_cells(cells: &[bool]) -> Self {
        Self {
            spins: cells.iter().map(|&on| if on { 1 } else { -1 }).collect(),
        }
    }

    /// Number of neurons.
    pub fn len(&self) -> usize {
        self.spins.len()
    }

    /// `true` for the zero-length pattern.
    pub fn is_empty(&self) -> bool {
        self.spins.is_empty()
    }

    /// The spins as a slice.
    pub fn as_slice(&self) -> &[Spin] {
        &self.spins
    }

    /// A copy of this pattern with the neurons at `indices` flipped.
    ///
    /// Used to build noisy recall cues. Indices out of range are rejected.
    pub fn with_flipped(&self, indices: &[usize]) -> Result<Self> {
        let mut spins = self.spins.clone();
        for (position, &i) in indices.iter().enumerate() {
            let Some(s) = spins.get_mut(i) else {
                return Err(HopfieldError::InvalidNeuronIndex {
                    position,
                    index: i,
                    dimension: self.spins.len(),
                });
            };
            *s = -*s;
        }
        Ok(Self { spins })
    }

    /// Number of positions where `state` disagrees with this pattern.
    ///
    /// Only the common prefix is compared if the lengths differ.
    pub fn hamming_distance(&self, state: &[Spin]) -> usize {
        self.spins.iter().zip(state).filter(|(a, b)| a != b).count()
    }

    /// Normalised overlap `(p · u) / N` in [-1.0, 1.0].
    ///
    /// 1.0 means identical, -1.0 means the exact inverse. Returns 0.0 for an
    /// empty pattern.
    pub fn overlap(&self, state: &[Spin]) -> f64 {
        if self.spins.is_empty() {
            return 0.0;
        }
        let dot: i64 = self
            .spins
            .iter()
            .zip(state)
            .map(|(&a, &b)| i64::from(a) * i64::from(b))
            .sum();
        dot as f64 / self.spins.len() as f64
    }
}

impl TryFrom<Vec<Spin>> for Pattern {
    type Error = HopfieldError;

    fn try_from(spins: Vec<Spin>) -> Result<Self> {
        Self::new(spins)
    }
}

impl From<Pattern> for Vec<Spin> {
    fn from(p: Pattern) -> Self {
        p.spins
    }
}

impl AsRef<[Spin]> for Pattern {
    fn as_ref(&self) -> &[Spin] {
        &self.spins
    }
}

// ─── PatternStore ───────────────────────────────────────────────────────────

/// Ordered training set of equal-length patterns.
///
/// Insertion order only matters for reproducibility; the weight rule is a sum.
#[derive(Clone, Debug, Default)]
pub struct PatternStore {
    patterns: Vec<Pattern>,
    /// Established dimension N, if any.
    dimension: Option<usize>,
    /// `true` when N was configured up front and must survive `clear()`.
    fixed_dimension: bool,
}

impl PatternStore {
    /// An empty store. The first pattern added fixes N.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store that only accepts patterns of length `n`.
    pub fn with_dimension(n: usize) -> Self {
        Self {
            patterns: Vec::new(),
            dimension: Some(n),
            fixed_dimension: true,
        }
    }

    /// Append a pattern.
    ///
    /// Fails with [`HopfieldError::DimensionMismatch`] if its length differs
    /// from the established N.
    pub fn add_pattern(&mut self, pattern: Pattern) -> Result<()> {
        if let Some(n) = self.dimension {
            validate_len("pattern", n, pattern.len())?;
        } else {
            self.dimension = Some(pattern.len());
        }
        self.patterns.push(pattern);
        debug!(
            dimension = self.dimension.unwrap_or(0),
            patterns = self.patterns.len(),
            "pattern stored"
        );
        Ok(())
    }

    /// Discard all stored patterns.
    ///
    /// A dimension set with [`PatternStore::with_dimension`] is kept; one
    /// inferred from the first pattern is released.
    pub fn clear(&mut self) {
        self.patterns.clear();
        if !self.fixed_dimension {
            self.dimension = None;
        }
        debug!("training data cleared");
    }

    /// Read-only view of the stored patterns, in insertion order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Number of stored patterns (M).
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// `true` if nothing has been trained.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The established dimension N, if any.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
