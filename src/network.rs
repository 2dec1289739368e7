/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! The train / clear / predict surface offered to a UI or CLI collaborator.
//!
//! [`HopfieldNetwork`] owns a [`PatternStore`] and a [`RecallConfig`]. Every
//! call to [`HopfieldNetwork::predict`] rebuilds the weight matrix from the
//! current training set and runs asynchronous recall.

use alloc::vec::Vec;

use crate::error::{HopfieldError, Result};
use crate::grid::GridShape;
use crate::pattern::{validate_len, validate_spins, Pattern, PatternStore, Spin};
use crate::simulator::{run, RecallConfig, RecallOutcome};
use crate::weights::{generate_weight_matrix, WeightMatrix};

/// Fraction of N that a Hebbian network stores reliably (≈ 0.138·N).
const CAPACITY_RATIO: f64 = 0.138;

/// Nearest stored pattern to a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatternMatch {
    /// Index of the pattern in training order.
    pub index: usize,
    /// Number of differing neurons.
    pub distance: usize,
}

/// A trainable Hopfield associative memory.
#[derive(Clone, Debug, Default)]
pub struct HopfieldNetwork {
    store: PatternStore,
    config: RecallConfig,
}

impl HopfieldNetwork {
    /// An untrained network. The first pattern fixes N.
    pub fn new() -> Self {
        Self::default()
    }

    /// An untrained network of exactly `n` neurons.
    pub fn with_dimension(n: usize) -> Self {
        Self {
            store: PatternStore::with_dimension(n),
            config: RecallConfig::default(),
        }
    }

    /// An untrained network sized for a cell grid.
    pub fn for_grid(shape: GridShape) -> Self {
        Self::with_dimension(shape.len())
    }

    /// Replace the recall limits.
    pub fn with_config(mut self, config: RecallConfig) -> Self {
        self.config = config;
        self
    }

    /// Store a training pattern.
    ///
    /// Fails with [`HopfieldError::InvalidSpin`] for a non-bipolar entry and
    /// [`HopfieldError::DimensionMismatch`] if the length disagrees with N.
    pub fn train(&mut self, pattern: &[Spin]) -> Result<()> {
        self.store.add_pattern(Pattern::new(pattern.to_vec())?)
    }

    /// Forget all training patterns.
    pub fn clear_training(&mut self) {
        self.store.clear();
    }

    /// Recall from `initial`, visiting neurons in `order` (sequential if `None`
    /// or of the wrong length).
    ///
    /// Fails with [`HopfieldError::InvalidTrainingSet`] before building any
    /// matrix when nothing has been trained.
    pub fn predict(&self, initial: &[Spin], order: Option<&[usize]>) -> Result<RecallOutcome> {
        if self.store.is_empty() {
            return Err(HopfieldError::InvalidTrainingSet);
        }
        let weights = self.weights()?;
        run(&weights, initial, order, &self.config)
    }

    /// Build the weight matrix for the current training set.
    pub fn weights(&self) -> Result<WeightMatrix> {
        generate_weight_matrix(self.store.patterns())
    }

    /// The stored pattern closest to `state` by Hamming distance.
    ///
    /// Ties go to the earliest trained pattern. `None` if nothing is trained
    /// or `state` has the wrong length.
    pub fn closest_pattern(&self, state: &[Spin]) -> Option<PatternMatch> {
        if validate_len("state", self.store.dimension()?, state.len()).is_err()
            || validate_spins(state).is_err()
        {
            return None;
        }
        self.store
            .patterns()
            .iter()
            .enumerate()
            .map(|(index, p)| PatternMatch { index, distance: p.hamming_distance(state) })
            .min_by_key(|m| (m.distance, m.index))
    }

    /// Rough number of patterns N neurons can hold before recall degrades.
    pub fn capacity(&self) -> usize {
        self.store
            .dimension()
            .map_or(0, |n| (n as f64 * CAPACITY_RATIO) as usize)
    }

    /// Trained patterns, in training order.
    pub fn patterns(&self) -> &[Pattern] {
        self.store.patterns()
    }

    /// Established dimension N, if any.
    pub fn dimension(&self) -> Option<usize> {
        self.store.dimension()
    }

    /// Current recall limits.
    pub fn config(&self) -> &RecallConfig {
        &self.config
    }

    /// Every trained pattern that `state` matches exactly.
    pub fn exact_matches(&self, state: &[Spin]) -> Vec<usize> {
        self.store
            .patterns()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.as_slice() == state)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_without_training_fails() {
        let net = HopfieldNetwork::new();
        assert_eq!(net.predict(&[1, -1], None), Err(HopfieldError::InvalidTrainingSet));

        let net = HopfieldNetwork::for_grid(GridShape::default());
        assert_eq!(
            net.predict(&[-1; 9], None),
            Err(HopfieldError::InvalidTrainingSet)
        );
    }

    #[test]
    fn test_train_then_predict() {
        let mut net = HopfieldNetwork::new();
        net.train(&[1, -1, 1, -1]).unwrap();
        let out = net.predict(&[1, 1, 1, -1], None).unwrap();
        assert_eq!(out.final_state, [1, -1, 1, -1]);
    }

    #[test]
    fn test_train_rejects_dimension_change() {
        let mut net = HopfieldNetwork::new();
        net.train(&[1, -1, 1, -1]).unwrap();
        assert!(matches!(
            net.train(&[1, -1, 1]),
            Err(HopfieldError::DimensionMismatch { expected: 4, actual: 3, .. })
        ));
        assert!(matches!(net.train(&[1, 3, 1, -1]), Err(HopfieldError::InvalidSpin { .. })));
        assert_eq!(net.patterns().len(), 1);
    }

    #[test]
    fn test_clear_training() {
        let mut net = HopfieldNetwork::new();
        net.train(&[1, -1, 1, -1]).unwrap();
        net.clear_training();
        assert_eq!(net.predict(&[1, -1, 1, -1], None), Err(HopfieldError::InvalidTrainingSet));
        // The inferred dimension is released with the data.
        net.train(&[1, -1]).unwrap();
        assert_eq!(net.dimension(), Some(2));
    }

    #[test]
    fn test_closest_pattern_and_exact_matches() {
        let mut net = HopfieldNetwork::new();
        net.train(&[1, 1, 1, 1, -1, -1]).unwrap();
        net.train(&[-1, -1, 1, 1, 1, 1]).unwrap();
        assert_eq!(
            net.closest_pattern(&[1, 1, 1, -1, -1, -1]),
            Some(PatternMatch { index: 0, distance: 1 })
        );
        assert_eq!(net.closest_pattern(&[1, 1]), None);
        assert_eq!(net.exact_matches(&[-1, -1, 1, 1, 1, 1]), [1]);
        assert!(net.exact_matches(&[-1, -1, -1, 1, 1, 1]).is_empty());
    }

    #[test]
    fn test_capacity_scales_with_dimension() {
        assert_eq!(HopfieldNetwork::new().capacity(), 0);
        assert_eq!(HopfieldNetwork::with_dimension(100).capacity(), 13);
        assert_eq!(HopfieldNetwork::for_grid(GridShape::new(3, 3)).capacity(), 1);
    }

    #[test]
    fn test_custom_config_is_used() {
        let net = HopfieldNetwork::with_dimension(4).with_config(RecallConfig { max_sweeps: 3 });
        assert_eq!(net.config().max_sweeps, 3);
    }
}
