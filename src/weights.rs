/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Hebbian weight matrix construction.
//!
//! The stored patterns are viewed as an N×M matrix X, one column per pattern:
//!
//! ```text
//! W = (X · Xᵗ) / N  −  (M / N) · I_N
//! ```
//!
//! The outer-product sum is accumulated in integers, so every entry is an exact
//! multiple of 1/N. Each diagonal entry of X·Xᵗ is exactly M, which makes the
//! subtracted term cancel the self-connections to an exact 0.0.
//!
//! # Invariants
//!
//! - `W[i][j] == W[j][i]` bit-for-bit.
//! - `W[i][i] == 0.0`.
//! - Rebuilt from scratch for every recall; never updated incrementally.

use alloc::vec::Vec;

use tracing::debug;

use crate::error::{HopfieldError, Result};
use crate::pattern::{validate_len, Pattern, Spin};

/// Square N×N weight matrix in row-major order.
///
/// Deserialisation goes through [`WeightMatrix::from_rows`], so a buffer whose
/// length is not `n × n` is rejected.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawWeights")
)]
pub struct WeightMatrix {
    n: usize,
    values: Vec<f64>,
}

/// Unchecked wire form of a [`WeightMatrix`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawWeights {
    n: usize,
    values: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawWeights> for WeightMatrix {
    type Error = HopfieldError;

    fn try_from(raw: RawWeights) -> Result<Self> {
        Self::from_rows(raw.n, raw.values)
    }
}

impl WeightMatrix {
    /// Wrap a caller-supplied row-major buffer of `n × n` weights.
    ///
    /// Only the length is checked. Symmetry is not enforced, so an
    /// out-of-contract matrix can be handed to the simulator; its recall is
    /// then bounded only by the evaluation cap.
    pub fn from_rows(n: usize, values: Vec<f64>) -> Result<Self> {
        validate_len("weight buffer", n.saturating_mul(n), values.len())?;
        Ok(Self { n, values })
    }

    /// Number of neurons N.
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Weight between neurons `i` and `j`.
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "weight index ({i}, {j}) out of range for N={}", self.n);
        self.values[i * self.n + j]
    }

    /// Row `i`: the incoming weights of neuron `i`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    /// `true` if `W[i][j] == W[j][i]` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Local field of neuron `i`: `dot(W[i], state)`.
    ///
    /// `state` must hold exactly N spins; only debug builds check this.
    pub fn local_field(&self, i: usize, state: &[Spin]) -> f64 {
        debug_assert_eq!(state.len(), self.n, "state length must equal N");
        self.row(i)
            .iter()
            .zip(state)
            .map(|(&w, &u)| w * f64::from(u))
            .sum()
    }

    /// Network energy `E(U) = −½ · Uᵗ · W · U`.
    ///
    /// Non-increasing under asynchronous sign updates when W is symmetric
    /// with a non-negative diagonal. `state` must hold exactly N spins; only
    /// debug builds check this.
    pub fn energy(&self, state: &[Spin]) -> f64 {
        debug_assert_eq!(state.len(), self.n, "state length must equal N");
        let quad: f64 = state
            .iter()
            .enumerate()
            .take(self.n)
            .map(|(i, &u)| f64::from(u) * self.local_field(i, state))
            .sum();
        -0.5 * quad
    }
}

/// Build the Hebbian weight matrix for a training set.
///
/// Fails with [`HopfieldError::InvalidTrainingSet`] if `patterns` is empty and
/// with [`HopfieldError::DimensionMismatch`] if the patterns disagree on length.
pub fn generate_weight_matrix(patterns: &[Pattern]) -> Result<WeightMatrix> {
    let Some(first) = patterns.first() else {
        return Err(HopfieldError::InvalidTrainingSet);
    };
    let n = first.len();
    for p in patterns {
        validate_len("pattern", n, p.len())?;
    }
    let m = patterns.len();

    // Integer outer-product sum over the upper triangle, mirrored below.
    let mut sums = alloc::vec![0i64; n * n];
    for p in patterns {
        let x = p.as_slice();
        for i in 0..n {
            let xi = i64::from(x[i]);
            for j in i..n {
                sums[i * n + j] += xi * i64::from(x[j]);
            }
        }
    }

    let n_f = n as f64;
    let self_bias = m as f64 / n_f;
    let mut values = alloc::vec![0.0f64; n * n];
    for i in 0..n {
        for j in i..n {
            let mut w = sums[i * n + j] as f64 / n_f;
            if i == j {
                w -= self_bias;
            }
            values[i * n + j] = w;
            values[j * n + i] = w;
        }
    }

    debug!(dimension = n, patterns = m, "weight matrix generated");
    Ok(WeightMatrix { n, values })
}

// ─── Tests ──────────────────────────────────────────────────────────────────
