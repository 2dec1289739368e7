/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Asynchronous recall: single-neuron sign updates until a fixed point.
//!
//! - [`evolve_neuron`]: the sign activation rule for one neuron.
//! - [`Recall`]: a step-wise recall run over a repeating [`TraversalOrder`].
//! - [`run`]: drive a [`Recall`] to [`NetworkPhase::Stable`].
//!
//! # Convergence
//!
//! `stable_count` counts consecutive evaluations, across wrap-arounds of the
//! order, that left the evaluated neuron unchanged. Any change resets it. The
//! run is Stable as soon as it reaches N: every neuron, the last time it was
//! visited, already agreed with its activation rule.
//!
//! For a symmetric, zero-diagonal matrix the energy never rises, and the state
//! space is finite, so a fixed point is always reached. The evaluation cap in
//! [`RecallConfig`] bounds runs on matrices outside that contract.
//!
//! # Invariants
//!
//! - A zero local field resolves to +1.
//! - One history snapshot per evaluation, changed or not.

use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::error::{HopfieldError, Result};
use crate::order::TraversalOrder;
use crate::pattern::{validate_len, validate_spins, Spin};
use crate::weights::WeightMatrix;

// ─── Configuration ──────────────────────────────────────────────────────────

/// Recall limits.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecallConfig {
    /// Maximum number of sweeps (N evaluations each) before giving up with
    /// [`HopfieldError::NonConvergence`].
    ///
    /// Default: 100.
    pub max_sweeps: usize,
}

impl RecallConfig {
    /// Total evaluation cap for a network of `n` neurons.
    ///
    /// Never below `n`, so that a stable start can always be certified.
    pub fn evaluation_limit(&self, n: usize) -> usize {
        self.max_sweeps.max(1).saturating_mul(n)
    }
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self { max_sweeps: 100 }
    }
}

// ─── Phase ──────────────────────────────────────────────────────────────────

/// Logical state of a recall run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkPhase {
    /// Still evaluating neurons.
    Active,
    /// N consecutive evaluations changed nothing. Terminal.
    Stable,
}

// ─── History ────────────────────────────────────────────────────────────────

/// Per-evaluation state snapshots, stored flat with stride N.
///
/// Consumed by renderers and diagnostics; the convergence decision never
/// reads it.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateHistory {
    stride: usize,
    states: Vec<Spin>,
}

impl UpdateHistory {
    fn with_stride(stride: usize) -> Self {
        Self { stride, states: Vec::new() }
    }

    fn push(&mut self, state: &[Spin]) {
        self.states.extend_from_slice(state);
    }

    /// Number of snapshots (= neuron evaluations performed).
    pub fn len(&self) -> usize {
        if self.stride == 0 {
            0
        } else {
            self.states.len() / self.stride
        }
    }

    /// `true` if no evaluation was recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot after evaluation number `step` (0-based).
    pub fn get(&self, step: usize) -> Option<&[Spin]> {
        let start = step.checked_mul(self.stride)?;
        self.states.get(start..start + self.stride)
    }

    /// The most recent snapshot.
    pub fn last(&self) -> Option<&[Spin]> {
        self.len().checked_sub(1).and_then(|s| self.get(s))
    }

    /// Snapshots in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &[Spin]> {
        self.states.chunks_exact(self.stride.max(1))
    }
}

// ─── Outcome ────────────────────────────────────────────────────────────────

/// Result of a completed recall.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecallOutcome {
    /// The state the run was seeded with.
    pub initial_state: Vec<Spin>,
    /// The stable state.
    pub final_state: Vec<Spin>,
    /// One snapshot per evaluation.
    pub history: UpdateHistory,
    /// Number of evaluations that flipped a neuron.
    pub flips: usize,
}

impl RecallOutcome {
    /// Total neuron evaluations performed.
    pub fn evaluations(&self) -> usize {
        self.history.len()
    }
}

// ─── Activation ─────────────────────────────────────────────────────────────

/// Next value of neuron `i`: +1 if `dot(W[i], U) ≥ 0`, else −1.
///
/// `state` must hold exactly N spins; only debug builds check this.
pub fn evolve_neuron(weights: &WeightMatrix, state: &[Spin], i: usize) -> Spin {
    if weights.local_field(i, state) < 0.0 {
        -1
    } else {
        1
    }
}

// ─── Recall ─────────────────────────────────────────────────────────────────

/// A recall run in progress.
///
/// Owns its state vector and history. Call [`Recall::step`] to evaluate one
/// neuron at a time, or [`run`] to go straight to the stable state.
#[derive(Debug)]
pub struct Recall<'w> {
    weights: &'w WeightMatrix,
    order: TraversalOrder,
    initial_state: Vec<Spin>,
    state: Vec<Spin>,
    history: UpdateHistory,
    stable_count: usize,
    evaluations: usize,
    flips: usize,
    limit: usize,
    phase: NetworkPhase,
}

impl<'w> Recall<'w> {
    /// Seed a run.
    ///
    /// `initial` must have length N and contain only ±1. `order` follows
    /// [`TraversalOrder::resolve`]. An empty network (N = 0) is Stable at once.
    pub fn new(
        weights: &'w WeightMatrix,
        initial: &[Spin],
        order: Option<&[usize]>,
        config: &RecallConfig,
    ) -> Result<Self> {
        let n = weights.dimension();
        validate_len("initial state", n, initial.len())?;
        validate_spins(initial)?;
        let order = TraversalOrder::resolve(order, n)?;

        Ok(Self {
            weights,
            order,
            initial_state: initial.to_vec(),
            state: initial.to_vec(),
            history: UpdateHistory::with_stride(n),
            stable_count: 0,
            evaluations: 0,
            flips: 0,
            limit: config.evaluation_limit(n),
            phase: if n == 0 { NetworkPhase::Stable } else { NetworkPhase::Active },
        })
    }

    /// Evaluate the next neuron in the order.
    ///
    /// Returns the phase after the evaluation. Once Stable, further calls are
    /// no-ops. Fails with [`HopfieldError::NonConvergence`] when the cap is
    /// reached while still Active.
    pub fn step(&mut self) -> Result<NetworkPhase> {
        if self.phase == NetworkPhase::Stable {
            return Ok(NetworkPhase::Stable);
        }
        if self.evaluations >= self.limit {
            return Err(HopfieldError::NonConvergence {
                evaluations: self.evaluations,
                limit: self.limit,
            });
        }

        let i = self.order.at(self.evaluations);
        let next = evolve_neuron(self.weights, &self.state, i);
        if next != self.state[i] {
            trace!(neuron = i, value = next, step = self.evaluations, "neuron flipped");
            self.stable_count = 0;
            self.flips += 1;
        } else {
            self.stable_count += 1;
        }
        self.state[i] = next;
        self.history.push(&self.state);
        self.evaluations += 1;

        if self.stable_count >= self.state.len() {
            self.phase = NetworkPhase::Stable;
            debug!(evaluations = self.evaluations, flips = self.flips, "recall reached a stable state");
        }
        Ok(self.phase)
    }

    /// Current phase.
    pub fn phase(&self) -> NetworkPhase {
        self.phase
    }

    /// Current state vector.
    pub fn state(&self) -> &[Spin] {
        &self.state
    }

    /// Consecutive unchanged evaluations so far.
    pub fn stable_count(&self) -> usize {
        self.stable_count
    }

    /// Evaluations performed so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// The order being traversed.
    pub fn order(&self) -> &TraversalOrder {
        &self.order
    }

    /// History recorded so far.
    pub fn history(&self) -> &UpdateHistory {
        &self.history
    }

    /// Consume the run and return its outcome, whatever the phase.
    pub fn into_outcome(self) -> RecallOutcome {
        RecallOutcome {
            initial_state: self.initial_state,
            final_state: self.state,
            history: self.history,
            flips: self.flips,
        }
    }
}

/// Run asynchronous recall from `initial` to a stable state.
pub fn run(
    weights: &WeightMatrix,
    initial: &[Spin],
    order: Option<&[usize]>,
    config: &RecallConfig,
) -> Result<RecallOutcome> {
    let mut recall = Recall::new(weights, initial, order, config)?;
    while recall.step()? == NetworkPhase::Active {}
    Ok(recall.into_outcome())
}

// ─── Tests ──────────────────────────────────────────────────────────────────
