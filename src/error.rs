/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Error taxonomy for training and recall.
//!
//! Every failure is reported to the caller. Nothing is retried internally:
//! continued traversal during recall is normal convergence, not recovery.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, HopfieldError>;

/// Errors raised by the pattern store, the weight builder and the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HopfieldError {
    /// No patterns have been trained, so no weight matrix can be built.
    #[error("training set is empty: train at least one pattern before recall")]
    InvalidTrainingSet,

    /// A vector's length disagrees with the established network dimension.
    #[error("{what} has length {actual}, expected {expected}")]
    DimensionMismatch {
        /// What was being validated ("pattern", "initial state", ...).
        what: &'static str,
        /// The established dimension.
        expected: usize,
        /// The length that was supplied.
        actual: usize,
    },

    /// A neuron value outside {-1, +1}.
    #[error("value {value} at index {index} is not a bipolar spin (-1 or +1)")]
    InvalidSpin {
        /// Position of the offending entry.
        index: usize,
        /// The offending value.
        value: i8,
    },

    /// A traversal order or flip list names a neuron that does not exist.
    #[error("entry {position} refers to neuron {index}, but the network has {dimension} neurons")]
    InvalidNeuronIndex {
        /// Position within the supplied index list.
        position: usize,
        /// The out-of-range neuron index.
        index: usize,
        /// Number of neurons in the network.
        dimension: usize,
    },

    /// The evaluation cap was hit before N consecutive evaluations left the state unchanged.
    #[error("recall did not converge within {limit} evaluations (performed {evaluations})")]
    NonConvergence {
        /// Evaluations performed before giving up.
        evaluations: usize,
        /// The configured cap.
        limit: usize,
    },
}
