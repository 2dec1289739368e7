/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Neuron traversal order for asynchronous recall.
//!
//! Indices are 0-based. An order whose length differs from N is discarded in
//! favour of the sequential order `0..N`; an order of the right length with an
//! index ≥ N is an error.

use alloc::vec::Vec;

use tracing::warn;

use crate::error::{HopfieldError, Result};

/// The sequence in which neurons are evaluated, repeated until recall is stable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraversalOrder {
    indices: Vec<usize>,
}

impl TraversalOrder {
    /// Sequential order `0, 1, …, n−1`.
    pub fn sequential(n: usize) -> Self {
        Self { indices: (0..n).collect() }
    }

    /// Validate `indices` against a network of `n` neurons.
    ///
    /// Every index must be `< n`. Repeats are allowed; a neuron left out of
    /// the order is simply never updated.
    pub fn new(indices: Vec<usize>, n: usize) -> Result<Self> {
        if let Some(position) = indices.iter().position(|&i| i >= n) {
            return Err(HopfieldError::InvalidNeuronIndex {
                position,
                index: indices[position],
                dimension: n,
            });
        }
        Ok(Self { indices })
    }

    /// Convert a 1-based order (neuron 1 is the first neuron) to 0-based.
    ///
    /// An entry of 0 has no 0-based counterpart and is rejected.
    pub fn from_one_based(indices: &[usize], n: usize) -> Result<Self> {
        let zero_based = indices
            .iter()
            .enumerate()
            .map(|(position, &i)| {
                i.checked_sub(1).ok_or(HopfieldError::InvalidNeuronIndex {
                    position,
                    index: i,
                    dimension: n,
                })
            })
            .collect::<Result<Vec<usize>>>()?;
        Self::new(zero_based, n)
    }

    /// Pick the order for a recall over `n` neurons.
    ///
    /// `None`, or a slice whose length is not `n`, yields the sequential order.
    pub fn resolve(order: Option<&[usize]>, n: usize) -> Result<Self> {
        match order {
            Some(indices) if indices.len() == n => Self::new(indices.to_vec(), n),
            Some(indices) => {
                warn!(
                    supplied = indices.len(),
                    expected = n,
                    "traversal order has the wrong length, using sequential order"
                );
                Ok(Self::sequential(n))
            }
            None => Ok(Self::sequential(n)),
        }
    }

    /// Number of entries in one pass.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// `true` for an empty order (only possible when N = 0).
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The indices of one pass.
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// The neuron visited at evaluation number `step`, wrapping around.
    pub(crate) fn at(&self, step: usize) -> usize {
        self.indices[step % self.indices.len()]
    }
}
