//! # hopfield-core
//!
//! Discrete Hopfield associative memory: Hebbian training and asynchronous,
//! energy-descending recall.
//!
//! ---
//!
//! ## Learning and recall
//!
//! **Hebbian weights** — every trained pattern adds its outer product to the
//! weight matrix. Neurons that agree across patterns excite each other; neurons
//! that disagree inhibit each other. Self-connections are removed so no neuron
//! can hold itself in place.
//!
//! **Asynchronous recall** — starting from a noisy or partial state, neurons are
//! visited one at a time in a (configurable, repeating) order and set to the sign
//! of their local field. Each update can only lower the network energy, so the
//! state slides into the nearest stored basin and stops.
//!
//! **Fixed-point detection** — recall ends once N consecutive evaluations change
//! nothing. A defensive evaluation cap turns a malformed matrix into an explicit
//! [`HopfieldError::NonConvergence`] instead of a hang.
//!
//! ---
//!
//! ## The pipeline
//!
//! ```text
//! PatternStore → generate_weight_matrix → WeightMatrix → simulator::run → RecallOutcome
//!      ↑                                                      ↑
//!    train                                       initial state + TraversalOrder
//!      └───────────────────── HopfieldNetwork ─────────────────┘
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`pattern`] | [`Pattern`], [`PatternStore`] | Validated bipolar patterns and the training set |
//! | [`weights`] | [`WeightMatrix`] | Hebbian weight construction, local field, energy |
//! | [`order`] | [`TraversalOrder`] | Neuron visiting order with sequential fallback |
//! | [`simulator`] | [`Recall`], [`RecallOutcome`], [`RecallConfig`] | Asynchronous convergence loop and update history |
//! | [`network`] | [`HopfieldNetwork`] | `train` / `clear_training` / `predict` surface |
//! | [`grid`] | [`GridShape`] | Row-major mapping between cell grids and neurons |
//! | [`error`] | [`HopfieldError`] | Error taxonomy |
//!
//! ## Example
//!
//! ```rust
//! use hopfield_core::HopfieldNetwork;
//!
//! let mut net = HopfieldNetwork::new();
//! net.train(&[1, -1, 1, -1]).unwrap();
//!
//! let outcome = net.predict(&[1, 1, 1, -1], None).unwrap();
//! assert_eq!(outcome.final_state, [1, -1, 1, -1]);
//! assert_eq!(outcome.evaluations(), 6);
//! ```
//!
//! ## `no_std`
//!
//! This crate is `#![no_std]` by default and needs only `alloc`. Enable `std`
//! for `std::error::Error` integration, `serde` for serialisable patterns,
//! matrices and recall traces, and `python-ffi` for the PyO3 bindings.
//!
//! ## License
//!
//! Business Source License 1.1.

#![cfg_attr(not(any(feature = "std", feature = "python-ffi", test)), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

#[cfg(any(feature = "std", feature = "python-ffi"))]
extern crate std;

pub mod error;
pub mod grid;
pub mod network;
pub mod order;
pub mod pattern;
pub mod simulator;
pub mod weights;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use error::{HopfieldError, Result};
pub use grid::GridShape;
pub use network::{HopfieldNetwork, PatternMatch};
pub use order::TraversalOrder;
pub use pattern::{Pattern, PatternStore, Spin};
pub use simulator::{evolve_neuron, NetworkPhase, Recall, RecallConfig, RecallOutcome, UpdateHistory};
pub use weights::{generate_weight_matrix, WeightMatrix};
