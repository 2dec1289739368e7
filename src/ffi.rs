//! Python FFI bindings via PyO3.
//!
//! Exposes the train / clear / predict surface so a Python GUI can drive the
//! engine and render the returned history.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from hopfield_core import HopfieldNetwork
//!
//! net = HopfieldNetwork(dimension=4)
//! net.train([1, -1, 1, -1])
//! final, history = net.predict([1, 1, 1, -1])
//! print(final)         # [1, -1, 1, -1]
//! print(len(history))  # 6
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::error::HopfieldError;
use crate::network::HopfieldNetwork as RustHopfieldNetwork;
use crate::pattern::{Pattern, Spin};
use crate::simulator::RecallConfig;
use crate::weights;

fn to_py_err(e: HopfieldError) -> PyErr {
    match e {
        HopfieldError::NonConvergence { .. } => PyRuntimeError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

/// Hopfield associative memory.
///
/// Example::
///
///     net = HopfieldNetwork()
///     net.train([1, -1, 1, -1])
///     final, history = net.predict([1, 1, 1, -1], order=[3, 2, 1, 0])
#[pyclass(name = "HopfieldNetwork")]
pub struct PyHopfieldNetwork {
    inner: RustHopfieldNetwork,
}

#[pymethods]
impl PyHopfieldNetwork {
    /// Create an untrained network.
    ///
    /// Args:
    ///     dimension:  number of neurons; inferred from the first pattern if omitted
    ///     max_sweeps: recall gives up after this many passes over the network (default 100)
    #[new]
    #[pyo3(signature = (dimension=None, max_sweeps=100))]
    pub fn new(dimension: Option<usize>, max_sweeps: usize) -> Self {
        let net = match dimension {
            Some(n) => RustHopfieldNetwork::with_dimension(n),
            None => RustHopfieldNetwork::new(),
        };
        Self {
            inner: net.with_config(RecallConfig { max_sweeps }),
        }
    }

    /// Store a training pattern of -1 / +1 values.
    pub fn train(&mut self, pattern: Vec<Spin>) -> PyResult<()> {
        self.inner.train(&pattern).map_err(to_py_err)
    }

    /// Forget all training patterns.
    pub fn clear_training(&mut self) {
        self.inner.clear_training();
    }

    /// Recall from an initial state.
    ///
    /// Args:
    ///     initial: -1 / +1 values, one per neuron
    ///     order:   0-based visiting order; sequential if omitted or of the wrong length
    ///
    /// Returns:
    ///     (final_state, history) where history holds one state per neuron evaluation
    #[pyo3(signature = (initial, order=None))]
    pub fn predict(
        &self,
        initial: Vec<Spin>,
        order: Option<Vec<usize>>,
    ) -> PyResult<(Vec<Spin>, Vec<Vec<Spin>>)> {
        let outcome = self
            .inner
            .predict(&initial, order.as_deref())
            .map_err(to_py_err)?;
        let history = outcome.history.iter().map(<[Spin]>::to_vec).collect();
        Ok((outcome.final_state, history))
    }

    /// Weight matrix for the current training set, as a list of rows.
    pub fn weights(&self) -> PyResult<Vec<Vec<f64>>> {
        let w = self.inner.weights().map_err(to_py_err)?;
        Ok((0..w.dimension()).map(|i| w.row(i).to_vec()).collect())
    }

    /// Energy of a state under the current weights.
    pub fn energy(&self, state: Vec<Spin>) -> PyResult<f64> {
        let w = self.inner.weights().map_err(to_py_err)?;
        if state.len() != w.dimension() {
            return Err(PyValueError::new_err(format!(
                "state must have exactly {} elements, got {}",
                w.dimension(),
                state.len()
            )));
        }
        Ok(w.energy(&state))
    }

    /// Number of trained patterns.
    pub fn __len__(&self) -> usize {
        self.inner.patterns().len()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "HopfieldNetwork(dimension={:?}, patterns={})",
            self.inner.dimension(),
            self.inner.patterns().len()
        )
    }
}

/// Build a weight matrix directly from a list of patterns.
#[pyfunction]
pub fn generate_weight_matrix(patterns: Vec<Vec<Spin>>) -> PyResult<Vec<Vec<f64>>> {
    let patterns = patterns
        .into_iter()
        .map(Pattern::new)
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_py_err)?;
    let w = weights::generate_weight_matrix(&patterns).map_err(to_py_err)?;
    Ok((0..w.dimension()).map(|i| w.row(i).to_vec()).collect())
}

/// Hopfield associative memory Python bindings.
#[pymodule]
pub fn hopfield_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyHopfieldNetwork>()?;
    m.add_function(wrap_pyfunction!(generate_weight_matrix, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
