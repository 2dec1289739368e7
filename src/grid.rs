/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Row-major mapping between a `rows × cols` cell grid and neuron indices.
//!
//! Neuron `i` sits at row `i / cols`, column `i % cols`. Drawing the grid is the
//! caller's business; this module only converts between cells and vectors.

use alloc::vec::Vec;

use crate::error::Result;
use crate::pattern::{validate_len, Pattern, Spin};

/// Dimensions of a pattern grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridShape {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl GridShape {
    /// A `rows × cols` grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of cells, and so of neurons (N).
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// `true` if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Neuron index of cell `(row, col)`, or `None` outside the grid.
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Cell `(row, col)` of neuron `i`, or `None` outside the grid.
    pub fn coords(&self, i: usize) -> Option<(usize, usize)> {
        (i < self.len()).then(|| (i / self.cols, i % self.cols))
    }

    /// Stack on/off cells row by row into a pattern.
    ///
    /// Every row must have exactly `cols` cells and there must be `rows` rows.
    pub fn flatten(&self, cells: &[Vec<bool>]) -> Result<Pattern> {
        validate_len("grid rows", self.rows, cells.len())?;
        let mut flat = Vec::with_capacity(self.len());
        for row in cells {
            validate_len("grid row", self.cols, row.len())?;
            flat.extend_from_slice(row);
        }
        Ok(Pattern::from_cells(&flat))
    }

    /// Split a state vector back into rows.
    pub fn to_rows(&self, state: &[Spin]) -> Result<Vec<Vec<Spin>>> {
        validate_len("state", self.len(), state.len())?;
        if self.cols == 0 {
            return Ok(alloc::vec![Vec::new(); self.rows]);
        }
        Ok(state.chunks(self.cols).map(<[Spin]>::to_vec).collect())
    }
}

impl Default for GridShape {
    /// 3 × 3, the smallest grid that holds a recognisable glyph.
    fn default() -> Self {
        Self { rows: 3, cols: 3 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_and_coords_are_inverse() {
        let g = GridShape::new(3, 4);
        assert_eq!(g.len(), 12);
        for i in 0..g.len() {
            let (r, c) = g.coords(i).unwrap();
            assert_eq!(g.index(r, c), Some(i));
        }
        assert_eq!(g.index(1, 2), Some(6));
        assert_eq!(g.index(3, 0), None);
        assert_eq!(g.coords(12), None);
    }

    #[test]
    fn test_flatten_is_row_major() {
        let g = GridShape::new(2, 3);
        let p = g
            .flatten(&[vec![true, false, false], vec![false, true, true]])
            .unwrap();
        assert_eq!(p.as_slice(), &[1, -1, -1, -1, 1, 1]);
    }

    #[test]
    fn test_flatten_rejects_ragged_grid() {
        let g = GridShape::new(2, 2);
        assert!(g.flatten(&[vec![true, false], vec![true]]).is_err());
        assert!(g.flatten(&[vec![true, false]]).is_err());
    }

    #[test]
    fn test_to_rows() {
        let g = GridShape::new(2, 2);
        assert_eq!(g.to_rows(&[1, -1, -1, 1]).unwrap(), vec![vec![1, -1], vec![-1, 1]]);
        assert!(g.to_rows(&[1, -1, -1]).is_err());
    }
}
