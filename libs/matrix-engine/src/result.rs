//! The outcome of a successful computation.

use crate::{
    format::{format_grid, DEFAULT_PRECISION},
    matrix::Matrix,
    operation::OperationType,
};
use std::fmt;

/// A computed matrix together with the operation that produced it.
///
/// Results are only created by [crate::engine::MatrixEngine] and never alias the operands' storage.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixResult {
    matrix: Matrix,
    operation: OperationType,
}

impl MatrixResult {
    pub(crate) fn new(matrix: Matrix, operation: OperationType) -> Self {
        Self { matrix, operation }
    }

    /// Number of rows.
    pub fn rows(&self) -> u16 {
        self.matrix.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> u16 {
        self.matrix.ncols()
    }

    /// The flattened row-major elements.
    pub fn elements(&self) -> &[f64] {
        self.matrix.data()
    }

    /// The operation that produced this result.
    pub fn operation(&self) -> OperationType {
        self.operation
    }

    /// The result as a matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Consumes the result and returns its matrix.
    pub fn into_matrix(self) -> Matrix {
        self.matrix
    }

    /// Reshapes the elements into rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.matrix.to_rows()
    }

    /// Renders the result with `precision` decimals, headed by the operation label and shape.
    pub fn render(&self, precision: usize) -> String {
        format!("{} ({}x{})\n{}", self.operation, self.rows(), self.cols(), format_grid(&self.matrix, precision))
    }
}

impl fmt::Display for MatrixResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_PRECISION))
    }
}
