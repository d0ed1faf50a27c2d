//! Serde support.
//!
//! A [Matrix] is serialized as `{ rows, cols, elements }`. Deserialization goes through [Matrix::new] so a
//! malformed document can't produce a matrix that breaks its invariants.

use crate::{errors::EngineError, matrix::Matrix};
use ::serde::{Deserialize, Serialize};

/// The wire representation of a [Matrix].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatrixRepr {
    /// Number of rows.
    pub rows: u16,

    /// Number of columns.
    pub cols: u16,

    /// Flattened row-major elements.
    pub elements: Vec<f64>,
}

impl TryFrom<MatrixRepr> for Matrix {
    type Error = EngineError;

    fn try_from(repr: MatrixRepr) -> Result<Self, Self::Error> {
        Matrix::new(repr.elements, repr.rows, repr.cols)
    }
}

impl From<Matrix> for MatrixRepr {
    fn from(matrix: Matrix) -> Self {
        let (rows, cols) = matrix.shape();
        MatrixRepr { rows, cols, elements: matrix.to_vec() }
    }
}
