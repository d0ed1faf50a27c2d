//! Matrix.

use crate::errors::EngineError;

/// The smallest number of rows or columns a matrix can have.
pub const MIN_DIMENSION: u16 = 1;

/// The largest number of rows or columns a matrix can have.
pub const MAX_DIMENSION: u16 = 10;

/// Checks that a shape is within `[MIN_DIMENSION, MAX_DIMENSION]` in both directions.
pub fn check_dimensions(rows: usize, cols: usize) -> Result<(u16, u16), EngineError> {
    let out_of_range = || EngineError::DimensionOutOfRange { rows, cols };
    let nrows = u16::try_from(rows).map_err(|_| out_of_range())?;
    let ncols = u16::try_from(cols).map_err(|_| out_of_range())?;
    let range = MIN_DIMENSION..=MAX_DIMENSION;
    if !range.contains(&nrows) || !range.contains(&ncols) {
        return Err(out_of_range());
    }
    Ok((nrows, ncols))
}

/// A dense matrix of finite doubles stored in row-major order.
///
/// Element `(i, j)` lives at index `i * ncols + j` of [Matrix::data].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "crate::serde::MatrixRepr", into = "crate::serde::MatrixRepr"))]
pub struct Matrix {
    /// Matrix.
    data: Vec<f64>,

    /// Number of rows.
    nrows: u16,

    /// Number of columns.
    ncols: u16,
}

impl Matrix {
    /// New matrix from a flattened row-major array.
    pub fn new(data: Vec<f64>, nrows: u16, ncols: u16) -> Result<Matrix, EngineError> {
        check_dimensions(nrows.into(), ncols.into())?;
        let expected = usize::from(nrows) * usize::from(ncols);
        if data.len() != expected {
            return Err(EngineError::ElementCount { expected, actual: data.len() });
        }
        let matrix = Matrix { data, nrows, ncols };
        if let Some((row, col)) = matrix.first_non_finite() {
            return Err(EngineError::NonFiniteElement { row, col });
        }
        Ok(matrix)
    }

    /// New matrix from a list of rows. All rows must have the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Matrix, EngineError> {
        let ncols = rows.first().map(Vec::len).unwrap_or_default();
        let (nrows, ncols) = check_dimensions(rows.len(), ncols)?;
        let expected = usize::from(nrows) * usize::from(ncols);
        let data: Vec<f64> = rows.iter().flatten().copied().collect();
        if rows.iter().any(|row| row.len() != usize::from(ncols)) {
            return Err(EngineError::ElementCount { expected, actual: data.len() });
        }
        Matrix::new(data, nrows, ncols)
    }

    /// Zero matrix.
    pub fn zero(nrows: u16, ncols: u16) -> Result<Matrix, EngineError> {
        check_dimensions(nrows.into(), ncols.into())?;
        Ok(Matrix::zeroed(nrows, ncols))
    }

    /// Identity matrix.
    pub fn identity(n: u16) -> Result<Matrix, EngineError> {
        let mut m = Matrix::zero(n, n)?;
        for i in 0..n {
            *m.entry_mut(i, i)? = 1.0;
        }
        Ok(m)
    }

    /// Builds a zero matrix without checking the bounds. Callers derive the shape from existing matrices.
    pub(crate) fn zeroed(nrows: u16, ncols: u16) -> Matrix {
        let data = vec![0.0; usize::from(nrows) * usize::from(ncols)];
        Matrix { data, nrows, ncols }
    }

    /// Wraps computed data without re-validating it. The engine rejects non-finite results before they
    /// reach callers.
    pub(crate) fn from_parts(data: Vec<f64>, nrows: u16, ncols: u16) -> Matrix {
        Matrix { data, nrows, ncols }
    }

    /// Returns the reference to data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Returns the data as a Vec consuming the matrix.
    pub fn to_vec(self) -> Vec<f64> {
        self.data
    }

    /// Position of the first NaN or infinite element, as `(row, col)`.
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        let cols = usize::from(self.ncols.max(1));
        self.data.iter().position(|value| !value.is_finite()).map(|index| (index / cols, index % cols))
    }

    /// Number of rows.
    pub fn nrows(&self) -> u16 {
        self.nrows
    }

    /// Number of columns.
    pub fn ncols(&self) -> u16 {
        self.ncols
    }

    /// The `(rows, cols)` pair.
    pub fn shape(&self) -> (u16, u16) {
        (self.nrows, self.ncols)
    }

    /// Whether the matrix has as many rows as columns.
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    fn index(&self, row: u16, col: u16) -> Result<usize, EngineError> {
        if row >= self.nrows || col >= self.ncols {
            return Err(EngineError::IndexOutOfBounds { row: row.into(), col: col.into() });
        }
        Ok(usize::from(row) * usize::from(self.ncols) + usize::from(col))
    }

    /// Get the matrix entry `M[row,col]`.
    pub fn entry(&self, row: u16, col: u16) -> Result<f64, EngineError> {
        let index = self.index(row, col)?;
        self.data.get(index).copied().ok_or(EngineError::IndexOutOfBounds { row: row.into(), col: col.into() })
    }

    /// Get the matrix entry `M[row,col]`.
    pub(crate) fn entry_mut(&mut self, row: u16, col: u16) -> Result<&mut f64, EngineError> {
        let index = self.index(row, col)?;
        self.data.get_mut(index).ok_or(EngineError::IndexOutOfBounds { row: row.into(), col: col.into() })
    }

    /// Returns a copy of this matrix with `M[row,col]` replaced by `value`.
    pub fn with_entry(&self, row: u16, col: u16, value: f64) -> Result<Matrix, EngineError> {
        if !value.is_finite() {
            return Err(EngineError::NonFiniteElement { row: row.into(), col: col.into() });
        }
        let mut m = self.clone();
        *m.entry_mut(row, col)? = value;
        Ok(m)
    }

    /// Iterates over the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(usize::from(self.ncols.max(1)))
    }

    /// Copies the matrix into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    /// Swaps two rows in place.
    pub(crate) fn swap_rows(&mut self, a: u16, b: u16) -> Result<(), EngineError> {
        for col in 0..self.ncols {
            let left = self.index(a, col)?;
            let right = self.index(b, col)?;
            self.data.swap(left, right);
        }
        Ok(())
    }

    /// Whether both matrices have the same shape and every pair of entries differs by at most `tolerance`.
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        self.shape() == other.shape()
            && self.data.iter().zip(&other.data).all(|(left, right)| (left - right).abs() <= tolerance)
    }
}
