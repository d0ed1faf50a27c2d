//! Matrix Operations

use crate::{
    errors::{EngineError, ShapeConstraint},
    matrix::Matrix,
    operation::OperationType,
};
use std::ops::{Add, Mul, Sub};

fn elementwise(
    left: &Matrix,
    right: &Matrix,
    operation: OperationType,
    op: impl Fn(f64, f64) -> f64,
) -> Result<Matrix, EngineError> {
    if left.shape() != right.shape() {
        return Err(ShapeConstraint::SameShape(operation).into());
    }
    let data = left.data().iter().zip(right.data()).map(|(l, r)| op(*l, *r)).collect();
    Ok(Matrix::from_parts(data, left.nrows(), left.ncols()))
}

impl Add<&Matrix> for &Matrix {
    type Output = Result<Matrix, EngineError>;

    /// Element-wise sum.
    fn add(self, other: &Matrix) -> Result<Matrix, EngineError> {
        elementwise(self, other, OperationType::Addition, |l, r| l + r)
    }
}

impl Sub<&Matrix> for &Matrix {
    type Output = Result<Matrix, EngineError>;

    /// Element-wise difference, `self - other`.
    fn sub(self, other: &Matrix) -> Result<Matrix, EngineError> {
        elementwise(self, other, OperationType::Subtraction, |l, r| l - r)
    }
}

impl Mul<&Matrix> for &Matrix {
    type Output = Result<Matrix, EngineError>;

    /// Naive matrix multiplication, A: MxK * B: KxN -> C: MxN, O(KMN).
    fn mul(self, other: &Matrix) -> Result<Matrix, EngineError> {
        if self.ncols() != other.nrows() {
            return Err(ShapeConstraint::InnerDimensions.into());
        }
        let mut out = Matrix::zeroed(self.nrows(), other.ncols());
        for row in 0..self.nrows() {
            for col in 0..other.ncols() {
                let mut sum = 0.0;
                for i in 0..self.ncols() {
                    sum += self.entry(row, i)? * other.entry(i, col)?;
                }
                *out.entry_mut(row, col)? = sum;
            }
        }
        Ok(out)
    }
}

impl Matrix {
    /// Returns the index of the row at or below `col` with the largest magnitude in column `col`, along
    /// with that magnitude.
    fn pivot(&self, col: u16) -> Result<(u16, f64), EngineError> {
        let mut best = (col, self.entry(col, col)?.abs());
        for row in col + 1..self.nrows() {
            let magnitude = self.entry(row, col)?.abs();
            if magnitude > best.1 {
                best = (row, magnitude);
            }
        }
        Ok(best)
    }

    /// Inverse of the matrix using Gauss-Jordan elimination with partial pivoting, O(N^3).
    ///
    /// A pivot whose magnitude is below `epsilon` marks the matrix as singular.
    pub fn inverse(&self, epsilon: f64) -> Result<Matrix, EngineError> {
        if !self.is_square() {
            return Err(ShapeConstraint::SquareDivisor.into());
        }
        let n = self.nrows();
        let mut work = self.clone();
        let mut m = Matrix::identity(n)?;

        for i in 0..n {
            let (pivot_row, magnitude) = work.pivot(i)?;
            if magnitude < epsilon {
                return Err(EngineError::SingularMatrix);
            }
            if pivot_row != i {
                work.swap_rows(i, pivot_row)?;
                m.swap_rows(i, pivot_row)?;
            }

            let v_ii = work.entry(i, i)?;
            for k in 0..n {
                *work.entry_mut(i, k)? /= v_ii;
                *m.entry_mut(i, k)? /= v_ii;
            }

            for j in 0..n {
                if i == j {
                    continue;
                }
                let v_ji = work.entry(j, i)?;
                if v_ji != 0.0 {
                    for k in 0..n {
                        let v_ik = work.entry(i, k)?;
                        *work.entry_mut(j, k)? -= v_ik * v_ji;
                        let m_ik = m.entry(i, k)?;
                        *m.entry_mut(j, k)? -= m_ik * v_ji;
                    }
                }
            }
        }

        // Ill-conditioned inputs can still overflow after elimination.
        if m.data().iter().any(|value| !value.is_finite()) {
            return Err(EngineError::SingularMatrix);
        }
        Ok(m)
    }

    /// Matrix determinant using Gaussian elimination with partial pivoting, O(N^3).
    ///
    /// Returns exactly zero once a pivot falls below `epsilon`.
    pub fn determinant(&self, epsilon: f64) -> Result<f64, EngineError> {
        if !self.is_square() {
            return Err(ShapeConstraint::SquareDivisor.into());
        }
        let n = self.nrows();
        let mut upper = self.clone();
        let mut determinant = 1.0;

        for i in 0..n {
            let (pivot_row, magnitude) = upper.pivot(i)?;
            if magnitude < epsilon {
                return Ok(0.0);
            }
            if pivot_row != i {
                upper.swap_rows(i, pivot_row)?;
                determinant = -determinant;
            }
            let v_ii = upper.entry(i, i)?;
            determinant *= v_ii;
            for j in i + 1..n {
                let r = upper.entry(j, i)? / v_ii;
                if r != 0.0 {
                    for k in i..n {
                        let v_ik = upper.entry(i, k)?;
                        *upper.entry_mut(j, k)? -= v_ik * r;
                    }
                }
            }
        }
        Ok(determinant)
    }
}
