//! Crate errors.

use crate::operation::OperationType;
use thiserror::Error;

/// An error produced while building matrices or computing a result.
///
/// Every variant is deterministic for a given input: retrying without changing the operands yields the same
/// error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The operand shapes violate the precondition of the requested operation.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(ShapeConstraint),

    /// Division was requested but the divisor has no inverse.
    #[error("matrix 2 is singular and can't be inverted")]
    SingularMatrix,

    /// A dimension falls outside the supported range.
    #[error("matrix dimensions {rows}x{cols} out of range, rows and columns must be between 1 and 10")]
    DimensionOutOfRange {
        /// The requested number of rows.
        rows: usize,

        /// The requested number of columns.
        cols: usize,
    },

    /// The flattened element array does not match the declared shape.
    #[error("matrix has {actual} elements but its shape requires {expected}")]
    ElementCount {
        /// Number of elements required by `rows * cols`.
        expected: usize,

        /// Number of elements provided.
        actual: usize,
    },

    /// An element is NaN or infinite.
    #[error("element at row {row}, column {col} is not a finite number")]
    NonFiniteElement {
        /// Row of the offending element.
        row: usize,

        /// Column of the offending element.
        col: usize,
    },

    /// The computation overflowed: a result element is NaN or infinite.
    #[error("result element at row {row}, column {col} is not a finite number")]
    NonFiniteResult {
        /// Row of the offending element.
        row: usize,

        /// Column of the offending element.
        col: usize,
    },

    /// An entry was addressed outside the matrix.
    #[error("entry ({row}, {col}) is outside the matrix")]
    IndexOutOfBounds {
        /// The requested row.
        row: usize,

        /// The requested column.
        col: usize,
    },
}

/// The shape constraint an operation requires from its operands.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeConstraint {
    /// Both operands must have the same number of rows and columns.
    #[error("matrices must have the same dimensions for {0}")]
    SameShape(OperationType),

    /// The columns of the left operand must equal the rows of the right operand.
    #[error("for multiplication, columns of matrix 1 must equal rows of matrix 2")]
    InnerDimensions,

    /// The right operand must be square so it can be inverted.
    #[error("for division, matrix 2 must be square")]
    SquareDivisor,

    /// The columns of the left operand must match the size of the square right operand.
    #[error("for division, columns of matrix 1 must equal the size of matrix 2")]
    DivisorSize,
}

impl From<ShapeConstraint> for EngineError {
    fn from(constraint: ShapeConstraint) -> Self {
        Self::ShapeMismatch(constraint)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shape_mismatch_message() {
        let error = EngineError::from(ShapeConstraint::SameShape(OperationType::Subtraction));
        assert_eq!(error.to_string(), "shape mismatch: matrices must have the same dimensions for Subtraction");
    }

    #[test]
    fn dimension_message() {
        let error = EngineError::DimensionOutOfRange { rows: 11, cols: 2 };
        assert!(error.to_string().starts_with("matrix dimensions 11x2 out of range"));
    }
}
