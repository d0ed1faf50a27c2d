//! The operations the engine can perform and their shape rules.

use crate::errors::{EngineError, ShapeConstraint};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A binary matrix operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OperationType {
    /// Element-wise sum.
    #[default]
    Addition,

    /// Element-wise difference, `left - right`.
    Subtraction,

    /// Matrix product.
    Multiplication,

    /// Multiplication by the inverse of the right operand, `left * inverse(right)`.
    Division,
}

impl OperationType {
    /// All operations in display order.
    pub const ALL: [OperationType; 4] = [Self::Addition, Self::Subtraction, Self::Multiplication, Self::Division];

    /// The label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Addition => "Addition",
            Self::Subtraction => "Subtraction",
            Self::Multiplication => "Multiplication",
            Self::Division => "Division",
        }
    }

    /// Checks that operands of shapes `left` and `right`, given as `(rows, cols)`, are valid for this operation.
    pub fn check_shapes(&self, left: (u16, u16), right: (u16, u16)) -> Result<(), EngineError> {
        let (rows1, cols1) = left;
        let (rows2, cols2) = right;
        let constraint = match self {
            Self::Addition | Self::Subtraction if rows1 != rows2 || cols1 != cols2 => ShapeConstraint::SameShape(*self),
            Self::Multiplication if cols1 != rows2 => ShapeConstraint::InnerDimensions,
            Self::Division if rows2 != cols2 => ShapeConstraint::SquareDivisor,
            Self::Division if cols1 != rows2 => ShapeConstraint::DivisorSize,
            _ => return Ok(()),
        };
        Err(constraint.into())
    }

    /// The `(rows, cols)` of the result for operands of shapes `left` and `right`.
    ///
    /// This doesn't validate the shapes, see [OperationType::check_shapes].
    pub fn result_shape(&self, left: (u16, u16), right: (u16, u16)) -> (u16, u16) {
        match self {
            Self::Addition | Self::Subtraction => left,
            Self::Multiplication | Self::Division => (left.0, right.1),
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The text didn't name a known operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown operation '{0}', expected one of addition, subtraction, multiplication, division")]
pub struct UnknownOperation(pub String);

impl FromStr for OperationType {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let operation = match s.trim().to_ascii_lowercase().as_str() {
            "addition" | "add" => Self::Addition,
            "subtraction" | "sub" => Self::Subtraction,
            "multiplication" | "mul" => Self::Multiplication,
            "division" | "div" => Self::Division,
            _ => return Err(UnknownOperation(s.to_string())),
        };
        Ok(operation)
    }
}
