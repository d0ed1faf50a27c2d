//! Session errors.

use crate::session::Operand;
use matrix_engine::EngineError;
use thiserror::Error;

/// An error surfaced to the user of a calculator session.
///
/// The messages are meant to be shown verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The requested dimensions are outside the supported range.
    #[error("Invalid matrix dimensions. Please use values between 1 and 10.")]
    InvalidDimensions,

    /// A calculation was requested before both operands had dimensions.
    #[error("Please set dimensions for both matrices")]
    MissingOperands,

    /// A cell was edited on an operand that has no dimensions yet.
    #[error("Please set dimensions for {0} first")]
    OperandNotSet(Operand),

    /// A cell's text isn't a finite number.
    #[error("'{0}' is not a valid number")]
    InvalidCell(String),

    /// The engine rejected the operands.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
