//! A calculator session over the matrix engine.
//!
//! The session keeps the two operands, the selected operation and the last outcome between user edits. It
//! owns its [matrix_engine::MatrixEngine] so there's no process wide state.

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::iterator_step_by_zero,
    clippy::invalid_regex,
    clippy::string_slice,
    clippy::unimplemented,
    clippy::todo
)]

pub mod errors;
pub mod input;
pub mod session;

pub use errors::SessionError;
pub use input::{parse_cell, parse_matrix};
pub use session::{CalculatorSession, Operand};
