//! Double precision matrix arithmetic over small, bounded matrices.
//!
//! The [engine::MatrixEngine] validates operand shapes for an [operation::OperationType] and produces a
//! [result::MatrixResult]. Division is defined as `A * inverse(B)`, never as element-wise division.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::iterator_step_by_zero,
    clippy::invalid_regex,
    clippy::string_slice,
    clippy::unimplemented,
    clippy::todo
)]
#![allow(clippy::module_inception)]

pub mod engine;
pub mod errors;
pub mod format;
pub mod matrix;
pub mod operation;
pub mod result;
#[cfg(feature = "serde")]
pub mod serde;
#[cfg(any(test, feature = "bench"))]
pub mod test_macros;

pub use engine::{EngineConfig, MatrixEngine};
pub use errors::{EngineError, ShapeConstraint};
pub use matrix::{Matrix, MAX_DIMENSION, MIN_DIMENSION};
pub use operation::OperationType;
pub use result::MatrixResult;
