//! Matrix operations.

pub mod matrix;
pub mod ops;

pub use matrix::{check_dimensions, Matrix, MAX_DIMENSION, MIN_DIMENSION};
