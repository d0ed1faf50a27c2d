//! Test macros.

/// Builds a [crate::matrix::Matrix] from row literals, e.g. `matrix![[1, 2], [3, 4]]`.
///
/// Panics if the rows are ragged or out of range, so it's only meant for tests and benches.
#[macro_export]
macro_rules! matrix {
    ($([$($value:expr),* $(,)?]),+ $(,)?) => {
        $crate::matrix::Matrix::from_rows(&[$(vec![$(f64::from($value)),*]),+]).unwrap()
    };
}
