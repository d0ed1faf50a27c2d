//! Fixed-decimal rendering of matrices for display.

use crate::matrix::Matrix;

/// Number of decimals used when no precision is configured.
pub const DEFAULT_PRECISION: usize = 4;

/// Formats a value with a fixed number of decimals. Negative zero, including values that round to zero, is
/// printed without a sign.
pub fn format_cell(value: f64, precision: usize) -> String {
    let formatted = format!("{value:.precision$}");
    match formatted.strip_prefix('-') {
        Some(unsigned) if unsigned.chars().all(|c| c == '0' || c == '.') => unsigned.to_string(),
        _ => formatted,
    }
}

/// Formats every cell of the matrix, row by row.
pub fn format_cells(matrix: &Matrix, precision: usize) -> Vec<Vec<String>> {
    matrix.rows().map(|row| row.iter().map(|value| format_cell(*value, precision)).collect()).collect()
}

/// Renders the matrix as right-aligned columns, one line per row.
pub fn format_grid(matrix: &Matrix, precision: usize) -> String {
    let cells = format_cells(matrix, precision);
    let width = cells.iter().flatten().map(String::len).max().unwrap_or_default();
    let lines: Vec<String> = cells
        .iter()
        .map(|row| row.iter().map(|cell| format!("{cell:>width$}")).collect::<Vec<_>>().join("  "))
        .collect();
    lines.join("\n")
}
