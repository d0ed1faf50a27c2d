//! Parsing of user supplied cells and matrix literals.

use crate::errors::SessionError;
use matrix_engine::Matrix;

/// Parses a single cell. Blank cells count as zero.
pub fn parse_cell(text: &str) -> Result<f64, SessionError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0.0);
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(SessionError::InvalidCell(text.to_string())),
    }
}

/// Parses a matrix literal such as `1,2;3,4`: rows are separated by `;` and cells by `,`.
pub fn parse_matrix(text: &str) -> Result<Matrix, SessionError> {
    let rows = text
        .trim()
        .split(';')
        .map(|row| row.split(',').map(parse_cell).collect::<Result<Vec<_>, _>>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Matrix::from_rows(&rows)?)
}
