//! The calculator session.

use crate::{errors::SessionError, input::parse_cell};
use matrix_engine::{matrix::check_dimensions, EngineError, Matrix, MatrixEngine, MatrixResult, OperationType};
use std::fmt;
use tracing::{debug, warn};

/// One of the two operands of a calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// The left operand, "matrix 1".
    Left,

    /// The right operand, "matrix 2".
    Right,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "matrix 1"),
            Self::Right => write!(f, "matrix 2"),
        }
    }
}

/// The state of an interactive calculation.
///
/// Operands start unset and become zero matrices once their dimensions are chosen. Any dimension change
/// discards the last result.
#[derive(Clone, Debug, Default)]
pub struct CalculatorSession {
    engine: MatrixEngine,
    left: Option<Matrix>,
    right: Option<Matrix>,
    operation: OperationType,
    result: Option<MatrixResult>,
    error: Option<String>,
}

impl CalculatorSession {
    /// Constructs a new session that computes through `engine`.
    pub fn new(engine: MatrixEngine) -> Self {
        Self { engine, ..Default::default() }
    }

    /// The left operand, if its dimensions were set.
    pub fn left(&self) -> Option<&Matrix> {
        self.left.as_ref()
    }

    /// The right operand, if its dimensions were set.
    pub fn right(&self) -> Option<&Matrix> {
        self.right.as_ref()
    }

    /// The selected operation.
    pub fn operation(&self) -> OperationType {
        self.operation
    }

    /// The last successful result, cleared when dimensions change or a new calculation starts.
    pub fn result(&self) -> Option<&MatrixResult> {
        self.result.as_ref()
    }

    /// The message of the last error.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Forgets the last error.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn slot(&mut self, operand: Operand) -> &mut Option<Matrix> {
        match operand {
            Operand::Left => &mut self.left,
            Operand::Right => &mut self.right,
        }
    }

    fn record<T>(&mut self, outcome: Result<T, SessionError>) -> Result<T, SessionError> {
        if let Err(e) = &outcome {
            warn!("Calculator error: {e}");
            self.error = Some(e.to_string());
        }
        outcome
    }

    /// Sets the dimensions of an operand, resetting all its cells to zero.
    pub fn set_dimensions(&mut self, operand: Operand, rows: usize, cols: usize) -> Result<(), SessionError> {
        let outcome = check_dimensions(rows, cols)
            .map_err(|_| SessionError::InvalidDimensions)
            .and_then(|(rows, cols)| Ok(Matrix::zero(rows, cols)?));
        let matrix = self.record(outcome)?;
        debug!("Setting {operand} to {rows}x{cols}");
        *self.slot(operand) = Some(matrix);
        self.result = None;
        Ok(())
    }

    /// Replaces an operand wholesale, discarding the last result.
    pub fn set_matrix(&mut self, operand: Operand, matrix: Matrix) {
        debug!("Replacing {operand} with a {}x{} matrix", matrix.nrows(), matrix.ncols());
        *self.slot(operand) = Some(matrix);
        self.result = None;
    }

    /// Replaces a single cell of an operand.
    pub fn update_value(&mut self, operand: Operand, row: usize, col: usize, value: f64) -> Result<(), SessionError> {
        let outcome = match self.slot(operand) {
            Some(matrix) => cell_index(row, col).and_then(|(row, col)| Ok(matrix.with_entry(row, col, value)?)),
            None => Err(SessionError::OperandNotSet(operand)),
        };
        let updated = self.record(outcome)?;
        *self.slot(operand) = Some(updated);
        Ok(())
    }

    /// Replaces a single cell of an operand from user text. Blank text is zero.
    pub fn set_cell_text(&mut self, operand: Operand, row: usize, col: usize, text: &str) -> Result<(), SessionError> {
        let value = self.record(parse_cell(text))?;
        self.update_value(operand, row, col, value)
    }

    /// Selects the operation for the next calculation.
    pub fn set_operation(&mut self, operation: OperationType) {
        self.operation = operation;
    }

    /// Checks that both operands are set and that their shapes suit the selected operation.
    pub fn validate(&self) -> Result<(&Matrix, &Matrix), SessionError> {
        let (Some(left), Some(right)) = (&self.left, &self.right) else {
            return Err(SessionError::MissingOperands);
        };
        self.operation.check_shapes(left.shape(), right.shape())?;
        Ok((left, right))
    }

    /// Runs the selected operation, replacing any previous result or error.
    pub fn calculate(&mut self) -> Result<&MatrixResult, SessionError> {
        self.error = None;
        self.result = None;
        let outcome = self
            .validate()
            .and_then(|(left, right)| Ok(self.engine.compute(self.operation, left, right)?));
        let result = self.record(outcome)?;
        debug!("{} produced a {}x{} result", result.operation(), result.rows(), result.cols());
        Ok(self.result.insert(result))
    }
}

fn cell_index(row: usize, col: usize) -> Result<(u16, u16), SessionError> {
    match (u16::try_from(row), u16::try_from(col)) {
        (Ok(row), Ok(col)) => Ok((row, col)),
        _ => Err(EngineError::IndexOutOfBounds { row, col }.into()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use matrix_engine::{matrix, ShapeConstraint};
    use rstest::rstest;
    use test_logger::{tracing, Tracing};

    fn session_2x2(left: &[f64], right: &[f64]) -> CalculatorSession {
        let mut session = CalculatorSession::new(MatrixEngine::default());
        session.set_dimensions(Operand::Left, 2, 2).unwrap();
        session.set_dimensions(Operand::Right, 2, 2).unwrap();
        for (index, value) in left.iter().enumerate() {
            session.update_value(Operand::Left, index / 2, index % 2, *value).unwrap();
        }
        for (index, value) in right.iter().enumerate() {
            session.update_value(Operand::Right, index / 2, index % 2, *value).unwrap();
        }
        session
    }

    #[rstest]
    fn dimensions_initialise_zeros(_tracing: &Tracing) {
        let mut session = CalculatorSession::default();
        session.set_dimensions(Operand::Left, 2, 3).unwrap();
        assert_eq!(session.left(), Some(&matrix![[0, 0, 0], [0, 0, 0]]));
        assert_eq!(session.right(), None);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(11, 2)]
    #[case(3, 11)]
    fn invalid_dimensions(_tracing: &Tracing, #[case] rows: usize, #[case] cols: usize) {
        let mut session = CalculatorSession::default();
        let result = session.set_dimensions(Operand::Right, rows, cols).unwrap_err();
        assert_eq!(result, SessionError::InvalidDimensions);
        assert_eq!(session.error(), Some("Invalid matrix dimensions. Please use values between 1 and 10."));
        assert_eq!(session.right(), None);
    }

    #[rstest]
    fn calculate_addition(_tracing: &Tracing) {
        let mut session = session_2x2(&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 7.0, 8.0]);
        let result = session.calculate().unwrap();
        assert_eq!(result.matrix(), &matrix![[6, 8], [10, 12]]);
        assert_eq!(result.operation(), OperationType::Addition);
        assert!(session.error().is_none());
    }

    #[rstest]
    fn calculate_division(_tracing: &Tracing) {
        let mut session = session_2x2(&[1.0, 0.0, 0.0, 1.0], &[4.0, 7.0, 2.0, 6.0]);
        session.set_operation(OperationType::Division);
        let result = session.calculate().unwrap();
        assert!(result.matrix().approx_eq(&matrix![[0.6, -0.7], [-0.2, 0.4]], 1e-9));
    }

    #[rstest]
    fn singular_division_sets_error(_tracing: &Tracing) {
        let mut session = session_2x2(&[1.0, 2.0, 3.0, 4.0], &[0.0; 4]);
        session.set_operation(OperationType::Division);
        let result = session.calculate().unwrap_err();
        assert_eq!(result, SessionError::Engine(EngineError::SingularMatrix));
        assert_eq!(session.error(), Some("matrix 2 is singular and can't be inverted"));
        assert!(session.result().is_none());

        session.clear_error();
        assert!(session.error().is_none());
    }

    #[rstest]
    fn missing_operands(_tracing: &Tracing) {
        let mut session = CalculatorSession::default();
        session.set_dimensions(Operand::Left, 2, 2).unwrap();
        assert_eq!(session.calculate().unwrap_err(), SessionError::MissingOperands);
        assert_eq!(session.error(), Some("Please set dimensions for both matrices"));
    }

    #[rstest]
    fn shape_mismatch_before_computation(_tracing: &Tracing) {
        let mut session = CalculatorSession::default();
        session.set_dimensions(Operand::Left, 2, 3).unwrap();
        session.set_dimensions(Operand::Right, 2, 3).unwrap();
        session.set_operation(OperationType::Multiplication);
        let result = session.calculate().unwrap_err();
        assert_eq!(result, SessionError::Engine(EngineError::ShapeMismatch(ShapeConstraint::InnerDimensions)));
    }

    #[rstest]
    fn dimension_change_discards_result(_tracing: &Tracing) {
        let mut session = session_2x2(&[1.0; 4], &[1.0; 4]);
        session.calculate().unwrap();
        assert!(session.result().is_some());

        session.set_dimensions(Operand::Right, 2, 2).unwrap();
        assert!(session.result().is_none());
        assert_eq!(session.right(), Some(&matrix![[0, 0], [0, 0]]));
    }

    #[rstest]
    fn set_matrix_replaces_operand(_tracing: &Tracing) {
        let mut session = session_2x2(&[1.0; 4], &[1.0; 4]);
        session.calculate().unwrap();
        session.set_matrix(Operand::Left, matrix![[1, 2, 3]]);
        assert!(session.result().is_none());

        session.set_matrix(Operand::Right, matrix![[1], [1], [1]]);
        session.set_operation(OperationType::Multiplication);
        assert_eq!(session.calculate().unwrap().matrix(), &matrix![[6]]);
    }

    #[rstest]
    fn update_requires_dimensions(_tracing: &Tracing) {
        let mut session = CalculatorSession::default();
        let result = session.update_value(Operand::Left, 0, 0, 1.0).unwrap_err();
        assert_eq!(result, SessionError::OperandNotSet(Operand::Left));
    }

    #[rstest]
    fn update_out_of_bounds(_tracing: &Tracing) {
        let mut session = CalculatorSession::default();
        session.set_dimensions(Operand::Left, 1, 1).unwrap();
        let result = session.update_value(Operand::Left, 0, 70_000, 1.0).unwrap_err();
        assert_eq!(result, SessionError::Engine(EngineError::IndexOutOfBounds { row: 0, col: 70_000 }));
    }

    #[rstest]
    fn cell_text(_tracing: &Tracing) {
        let mut session = CalculatorSession::default();
        session.set_dimensions(Operand::Left, 1, 2).unwrap();
        session.set_cell_text(Operand::Left, 0, 0, "2.5").unwrap();
        session.set_cell_text(Operand::Left, 0, 1, "").unwrap();
        assert_eq!(session.left(), Some(&matrix![[2.5, 0]]));

        let result = session.set_cell_text(Operand::Left, 0, 1, "x").unwrap_err();
        assert_eq!(result, SessionError::InvalidCell("x".into()));
        assert_eq!(session.left(), Some(&matrix![[2.5, 0]]));
    }
}
