//! The matrix engine.

use crate::{
    errors::EngineError,
    matrix::{check_dimensions, Matrix},
    operation::OperationType,
    result::MatrixResult,
};
use tracing::debug;

/// The pivot magnitude under which a divisor is considered singular.
pub const DEFAULT_SINGULARITY_EPSILON: f64 = 1e-10;

fn default_singularity_epsilon() -> f64 {
    DEFAULT_SINGULARITY_EPSILON
}

/// The engine configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Pivots with a magnitude below this value make the divisor singular.
    #[cfg_attr(feature = "serde", serde(default = "default_singularity_epsilon"))]
    pub singularity_epsilon: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { singularity_epsilon: default_singularity_epsilon() }
    }
}

/// Validates operand shapes and computes matrix operations.
///
/// The engine holds no state besides its configuration, so a single instance can be shared by reference
/// across threads. Every call allocates its own output.
#[derive(Clone, Debug, Default)]
pub struct MatrixEngine {
    config: EngineConfig,
}

impl MatrixEngine {
    /// Constructs a new engine.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes `operation` over `left` and `right`.
    ///
    /// Shapes are checked before any arithmetic runs.
    pub fn compute(
        &self,
        operation: OperationType,
        left: &Matrix,
        right: &Matrix,
    ) -> Result<MatrixResult, EngineError> {
        debug!("Computing {operation} of {:?} and {:?} matrices", left.shape(), right.shape());
        let result = self.dispatch(operation, left, right);
        if let Err(e) = &result {
            debug!("{operation} failed: {e}");
        }
        result
    }

    /// Computes `operation` over two flattened row-major arrays.
    ///
    /// Dimensions of both operands are checked first, then element counts of both, then non-finite elements,
    /// then the operation's shape rules.
    #[allow(clippy::too_many_arguments)]
    pub fn compute_flat(
        &self,
        operation: OperationType,
        rows1: usize,
        cols1: usize,
        elements1: &[f64],
        rows2: usize,
        cols2: usize,
        elements2: &[f64],
    ) -> Result<MatrixResult, EngineError> {
        let (rows1, cols1) = check_dimensions(rows1, cols1)?;
        let (rows2, cols2) = check_dimensions(rows2, cols2)?;
        for (rows, cols, elements) in [(rows1, cols1, elements1), (rows2, cols2, elements2)] {
            let expected = usize::from(rows) * usize::from(cols);
            if elements.len() != expected {
                return Err(EngineError::ElementCount { expected, actual: elements.len() });
            }
        }
        let left = Matrix::new(elements1.to_vec(), rows1, cols1)?;
        let right = Matrix::new(elements2.to_vec(), rows2, cols2)?;
        self.compute(operation, &left, &right)
    }

    /// Element-wise sum.
    pub fn add(&self, left: &Matrix, right: &Matrix) -> Result<MatrixResult, EngineError> {
        self.compute(OperationType::Addition, left, right)
    }

    /// Element-wise difference, `left - right`.
    pub fn subtract(&self, left: &Matrix, right: &Matrix) -> Result<MatrixResult, EngineError> {
        self.compute(OperationType::Subtraction, left, right)
    }

    /// Matrix product.
    pub fn multiply(&self, left: &Matrix, right: &Matrix) -> Result<MatrixResult, EngineError> {
        self.compute(OperationType::Multiplication, left, right)
    }

    /// `left * inverse(right)`.
    pub fn divide(&self, left: &Matrix, right: &Matrix) -> Result<MatrixResult, EngineError> {
        self.compute(OperationType::Division, left, right)
    }

    /// The inverse used by division.
    ///
    /// The matrix is singular when its determinant or any elimination pivot is below the configured epsilon
    /// in magnitude.
    pub fn inverse(&self, matrix: &Matrix) -> Result<Matrix, EngineError> {
        let epsilon = self.config.singularity_epsilon;
        if matrix.determinant(epsilon)?.abs() < epsilon {
            return Err(EngineError::SingularMatrix);
        }
        matrix.inverse(epsilon)
    }

    fn dispatch(&self, operation: OperationType, left: &Matrix, right: &Matrix) -> Result<MatrixResult, EngineError> {
        operation.check_shapes(left.shape(), right.shape())?;
        let matrix = match operation {
            OperationType::Addition => (left + right)?,
            OperationType::Subtraction => (left - right)?,
            OperationType::Multiplication => (left * right)?,
            OperationType::Division => {
                let inverse = self.inverse(right)?;
                (left * &inverse)?
            }
        };
        // Finite operands can still overflow.
        if let Some((row, col)) = matrix.first_non_finite() {
            return Err(EngineError::NonFiniteResult { row, col });
        }
        Ok(MatrixResult::new(matrix, operation))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{errors::ShapeConstraint, matrix};
    use rstest::rstest;

    const TOLERANCE: f64 = 1e-9;

    fn engine() -> MatrixEngine {
        MatrixEngine::default()
    }

    #[rstest]
    #[case(OperationType::Addition, matrix![[6, 8], [10, 12]])]
    #[case(OperationType::Subtraction, matrix![[-4, -4], [-4, -4]])]
    #[case(OperationType::Multiplication, matrix![[19, 22], [43, 50]])]
    fn two_by_two(#[case] operation: OperationType, #[case] expected: Matrix) {
        let left = matrix![[1, 2], [3, 4]];
        let right = matrix![[5, 6], [7, 8]];
        let result = engine().compute(operation, &left, &right).unwrap();
        assert_eq!(result.operation(), operation);
        assert_eq!(result.matrix(), &expected);
    }

    #[test]
    fn flat_contract() {
        let result = engine()
            .compute_flat(OperationType::Multiplication, 2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 1, &[1.0, 0.0, -1.0])
            .unwrap();
        assert_eq!((result.rows(), result.cols()), (2, 1));
        assert_eq!(result.elements(), &[-2.0, -2.0]);
    }

    #[test]
    fn addition_then_subtraction_recovers_left() {
        let left = matrix![[1.5, -2.25, 3], [0.1, 0.2, 0.3]];
        let right = matrix![[7, 8.125, -9], [1e3, -1e-3, 42]];
        let sum = engine().add(&left, &right).unwrap();
        let back = engine().subtract(sum.matrix(), &right).unwrap();
        assert!(back.matrix().approx_eq(&left, TOLERANCE), "{back:?}");
    }

    #[test]
    fn addition_commutes() {
        let left = matrix![[1.5, -2.25], [3, 0.1]];
        let right = matrix![[7, 8.125], [-9, 1e3]];
        let ab = engine().add(&left, &right).unwrap();
        let ba = engine().add(&right, &left).unwrap();
        assert_eq!(ab, ba);
    }

    #[rstest]
    #[case(matrix![[1, 2, 3], [4, 5, 6]])]
    #[case(matrix![[-1.5], [2.5]])]
    fn identity_is_neutral_for_multiplication(#[case] matrix: Matrix) {
        let identity = Matrix::identity(matrix.nrows()).unwrap();
        let result = engine().multiply(&identity, &matrix).unwrap();
        assert_eq!(result.matrix(), &matrix);
    }

    #[rstest]
    #[case(matrix![[1, 2, 3], [4, 5, 6]])]
    #[case(matrix![[-1.5, 0.25]])]
    fn division_by_identity_is_neutral(#[case] matrix: Matrix) {
        let identity = Matrix::identity(matrix.ncols()).unwrap();
        let result = engine().divide(&matrix, &identity).unwrap();
        assert_eq!(result.matrix(), &matrix);
        assert_eq!(result.operation(), OperationType::Division);
    }

    #[test]
    fn identity_divided_by_matrix_is_its_inverse() {
        let identity = Matrix::identity(2).unwrap();
        let divisor = matrix![[4, 7], [2, 6]];
        let result = engine().divide(&identity, &divisor).unwrap();
        let inverse = engine().inverse(&divisor).unwrap();
        assert_eq!(result.matrix(), &inverse);
        assert!(inverse.approx_eq(&matrix![[0.6, -0.7], [-0.2, 0.4]], TOLERANCE));
    }

    #[test]
    fn division_is_not_element_wise() {
        let result = engine().divide(&matrix![[1, 2], [3, 4]], &matrix![[1, 2], [3, 4]]).unwrap();
        assert!(result.matrix().approx_eq(&Matrix::identity(2).unwrap(), TOLERANCE), "{result:?}");
    }

    #[test]
    fn division_by_singular() {
        let result = engine().divide(&matrix![[1, 2], [3, 4]], &matrix![[0, 0], [0, 0]]).unwrap_err();
        assert_eq!(result, EngineError::SingularMatrix);
    }

    #[test]
    fn small_determinant_is_singular() {
        // Every pivot is above the default epsilon, the determinant (1e-12) is not.
        let divisor = matrix![[1e-6, 0], [0, 1e-6]];
        assert_eq!(engine().divide(&divisor, &divisor).unwrap_err(), EngineError::SingularMatrix);
    }

    #[test]
    fn configured_epsilon() {
        let divisor = matrix![[1e-6, 0], [0, 1e-6]];
        let lenient = MatrixEngine::new(EngineConfig { singularity_epsilon: 1e-15 });
        let result = lenient.divide(&divisor, &divisor).unwrap();
        assert!(result.matrix().approx_eq(&Matrix::identity(2).unwrap(), TOLERANCE), "{result:?}");

        let strict = MatrixEngine::new(EngineConfig { singularity_epsilon: 1e-3 });
        let divisor = matrix![[1e-4, 0], [0, 1]];
        assert_eq!(strict.divide(&divisor, &divisor).unwrap_err(), EngineError::SingularMatrix);
        assert!(engine().divide(&divisor, &divisor).is_ok());
    }

    #[rstest]
    #[case(OperationType::Addition, matrix![[1e308]], matrix![[1e308]], (0, 0))]
    #[case(OperationType::Subtraction, matrix![[0, -1e308]], matrix![[0, 1e308]], (0, 1))]
    #[case(OperationType::Multiplication, matrix![[1e308, 1e308]], matrix![[1e308], [-1e308]], (0, 0))]
    #[case(OperationType::Division, matrix![[1e300]], matrix![[1e-9]], (0, 0))]
    fn overflow_is_rejected(
        #[case] operation: OperationType,
        #[case] left: Matrix,
        #[case] right: Matrix,
        #[case] position: (usize, usize),
    ) {
        let result = engine().compute(operation, &left, &right).unwrap_err();
        assert_eq!(result, EngineError::NonFiniteResult { row: position.0, col: position.1 });
    }

    #[test]
    fn results_rebuild_as_matrices() {
        let left = matrix![[1e307, -2], [3, 4]];
        let right = matrix![[1e307, 5], [6, 7]];
        let result = engine().add(&left, &right).unwrap();
        let rebuilt = Matrix::new(result.elements().to_vec(), result.rows(), result.cols()).unwrap();
        assert_eq!(&rebuilt, result.matrix());
    }

    #[rstest]
    #[case(OperationType::Addition, (2, 2), (2, 3), ShapeConstraint::SameShape(OperationType::Addition))]
    #[case(OperationType::Multiplication, (2, 3), (2, 3), ShapeConstraint::InnerDimensions)]
    #[case(OperationType::Division, (2, 2), (2, 3), ShapeConstraint::SquareDivisor)]
    #[case(OperationType::Division, (3, 3), (2, 2), ShapeConstraint::DivisorSize)]
    fn shape_mismatch(
        #[case] operation: OperationType,
        #[case] left: (u16, u16),
        #[case] right: (u16, u16),
        #[case] expected: ShapeConstraint,
    ) {
        let left = Matrix::zero(left.0, left.1).unwrap();
        let right = Matrix::zero(right.0, right.1).unwrap();
        let result = engine().compute(operation, &left, &right).unwrap_err();
        assert_eq!(result, EngineError::ShapeMismatch(expected));
    }

    #[test]
    fn shape_is_checked_before_singularity() {
        // The divisor is both singular and incompatible with the left operand.
        let result = engine().divide(&matrix![[1, 2, 3]], &matrix![[0, 0], [0, 0]]).unwrap_err();
        assert_eq!(result, EngineError::ShapeMismatch(ShapeConstraint::DivisorSize));
    }

    #[rstest]
    #[case(11, 2, 2, 2, EngineError::DimensionOutOfRange { rows: 11, cols: 2 })]
    #[case(2, 2, 2, 0, EngineError::DimensionOutOfRange { rows: 2, cols: 0 })]
    fn dimension_out_of_range(
        #[case] rows1: usize,
        #[case] cols1: usize,
        #[case] rows2: usize,
        #[case] cols2: usize,
        #[case] expected: EngineError,
    ) {
        // The element arrays are deliberately wrong too: dimensions are reported first.
        let result =
            engine().compute_flat(OperationType::Addition, rows1, cols1, &[], rows2, cols2, &[]).unwrap_err();
        assert_eq!(result, expected);
    }

    #[test]
    fn flat_element_counts_before_values() {
        let result = engine()
            .compute_flat(OperationType::Addition, 1, 2, &[f64::NAN, 1.0], 1, 2, &[1.0])
            .unwrap_err();
        assert_eq!(result, EngineError::ElementCount { expected: 2, actual: 1 });
    }

    #[test]
    fn flat_element_count() {
        let result =
            engine().compute_flat(OperationType::Addition, 2, 2, &[1.0; 4], 2, 2, &[1.0; 3]).unwrap_err();
        assert_eq!(result, EngineError::ElementCount { expected: 4, actual: 3 });
    }

    #[test]
    fn concurrent_calls() {
        let engine = &engine();
        let left = &matrix![[1, 2], [3, 4]];
        let right = &matrix![[5, 6], [7, 8]];
        std::thread::scope(|scope| {
            let handles: Vec<_> = OperationType::ALL
                .into_iter()
                .map(|operation| scope.spawn(move || engine.compute(operation, left, right)))
                .collect();
            for handle in handles {
                assert!(handle.join().unwrap().is_ok());
            }
        });
    }
}
