use faer::{
    linalg::solvers::{Ldlt, Solve},
    Mat, Side,
};
use nalgebra::{DMatrix, DVector};

use crate::linalg::{DenseLinearSolver, LinAlgError, LinAlgResult};

/// Dense LDLT solver for the reduced Newton system.
///
/// Factors the symmetric matrix as L D L^T with a unit lower-triangular L
/// and diagonal D, then back-substitutes. This is the default backend:
/// the reduced Hessian of a convex program on the strict interior is
/// positive definite, and a failed pivot is a genuine signal that the
/// iterate has left the region where the step is meaningful.
#[derive(Default)]
pub struct DenseLdltSolver {
    /// Factorization of the last successfully solved system.
    factorization: Option<Ldlt<f64>>,
}

impl DenseLdltSolver {
    pub fn new() -> Self {
        Self {
            factorization: None,
        }
    }
}

impl DenseLinearSolver for DenseLdltSolver {
    fn solve_symmetric(
        &mut self,
        matrix: &DMatrix<f64>,
        rhs: &DVector<f64>,
    ) -> LinAlgResult<DVector<f64>> {
        let n = matrix.nrows();
        if matrix.ncols() != n || rhs.len() != n {
            return Err(LinAlgError::DimensionMismatch {
                rows: matrix.nrows(),
                cols: matrix.ncols(),
                rhs: rhs.len(),
            }
            .log());
        }

        let a = Mat::from_fn(n, n, |i, j| matrix[(i, j)]);
        let b = Mat::from_fn(n, 1, |i, _| rhs[i]);

        let ldlt = Ldlt::new(a.as_ref(), Side::Lower).map_err(|e| {
            LinAlgError::FactorizationFailed(
                "LDLT factorization hit a zero or indefinite pivot".to_string(),
            )
            .log_with_source(e)
        })?;

        let solution = ldlt.solve(&b);
        let x = DVector::from_fn(n, |i, _| solution[(i, 0)]);
        if !crate::linalg::vector_is_finite(&x) {
            return Err(LinAlgError::NonFiniteSolution.log());
        }

        self.factorization = Some(ldlt);
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{dmatrix, dvector};

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_solve_well_conditioned_spd() -> LinAlgResult<()> {
        let mut solver = DenseLdltSolver::new();
        let a = dmatrix![
            4.0, 1.0;
            1.0, 3.0
        ];
        let b = dvector![1.0, 2.0];

        let x = solver.solve_symmetric(&a, &b)?;

        // Residual check: A x = b
        let residual = &a * &x - &b;
        assert!(residual.norm() < TOLERANCE);
        assert!(solver.factorization.is_some());
        Ok(())
    }

    #[test]
    fn test_solve_identity() -> LinAlgResult<()> {
        let mut solver = DenseLdltSolver::new();
        let a = DMatrix::identity(3, 3);
        let b = dvector![1.0, -2.0, 3.0];

        let x = solver.solve_symmetric(&a, &b)?;
        for i in 0..3 {
            assert!((x[i] - b[i]).abs() < TOLERANCE);
        }
        Ok(())
    }

    #[test]
    fn test_singular_matrix_fails() {
        let mut solver = DenseLdltSolver::new();
        // Second row is twice the first: rank one.
        let a = dmatrix![
            1.0, 2.0;
            2.0, 4.0
        ];
        let b = dvector![1.0, 2.0];

        let result = solver.solve_symmetric(&a, &b);
        assert!(result.is_err(), "singular matrix should not factorize");
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut solver = DenseLdltSolver::new();
        let a = DMatrix::identity(3, 3);
        let b = dvector![1.0, 2.0];

        match solver.solve_symmetric(&a, &b) {
            Err(LinAlgError::DimensionMismatch { rows, cols, rhs }) => {
                assert_eq!((rows, cols, rhs), (3, 3, 2));
            }
            other => panic!("expected DimensionMismatch, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_repeated_solves_agree() -> LinAlgResult<()> {
        let mut solver = DenseLdltSolver::new();
        let a = dmatrix![
            2.0, 0.5;
            0.5, 1.0
        ];
        let b = dvector![1.0, 1.0];

        let x1 = solver.solve_symmetric(&a, &b)?;
        let x2 = solver.solve_symmetric(&a, &b)?;
        assert!((x1 - x2).norm() < TOLERANCE);
        Ok(())
    }
}
