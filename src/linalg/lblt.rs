use faer::{
    linalg::solvers::{Lblt, Solve},
    Mat, Side,
};
use nalgebra::{DMatrix, DVector};

use crate::linalg::{DenseLinearSolver, LinAlgError, LinAlgResult};

/// Dense Bunch-Kaufman solver for the reduced Newton system.
///
/// Factors the symmetric matrix as L B L^T where B is block diagonal with
/// 1x1 and 2x2 pivots. The pivoting makes the factorization well defined
/// for symmetric indefinite systems, which can arise when the reduced
/// Hessian loses definiteness near the boundary of the feasible region.
/// A breakdown still surfaces, through the non-finite solution check.
#[derive(Default)]
pub struct DenseLbltSolver {
    /// Factorization of the last successfully solved system.
    factorization: Option<Lblt<f64>>,
}

impl DenseLbltSolver {
    pub fn new() -> Self {
        Self {
            factorization: None,
        }
    }
}

impl DenseLinearSolver for DenseLbltSolver {
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

        let lblt = Lblt::new(a.as_ref(), Side::Lower);
        let solution = lblt.solve(&b);
        let x = DVector::from_fn(n, |i, _| solution[(i, 0)]);
        if !crate::linalg::vector_is_finite(&x) {
            return Err(LinAlgError::NonFiniteSolution.log());
        }

        self.factorization = Some(lblt);
        Ok(x)
    }
}
