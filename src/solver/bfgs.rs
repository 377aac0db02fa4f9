//! BFGS rank-two update of the objective Hessian approximation.
//!
//! In quasi-Newton mode the solver maintains a symmetric positive
//! definite approximation `B` of the objective Hessian (not of the full
//! Lagrangian; the constraint curvature `W` is always caller-supplied).
//! After each accepted step the approximation is refreshed with the
//! standard rank-two formula
//!
//! ```text
//! B+ = B - (B s)(B s)^T / (s^T B s) + y y^T / (y^T s)
//! ```
//!
//! where `s = alpha * p_x` is the accepted step and `y = g_new - g_old`
//! the gradient difference. Positive definiteness is preserved exactly
//! when the curvature condition `y^T s > 0` holds; for a convex objective
//! it can only fail through numerical noise, and the solver treats a
//! violation as fatal rather than silently skipping the update.

use nalgebra::{DMatrix, DVector};

use crate::solver::SolverError;

/// Apply one BFGS update to the Hessian approximation `b`.
///
/// # Arguments
/// * `b` - Current approximation, symmetric positive definite
/// * `s` - Accepted step `alpha * p_x`
/// * `y` - Gradient difference `g_new - g_old`
///
/// # Errors
/// Returns [`SolverError::CurvatureCondition`] when `y^T s <= 0`.
pub fn bfgs_update(
    b: &DMatrix<f64>,
    s: &DVector<f64>,
    y: &DVector<f64>,
) -> Result<DMatrix<f64>, SolverError> {
    let ys = y.dot(s);
    if ys <= 0.0 {
        return Err(SolverError::CurvatureCondition { ys }.log());
    }

    // s^T B s > 0 whenever B is positive definite and s != 0, which the
    // curvature condition already rules in.
    let bs = b * s;
    let sbs = s.dot(&bs);

    Ok(b - (&bs * bs.transpose()) / sbs + (y * y.transpose()) / ys)
}
