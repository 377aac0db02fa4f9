//! Problem definition consumed by the interior-point driver.
//!
//! A problem is a capability set of callbacks over dense vectors:
//!
//! ```text
//! minimize    f(x)              objective, gradient, optional Hessian
//! subject to  c(x) <= 0         constraints, Jacobian J = dc/dx,
//!                               W(x, z) = sum_i z_i * H_ci (Lagrangian
//!                               Hessian minus the objective Hessian)
//! ```
//!
//! Two provisioning forms expose identical semantics:
//!
//! 1. Implement the [`Problem`] trait directly. This is the natural form
//!    when the problem carries data (matrices, datasets) and the
//!    evaluations are methods over that data.
//! 2. Construct a [`CallbackProblem`] from plain closures. This is the
//!    quickest route for one-off problems and mirrors handing the solver
//!    a bundle of function handles.
//!
//! Every capability returns a `Result` so a callback can refuse a query
//! point or report a non-finite value. The driver treats such failures at
//! a *trial* point as a rejected line-search candidate and contracts the
//! step; a failure at the *current* iterate aborts the solve.
//!
//! # Example
//!
//! ```
//! use barrier_solver::core::problem::CallbackProblem;
//! use nalgebra::{dvector, DMatrix, DVector};
//!
//! // minimize 1/2 ||x||^2 subject to the always-satisfied constraint -1 <= 0
//! let problem = CallbackProblem::with_hessian(
//!     |x: &DVector<f64>| 0.5 * x.dot(x),
//!     |x: &DVector<f64>| x.clone(),
//!     |x: &DVector<f64>| DMatrix::identity(x.len(), x.len()),
//!     |_x: &DVector<f64>| dvector![-1.0],
//!     |x: &DVector<f64>, _z: &DVector<f64>| DMatrix::zeros(1, x.len()),
//!     |x: &DVector<f64>, _z: &DVector<f64>| DMatrix::zeros(x.len(), x.len()),
//! );
//! ```

use nalgebra::{DMatrix, DVector};

use crate::core::{CoreError, CoreResult};

/// Capability set of a convex inequality-constrained program.
///
/// Implementors supply the objective `f`, its gradient `g`, the
/// constraint vector `c`, the constraint Jacobian `J` and the constraint
/// part of the Lagrangian Hessian `W = sum_i z_i * hess(c_i)`. The
/// objective Hessian is optional and only queried in Newton mode; a type
/// that provides it must also override [`Problem::has_objective_hessian`]
/// so the driver can validate the configuration before iterating.
///
/// The Jacobian and Lagrangian-Hessian callbacks receive the dual vector
/// `z` as well as `x`, so implementations can assemble both quantities
/// from one pass over the constraint data.
pub trait Problem {
    /// Evaluate the objective f(x).
    fn objective(&self, x: &DVector<f64>) -> CoreResult<f64>;

    /// Evaluate the objective gradient g(x), length n.
    fn objective_gradient(&self, x: &DVector<f64>) -> CoreResult<DVector<f64>>;

    /// Evaluate the objective Hessian H(x), shape n x n.
    ///
    /// Only required for Newton descent. The default implementation
    /// reports the capability as unavailable.
    fn objective_hessian(&self, _x: &DVector<f64>) -> CoreResult<DMatrix<f64>> {
        Err(CoreError::HessianUnavailable)
    }

    /// Whether [`Problem::objective_hessian`] is implemented.
    ///
    /// Checked once at solve entry when Newton descent is configured.
    fn has_objective_hessian(&self) -> bool {
        false
    }

    /// Evaluate the constraint vector c(x), length m.
    fn constraints(&self, x: &DVector<f64>) -> CoreResult<DVector<f64>>;

    /// Evaluate the constraint Jacobian J(x, z), shape m x n.
    fn constraints_jacobian(
        &self,
        x: &DVector<f64>,
        z: &DVector<f64>,
    ) -> CoreResult<DMatrix<f64>>;

    /// Evaluate W(x, z) = sum_i z_i * hess(c_i), shape n x n.
    fn lagrangian_hessian(
        &self,
        x: &DVector<f64>,
        z: &DVector<f64>,
    ) -> CoreResult<DMatrix<f64>>;
}

type ObjectiveFn = Box<dyn Fn(&DVector<f64>) -> f64>;
type GradientFn = Box<dyn Fn(&DVector<f64>) -> DVector<f64>>;
type HessianFn = Box<dyn Fn(&DVector<f64>) -> DMatrix<f64>>;
type ConstraintsFn = Box<dyn Fn(&DVector<f64>) -> DVector<f64>>;
type JacobianFn = Box<dyn Fn(&DVector<f64>, &DVector<f64>) -> DMatrix<f64>>;
type LagrangianHessianFn = Box<dyn Fn(&DVector<f64>, &DVector<f64>) -> DMatrix<f64>>;

/// A [`Problem`] assembled from plain closures.
///
/// The closures return raw values; this wrapper checks every returned
/// scalar, vector and matrix for finiteness and converts NaN/infinity
/// into [`CoreError::NonFiniteValue`], so closure authors do not have to
/// deal with error plumbing themselves.
pub struct CallbackProblem {
    objective: ObjectiveFn,
    gradient: GradientFn,
    hessian: Option<HessianFn>,
    constraints: ConstraintsFn,
    jacobian: JacobianFn,
    lagrangian_hessian: LagrangianHessianFn,
}

impl CallbackProblem {
    /// Build a problem from five callables, without an objective Hessian.
    ///
    /// Suitable for BFGS and steepest descent. Configuring Newton descent
    /// against a problem built this way is rejected at solve entry.
    pub fn new(
        objective: impl Fn(&DVector<f64>) -> f64 + 'static,
        gradient: impl Fn(&DVector<f64>) -> DVector<f64> + 'static,
        constraints: impl Fn(&DVector<f64>) -> DVector<f64> + 'static,
        jacobian: impl Fn(&DVector<f64>, &DVector<f64>) -> DMatrix<f64> + 'static,
        lagrangian_hessian: impl Fn(&DVector<f64>, &DVector<f64>) -> DMatrix<f64> + 'static,
    ) -> Self {
        Self {
            objective: Box::new(objective),
            gradient: Box::new(gradient),
            hessian: None,
            constraints: Box::new(constraints),
            jacobian: Box::new(jacobian),
            lagrangian_hessian: Box::new(lagrangian_hessian),
        }
    }

    /// Build a problem from six callables, including the objective Hessian.
    pub fn with_hessian(
        objective: impl Fn(&DVector<f64>) -> f64 + 'static,
        gradient: impl Fn(&DVector<f64>) -> DVector<f64> + 'static,
        hessian: impl Fn(&DVector<f64>) -> DMatrix<f64> + 'static,
        constraints: impl Fn(&DVector<f64>) -> DVector<f64> + 'static,
        jacobian: impl Fn(&DVector<f64>, &DVector<f64>) -> DMatrix<f64> + 'static,
        lagrangian_hessian: impl Fn(&DVector<f64>, &DVector<f64>) -> DMatrix<f64> + 'static,
    ) -> Self {
        Self {
            objective: Box::new(objective),
            gradient: Box::new(gradient),
            hessian: Some(Box::new(hessian)),
            constraints: Box::new(constraints),
            jacobian: Box::new(jacobian),
            lagrangian_hessian: Box::new(lagrangian_hessian),
        }
    }
}

fn finite_scalar(value: f64, callback: &'static str) -> CoreResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoreError::NonFiniteValue { callback })
    }
}

fn finite_vector(value: DVector<f64>, callback: &'static str) -> CoreResult<DVector<f64>> {
    if value.iter().all(|v| v.is_finite()) {
        Ok(value)
    } else {
        Err(CoreError::NonFiniteValue { callback })
    }
}

fn finite_matrix(value: DMatrix<f64>, callback: &'static str) -> CoreResult<DMatrix<f64>> {
    if value.iter().all(|v| v.is_finite()) {
        Ok(value)
    } else {
        Err(CoreError::NonFiniteValue { callback })
    }
}

impl Problem for CallbackProblem {
    fn objective(&self, x: &DVector<f64>) -> CoreResult<f64> {
        finite_scalar((self.objective)(x), "objective")
    }

    fn objective_gradient(&self, x: &DVector<f64>) -> CoreResult<DVector<f64>> {
        finite_vector((self.gradient)(x), "objective_gradient")
    }

    fn objective_hessian(&self, x: &DVector<f64>) -> CoreResult<DMatrix<f64>> {
        match &self.hessian {
            Some(hessian) => finite_matrix(hessian(x), "objective_hessian"),
            None => Err(CoreError::HessianUnavailable),
        }
    }

    fn has_objective_hessian(&self) -> bool {
        self.hessian.is_some()
    }

    fn constraints(&self, x: &DVector<f64>) -> CoreResult<DVector<f64>> {
        finite_vector((self.constraints)(x), "constraints")
    }

    fn constraints_jacobian(
        &self,
        x: &DVector<f64>,
        z: &DVector<f64>,
    ) -> CoreResult<DMatrix<f64>> {
        finite_matrix((self.jacobian)(x, z), "constraints_jacobian")
    }

    fn lagrangian_hessian(
        &self,
        x: &DVector<f64>,
        z: &DVector<f64>,
    ) -> CoreResult<DMatrix<f64>> {
        finite_matrix((self.lagrangian_hessian)(x, z), "lagrangian_hessian")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    fn quadratic_bundle() -> CallbackProblem {
        CallbackProblem::with_hessian(
            |x: &DVector<f64>| 0.5 * x.dot(x),
            |x: &DVector<f64>| x.clone(),
            |x: &DVector<f64>| DMatrix::identity(x.len(), x.len()),
            |_x: &DVector<f64>| dvector![-1.0],
            |x: &DVector<f64>, _z: &DVector<f64>| DMatrix::zeros(1, x.len()),
            |x: &DVector<f64>, _z: &DVector<f64>| DMatrix::zeros(x.len(), x.len()),
        )
    }

    #[test]
    fn test_callback_problem_evaluations() -> CoreResult<()> {
        let problem = quadratic_bundle();
        let x = dvector![3.0, 4.0];
        let z = dvector![1.0];

        assert!((problem.objective(&x)? - 12.5).abs() < 1e-12);
        assert_eq!(problem.objective_gradient(&x)?, x);
        assert_eq!(
            problem.objective_hessian(&x)?,
            DMatrix::identity(2, 2)
        );
        assert_eq!(problem.constraints(&x)?, dvector![-1.0]);
        assert_eq!(problem.constraints_jacobian(&x, &z)?.shape(), (1, 2));
        assert_eq!(problem.lagrangian_hessian(&x, &z)?.shape(), (2, 2));
        Ok(())
    }

    #[test]
    fn test_hessian_flag_tracks_constructor() {
        let with = quadratic_bundle();
        assert!(with.has_objective_hessian());

        let without = CallbackProblem::new(
            |x: &DVector<f64>| x.sum(),
            |x: &DVector<f64>| DVector::from_element(x.len(), 1.0),
            |_x: &DVector<f64>| dvector![-1.0],
            |x: &DVector<f64>, _z: &DVector<f64>| DMatrix::zeros(1, x.len()),
            |x: &DVector<f64>, _z: &DVector<f64>| DMatrix::zeros(x.len(), x.len()),
        );
        assert!(!without.has_objective_hessian());

        let x = dvector![1.0];
        assert!(matches!(
            without.objective_hessian(&x),
            Err(CoreError::HessianUnavailable)
        ));
    }

    #[test]
    fn test_non_finite_objective_is_reported() {
        let problem = CallbackProblem::new(
            |_x: &DVector<f64>| f64::NAN,
            |x: &DVector<f64>| x.clone(),
            |_x: &DVector<f64>| dvector![-1.0],
            |x: &DVector<f64>, _z: &DVector<f64>| DMatrix::zeros(1, x.len()),
            |x: &DVector<f64>, _z: &DVector<f64>| DMatrix::zeros(x.len(), x.len()),
        );

        let x = dvector![0.0];
        match problem.objective(&x) {
            Err(CoreError::NonFiniteValue { callback }) => assert_eq!(callback, "objective"),
            other => panic!("expected NonFiniteValue, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_non_finite_vector_and_matrix_are_reported() {
        let problem = CallbackProblem::new(
            |_x: &DVector<f64>| 0.0,
            |x: &DVector<f64>| DVector::from_element(x.len(), f64::INFINITY),
            |_x: &DVector<f64>| dvector![-1.0],
            |x: &DVector<f64>, _z: &DVector<f64>| {
                DMatrix::from_element(1, x.len(), f64::NAN)
            },
            |x: &DVector<f64>, _z: &DVector<f64>| DMatrix::zeros(x.len(), x.len()),
        );

        let x = dvector![0.0];
        let z = dvector![1.0];
        assert!(problem.objective_gradient(&x).is_err());
        assert!(problem.constraints_jacobian(&x, &z).is_err());
        assert!(problem.constraints(&x).is_ok());
    }
}
