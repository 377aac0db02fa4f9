//! Primal-dual interior-point solver for convex programs.
//!
//! This module contains the iteration driver and its supporting pieces:
//! - [`interior_point`]: configuration and the main solve loop
//! - [`bfgs`]: the quasi-Newton Hessian update
//! - [`merit`]: the logarithmic-barrier merit function used by the line
//!   search
//!
//! The solver minimizes a convex objective subject to convex inequality
//! constraints, maintaining strict interior feasibility (`c(x) < 0`,
//! `z > 0`) while a barrier parameter is driven to zero along a centering
//! schedule.

use nalgebra::DVector;
use std::time::Duration;
use std::{
    fmt,
    fmt::{Display, Formatter},
};
use thiserror::Error;
use tracing::error;

pub mod bfgs;
pub mod interior_point;
pub mod merit;

pub use interior_point::{InteriorPointConfig, InteriorPointSolver};

/// Source of the descent direction used by the step computation.
///
/// The three strategies share the step-computation frame; only the source
/// of the Hessian block `B` differs. The default is `Bfgs`: it needs no
/// objective Hessian callback, so it works against every [`Problem`]
/// (`Newton` is opt-in for problems that provide second-order
/// information).
///
/// [`Problem`]: crate::core::problem::Problem
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DescentMethod {
    /// Exact Newton direction; requires the objective Hessian
    Newton,
    /// Quasi-Newton direction from a BFGS approximation of the objective
    /// Hessian
    #[default]
    Bfgs,
    /// Steepest descent; the Hessian block is the identity
    Steepest,
}

impl Display for DescentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DescentMethod::Newton => write!(f, "Newton"),
            DescentMethod::Bfgs => write!(f, "BFGS"),
            DescentMethod::Steepest => write!(f, "Steepest descent"),
        }
    }
}

/// Solver-specific error types for barrier-solver
#[derive(Debug, Clone, Error)]
pub enum SolverError {
    /// A configuration setter received an invalid value
    #[error("Invalid configuration: {parameter} must be positive, got {value}")]
    InvalidConfig {
        /// Name of the rejected parameter
        parameter: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Newton descent configured against a problem without an objective
    /// Hessian
    #[error("Newton descent requires an objective Hessian")]
    MissingHessian,

    /// The initial guess has no entries
    #[error("Problem has no decision variables")]
    EmptyProblem,

    /// The constraints callback returned an empty vector
    #[error("Problem has no inequality constraints")]
    NoConstraints,

    /// BFGS update precondition y's > 0 violated
    #[error("BFGS curvature condition violated: y's = {ys:.6e} <= 0")]
    CurvatureCondition {
        /// The offending inner product y's
        ys: f64,
    },

    /// Backtracking line search contracted the step below the minimum
    #[error("Line search step size too small: {alpha:.6e} < {alpha_min:.6e}")]
    LineSearchFailed {
        /// Step size at failure
        alpha: f64,
        /// Configured minimum step size
        alpha_min: f64,
    },
}

impl SolverError {
    /// Log the error with tracing::error and return self for chaining
    ///
    /// This method allows for a consistent error logging pattern throughout
    /// the solver module, ensuring all errors are properly recorded.
    ///
    /// # Example
    /// ```ignore
    /// operation()
    ///     .map_err(|e| SolverError::from(e).log())?;
    /// ```
    #[must_use]
    pub fn log(self) -> Self {
        error!("{}", self);
        self
    }
}

/// Termination status of a completed solve.
///
/// Fatal failures (evaluation errors, factorization breakdown, line
/// search exhaustion) are reported through the error channel instead; a
/// status is only produced when `solve` returns a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// KKT residual dropped below the configured tolerance
    Converged,
    /// Iteration cap reached; the returned point is the last accepted
    /// iterate
    MaxIterationsReached,
}

impl Display for SolveStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Converged => write!(f, "Converged"),
            SolveStatus::MaxIterationsReached => write!(f, "Maximum iterations reached"),
        }
    }
}

/// Detailed convergence information.
#[derive(Debug, Clone)]
pub struct ConvergenceInfo {
    /// Final scaled KKT residual ||(r_x, r_c)|| / (n + m)
    pub kkt_residual: f64,
    /// Final dual residual norm ||g + J^T z||
    pub dual_residual_norm: f64,
    /// Final complementarity norm ||c .* z||
    pub complementarity_norm: f64,
    /// Objective evaluation count
    pub objective_evaluations: usize,
    /// Constraint evaluation count
    pub constraint_evaluations: usize,
    /// Gradient evaluation count
    pub gradient_evaluations: usize,
}

impl Display for ConvergenceInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "KKT residual: {:.2e}, ||r_x||: {:.2e}, ||r_c||: {:.2e}, objective evaluations: {}, constraint evaluations: {}, gradient evaluations: {}",
            self.kkt_residual,
            self.dual_residual_norm,
            self.complementarity_norm,
            self.objective_evaluations,
            self.constraint_evaluations,
            self.gradient_evaluations
        )
    }
}

/// Result of a solver execution.
#[derive(Debug, Clone)]
pub struct SolverResult {
    /// Final primal iterate (length n)
    pub x: DVector<f64>,
    /// Final dual iterate (length m, strictly positive)
    pub z: DVector<f64>,
    /// Termination status
    pub status: SolveStatus,
    /// Objective at the initial guess
    pub initial_objective: f64,
    /// Objective at the returned point
    pub final_objective: f64,
    /// Number of iterations performed
    pub iterations: usize,
    /// Total wall time of the solve
    pub elapsed_time: Duration,
    /// Convergence statistics
    pub convergence_info: Option<ConvergenceInfo>,
}
