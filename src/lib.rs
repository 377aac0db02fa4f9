//! # Barrier Solver
//!
//! A primal-dual interior-point solver for convex programs with convex
//! inequality constraints:
//!
//! ```text
//! minimize    f(x)
//! subject to  c(x) <= 0
//! ```
//!
//! where `f` is a twice-differentiable convex objective and every
//! component of `c` is convex. Equality constraints are not supported.
//!
//! ## Features
//!
//! - **Three descent strategies**: exact Newton, BFGS quasi-Newton, and
//!   steepest descent, sharing one step-computation frame
//! - **Feasible iteration**: strict interior feasibility (`c(x) < 0`,
//!   `z > 0`) maintained by a fraction-to-boundary rule and a
//!   backtracking line search on a logarithmic-barrier merit function
//! - **Schur-complement steps**: each iteration reduces the perturbed
//!   KKT system to one symmetric dense n x n solve
//! - **Flexible problem input**: implement the [`Problem`] trait or hand
//!   the solver a [`CallbackProblem`] bundle of plain closures
//! - **Pluggable dense backends**: LDLT (default) or Bunch-Kaufman
//!   factorization via the `faer` linear algebra library
//! - **Iteration telemetry**: one row per iteration through an injected
//!   sink, plus structured `tracing` diagnostics
//!
//! ## Example
//!
//! ```
//! use barrier_solver::{
//!     CallbackProblem, DescentMethod, InteriorPointConfig, InteriorPointSolver, SolveStatus,
//! };
//! use nalgebra::{dvector, DMatrix, DVector};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // minimize 1/2 ||x||^2 subject to the constant constraint -1 <= 0
//! let problem = CallbackProblem::with_hessian(
//!     |x: &DVector<f64>| 0.5 * x.dot(x),
//!     |x: &DVector<f64>| x.clone(),
//!     |x: &DVector<f64>| DMatrix::identity(x.len(), x.len()),
//!     |_x: &DVector<f64>| dvector![-1.0],
//!     |x: &DVector<f64>, _z: &DVector<f64>| DMatrix::zeros(1, x.len()),
//!     |x: &DVector<f64>, _z: &DVector<f64>| DMatrix::zeros(x.len(), x.len()),
//! );
//!
//! let config = InteriorPointConfig::new().with_descent(DescentMethod::Newton);
//! let mut solver = InteriorPointSolver::with_config(config);
//! let result = solver.solve(&problem, &dvector![3.0, -2.0])?;
//!
//! assert_eq!(result.status, SolveStatus::Converged);
//! assert!(result.x.norm() < 1e-5);
//! # Ok(())
//! # }
//! ```
//!
//! ## References
//!
//! - Armand, Gilbert, Jan-Jegou. A Feasible BFGS Interior Point
//!   Algorithm for Solving Convex Minimization Problems. SIAM Journal on
//!   Optimization, Vol. 11, No. 1.
//! - Nocedal & Wright. Numerical Optimization (2nd ed.), Chapter 19.

#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)] // interior-point steps need many parameters

pub mod core;
pub mod error;
pub mod linalg;
#[cfg(feature = "logging")]
pub mod logger;
pub mod solver;
pub mod telemetry;

// Re-export core types
pub use crate::core::problem::{CallbackProblem, Problem};
pub use error::{BarrierSolverError, BarrierSolverResult};

pub use linalg::{DenseLbltSolver, DenseLdltSolver, DenseLinearSolver, LinearSolverType};
#[cfg(feature = "logging")]
pub use logger::{init_logger, init_logger_with_level};
pub use solver::{
    interior_point::{InteriorPointConfig, InteriorPointSolver},
    ConvergenceInfo, DescentMethod, SolveStatus, SolverResult,
};
pub use telemetry::{IterationRecord, MemorySink, StdoutSink, TelemetrySink};
