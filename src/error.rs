//! Error types for the barrier-solver library
//!
//! This module provides the main error and result types used throughout the library.
//! All errors use the `thiserror` crate for automatic trait implementations.
//!
//! # Error Hierarchy
//!
//! The library uses a hierarchical error system where:
//! - **`BarrierSolverError`** is the top-level error exposed to users via public APIs
//! - **Module errors** (`CoreError`, `SolverError`, `LinAlgError`) are wrapped inside it
//! - **Error sources** are preserved, allowing full error chain inspection
//!
//! The wrapped variants map onto the solver's failure taxonomy:
//! configuration problems and line-search exhaustion live in
//! `SolverError`, callback evaluation failures in `CoreError`, and
//! factorization/solve breakdown in `LinAlgError`. Hitting the iteration
//! cap is *not* an error; it is reported as a
//! [`SolveStatus`](crate::solver::SolveStatus) on a successful return.

use crate::{core::CoreError, linalg::LinAlgError, solver::SolverError};
use std::error::Error as StdError;
use thiserror::Error;

/// Main result type used throughout the barrier-solver library
pub type BarrierSolverResult<T> = Result<T, BarrierSolverError>;

/// Main error type for the barrier-solver library
///
/// This is the top-level error type exposed by public APIs. It wraps
/// module-specific errors while preserving the full error chain for
/// debugging.
///
/// # Error Chain Access
///
/// ```rust,ignore
/// if let Err(e) = solver.solve(&problem, &x_guess) {
///     warn!("Error: {}", e);
///     warn!("Full chain: {}", e.chain());
/// }
/// ```
#[derive(Debug, Error)]
pub enum BarrierSolverError {
    /// Problem evaluation errors (non-finite or refused callback output)
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Iteration driver errors (configuration, BFGS curvature, line search)
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// Linear algebra errors (factorization or solve breakdown)
    #[error(transparent)]
    LinearAlgebra(#[from] LinAlgError),
}

// Module-specific errors are automatically converted via #[from] attributes above

impl BarrierSolverError {
    /// Get the full error chain as a string for logging and debugging.
    ///
    /// Traverses the error source chain and returns a formatted string
    /// showing the hierarchy from the top-level error down to the root
    /// cause.
    pub fn chain(&self) -> String {
        let mut chain = vec![self.to_string()];
        let mut source = self.source();

        while let Some(err) = source {
            chain.push(format!("  → {}", err));
            source = err.source();
        }

        chain.join("\n")
    }

    /// Get a compact single-line error chain for logging
    ///
    /// Similar to `chain()` but formats as a single line with arrow separators.
    pub fn chain_compact(&self) -> String {
        let mut chain = vec![self.to_string()];
        let mut source = self.source();

        while let Some(err) = source {
            chain.push(err.to_string());
            source = err.source();
        }

        chain.join(" → ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barrier_solver_error_display() {
        let linalg_error = LinAlgError::NonFiniteSolution;
        let error = BarrierSolverError::from(linalg_error);
        assert!(error.to_string().contains("non-finite"));
    }

    #[test]
    fn test_barrier_solver_error_chain() {
        let linalg_error =
            LinAlgError::FactorizationFailed("LDLT factorization failed".to_string());
        let error = BarrierSolverError::from(linalg_error);

        let chain = error.chain();
        assert!(chain.contains("factorization"));
        assert!(chain.contains("LDLT"));
    }

    #[test]
    fn test_barrier_solver_error_chain_compact() {
        let core_error = CoreError::EvaluationRejected("point outside domain".to_string());
        let error = BarrierSolverError::from(core_error);

        let chain_compact = error.chain_compact();
        assert!(chain_compact.contains("point outside domain"));
    }

    #[test]
    fn test_transparent_error_conversion() {
        let solver_error = SolverError::LineSearchFailed {
            alpha: 1e-7,
            alpha_min: 1e-6,
        };

        let error: BarrierSolverError = solver_error.into();
        match error {
            BarrierSolverError::Solver(_) => { /* Expected */ }
            _ => panic!("Expected Solver variant"),
        }
    }

    #[test]
    fn test_barrier_solver_result_ok() {
        let result: BarrierSolverResult<i32> = Ok(42);
        assert!(result.is_ok());
        if let Ok(value) = result {
            assert_eq!(value, 42);
        }
    }
}
