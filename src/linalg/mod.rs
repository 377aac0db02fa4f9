//! Dense linear algebra facade for the interior-point iteration.
//!
//! The driver reduces each interior-point step to one symmetric n x n
//! system (the Schur complement of the KKT system). This module owns that
//! boundary: a [`DenseLinearSolver`] trait with two interchangeable faer
//! backends, plus the small dense helpers the step computation needs
//! (diagonal row scaling, finiteness checks).
//!
//! # Backends
//!
//! - [`DenseLdltSolver`] (default): LDLT factorization. Fast, and fails
//!   cleanly when the reduced Hessian loses definiteness.
//! - [`DenseLbltSolver`]: Bunch-Kaufman factorization. Slightly more
//!   work per solve but handles symmetric indefinite systems.
//!
//! Callers work in `nalgebra` types; conversion to faer structures
//! happens inside the backends.

pub mod lblt;
pub mod ldlt;

use nalgebra::{DMatrix, DVector};
use std::{
    fmt,
    fmt::{Display, Formatter},
};
use thiserror::Error;
use tracing::error;

pub use lblt::DenseLbltSolver;
pub use ldlt::DenseLdltSolver;

/// Type of dense factorization used for the reduced Newton system
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LinearSolverType {
    /// LDLT factorization (fast, requires a definite system)
    #[default]
    DenseLdlt,
    /// Bunch-Kaufman factorization (robust to indefinite systems)
    DenseLblt,
}

impl Display for LinearSolverType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LinearSolverType::DenseLdlt => write!(f, "Dense LDLT"),
            LinearSolverType::DenseLblt => write!(f, "Dense Bunch-Kaufman"),
        }
    }
}

/// Linear algebra specific error types for barrier-solver
#[derive(Debug, Clone, Error)]
pub enum LinAlgError {
    /// Symmetric factorization failed (singular or indefinite matrix)
    #[error("Symmetric factorization failed: {0}")]
    FactorizationFailed(String),

    /// Triangular solve produced NaN or infinity
    #[error("Linear solve produced a non-finite solution")]
    NonFiniteSolution,

    /// Matrix and right-hand side shapes are incompatible
    #[error("Dimension mismatch: matrix is {rows}x{cols}, right-hand side has length {rhs}")]
    DimensionMismatch {
        /// Matrix row count
        rows: usize,
        /// Matrix column count
        cols: usize,
        /// Right-hand side length
        rhs: usize,
    },
}

impl LinAlgError {
    /// Log the error with tracing::error and return self for chaining
    ///
    /// This method allows for a consistent error logging pattern throughout
    /// the linalg module, ensuring all errors are properly recorded.
    ///
    /// # Example
    /// ```ignore
    /// operation()
    ///     .map_err(|e| LinAlgError::from(e).log())?;
    /// ```
    #[must_use]
    pub fn log(self) -> Self {
        error!("{}", self);
        self
    }

    /// Log the error with the original source error from a third-party library
    ///
    /// This method logs both the LinAlgError and the underlying error
    /// from external libraries (e.g., faer's factorization errors),
    /// providing full debugging context.
    ///
    /// # Arguments
    /// * `source_error` - The original error from the third-party library (must implement Debug)
    #[must_use]
    pub fn log_with_source<E: std::fmt::Debug>(self, source_error: E) -> Self {
        error!("{} | Source: {:?}", self, source_error);
        self
    }
}

/// Result type for linear algebra operations
pub type LinAlgResult<T> = Result<T, LinAlgError>;

/// Trait for dense solvers of the symmetric reduced Newton system
///
/// One factorization and one triangular solve per interior-point
/// iteration. Implementations may cache the factorization of the last
/// solve for inspection.
pub trait DenseLinearSolver {
    /// Solve `matrix * x = rhs` for a symmetric `matrix`.
    ///
    /// # Errors
    /// Returns `LinAlgError` if:
    /// - The factorization fails (singular or indefinite matrix)
    /// - The solution contains NaN or infinity
    /// - The shapes of `matrix` and `rhs` are incompatible
    fn solve_symmetric(
        &mut self,
        matrix: &DMatrix<f64>,
        rhs: &DVector<f64>,
    ) -> LinAlgResult<DVector<f64>>;
}

/// Compute `diag(scale) * matrix`, scaling row i by `scale[i]`.
///
/// Used to form `S * J` with `S = diag(z / (c - epsilon))` without
/// materializing the m x m diagonal matrix.
pub fn row_scale(matrix: &DMatrix<f64>, scale: &DVector<f64>) -> DMatrix<f64> {
    debug_assert_eq!(matrix.nrows(), scale.len());
    let mut scaled = matrix.clone();
    for (i, factor) in scale.iter().enumerate() {
        scaled.row_mut(i).scale_mut(*factor);
    }
    scaled
}

/// Whether every entry of the vector is finite.
pub fn vector_is_finite(v: &DVector<f64>) -> bool {
    v.iter().all(|x| x.is_finite())
}
