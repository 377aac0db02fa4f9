//! Core problem abstraction for the barrier-solver library
//!
//! This module contains the callback-facing building blocks of the solver:
//! - The [`Problem`](problem::Problem) capability set consumed by the
//!   iteration driver
//! - The [`CallbackProblem`](problem::CallbackProblem) bundle of plain
//!   closures
//! - Evaluation-side error types

pub mod problem;

use thiserror::Error;
use tracing::error;

/// Core module error types for problem evaluation
///
/// These errors describe failures on the callback side of the solver:
/// a callback produced a non-finite value, refused the query point, or
/// returned a value whose shape does not match the problem dimensions.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// A callback returned NaN or infinity
    #[error("Callback '{callback}' produced a non-finite value")]
    NonFiniteValue {
        /// Name of the offending callback
        callback: &'static str,
    },

    /// A callback refused to evaluate the query point
    #[error("Evaluation rejected: {0}")]
    EvaluationRejected(String),

    /// A callback returned a value of the wrong shape
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// The problem does not provide an objective Hessian
    #[error("Objective Hessian is not provided by this problem")]
    HessianUnavailable,
}

impl CoreError {
    /// Log the error with tracing::error and return self for chaining
    ///
    /// This method allows for a consistent error logging pattern throughout
    /// the core module, ensuring all errors are properly recorded.
    ///
    /// # Example
    /// ```ignore
    /// operation()
    ///     .map_err(|e| CoreError::from(e).log())?;
    /// ```
    #[must_use]
    pub fn log(self) -> Self {
        error!("{}", self);
        self
    }

    /// Log the error with the original source error from a third-party library
    ///
    /// # Arguments
    /// * `source_error` - The original error from the third-party library (must implement Debug)
    #[must_use]
    pub fn log_with_source<E: std::fmt::Debug>(self, source_error: E) -> Self {
        error!("{} | Source: {:?}", self, source_error);
        self
    }
}

/// Result type for problem evaluation
pub type CoreResult<T> = Result<T, CoreError>;
