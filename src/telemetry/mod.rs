//! Iteration telemetry for the interior-point driver.
//!
//! The solver reports progress through an injected line-emitter: when
//! `verbose` is enabled it writes one header line followed by one row per
//! iteration to a [`TelemetrySink`]. The default sink writes to standard
//! output; tests inject a [`MemorySink`] and assert on the captured
//! lines. Structured diagnostics additionally go to `tracing`, which is
//! independent of this sink.
//!
//! # Row format
//!
//! ```text
//! i, f(x), lg(mu), sigma, ||r_x||, ||r_c||, alpha, #ls
//! ```
//!
//! - `i` is the 1-based iteration index
//! - `f(x)` the objective at the current iterate
//! - `lg(mu)` the common logarithm of the barrier parameter
//! - `sigma` the centering parameter
//! - `||r_x||`, `||r_c||` the dual and complementarity residual norms
//! - `alpha`, `#ls` the step size and line-search count of the
//!   *previous* iteration (both 0 before the first line search)

use std::sync::{Arc, Mutex};

/// Line-emitter that receives solver telemetry.
///
/// Implementations should be lightweight; the solver calls
/// [`TelemetrySink::emit`] once per iteration while `verbose` is set and
/// never otherwise.
pub trait TelemetrySink: Send {
    /// Receive one formatted telemetry line (without trailing newline).
    fn emit(&mut self, line: &str);
}

/// Default sink: one line per call to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl TelemetrySink for StdoutSink {
    fn emit(&mut self, line: &str) {
        println!("{line}");
    }
}

/// In-memory sink for tests and programmatic inspection.
///
/// Cloning the sink clones the handle, not the buffer: a test keeps one
/// clone and hands the other to the solver, then reads the captured lines
/// back through [`MemorySink::lines`].
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all lines emitted so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl TelemetrySink for MemorySink {
    fn emit(&mut self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }
}

/// One telemetry row of the interior-point iteration.
#[derive(Debug, Clone)]
pub struct IterationRecord {
    /// Iteration number (1-based)
    pub iteration: usize,
    /// Objective value f(x) at the current iterate
    pub objective: f64,
    /// Common logarithm of the barrier parameter mu
    pub log10_mu: f64,
    /// Centering parameter sigma
    pub sigma: f64,
    /// Norm of the dual residual r_x = g + J^T z
    pub dual_residual_norm: f64,
    /// Norm of the complementarity residual r_c = c .* z
    pub complementarity_norm: f64,
    /// Step size accepted by the previous line search (0 before the first)
    pub step_size: f64,
    /// Backtracking count of the previous line search (0 before the first)
    pub line_search_steps: usize,
}

impl IterationRecord {
    /// The column header, printed once per verbose solve.
    pub fn header() -> &'static str {
        "i, f(x), lg(mu), sigma, ||r_x||, ||r_c||, alpha, #ls"
    }

    /// Format this record as one telemetry row.
    pub fn format_row(&self) -> String {
        format!(
            "{}, {:.6e}, {:.2}, {:.2e}, {:.6e}, {:.6e}, {:.2e}, {}",
            self.iteration,
            self.objective,
            self.log10_mu,
            self.sigma,
            self.dual_residual_norm,
            self.complementarity_norm,
            self.step_size,
            self.line_search_steps,
        )
    }
}
