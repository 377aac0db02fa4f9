//! Primal-dual interior-point iteration driver.
//!
//! The solver follows the classic feasible primal-dual scheme for convex
//! programs with inequality constraints:
//!
//! ```text
//! minimize    f(x)
//! subject to  c(x) <= 0
//! ```
//!
//! # Algorithm Overview
//!
//! Each iteration perturbs the KKT conditions with a barrier parameter mu
//! and takes one Newton-type step on the perturbed system:
//!
//! 1. Evaluate the callbacks at the current iterate (f, g, c, J, W) and
//!    form the KKT residuals `r_x = g + J^T z`, `r_c = c .* z`.
//! 2. Pick the centering quantities from the residual norm: the forcing
//!    value eta, the centering value sigma, and
//!    `mu = max(mu_min, sigma * (-c^T z) / m)`.
//! 3. Eliminate the dual block through the Schur complement: with
//!    `S = diag(z / (c - eps))` solve the reduced n x n system
//!    `(B + W - J^T S J) p_x = -(g - mu J^T (1/(c - eps)))`
//!    and recover `p_z = -(z + mu (1/(c - eps)) + S J p_x)`.
//! 4. Globalize with the fraction-to-boundary rule on z followed by a
//!    backtracking line search on the logarithmic-barrier merit function;
//!    candidates must satisfy `c <= 0` componentwise.
//!
//! The Hessian block `B` comes from the configured [`DescentMethod`]:
//! the exact objective Hessian (Newton), a BFGS approximation refreshed
//! after every accepted step, or the identity (steepest descent).
//!
//! Convergence is declared when `||(r_x, r_c)|| / (n + m)` drops below
//! the configured tolerance. Hitting the iteration cap is reported as a
//! status, not an error; the last accepted iterate is returned either
//! way.
//!
//! # Examples
//!
//! ```
//! use barrier_solver::core::problem::CallbackProblem;
//! use barrier_solver::solver::interior_point::{InteriorPointConfig, InteriorPointSolver};
//! use barrier_solver::solver::DescentMethod;
//! use nalgebra::{dvector, DMatrix, DVector};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // minimize 1/2 ||x||^2 subject to -1 <= 0
//! let problem = CallbackProblem::with_hessian(
//!     |x: &DVector<f64>| 0.5 * x.dot(x),
//!     |x: &DVector<f64>| x.clone(),
//!     |x: &DVector<f64>| DMatrix::identity(x.len(), x.len()),
//!     |_x: &DVector<f64>| dvector![-1.0],
//!     |x: &DVector<f64>, _z: &DVector<f64>| DMatrix::zeros(1, x.len()),
//!     |x: &DVector<f64>, _z: &DVector<f64>| DMatrix::zeros(x.len(), x.len()),
//! );
//!
//! let config = InteriorPointConfig::new()
//!     .with_descent(DescentMethod::Newton)
//!     .with_tolerance(1e-8)?;
//! let mut solver = InteriorPointSolver::with_config(config);
//! let result = solver.solve(&problem, &dvector![3.0, -2.0])?;
//! assert!(result.x.norm() < 1e-6);
//! # Ok(())
//! # }
//! ```

use nalgebra::{DMatrix, DVector};
use std::time::Instant;
use tracing::debug;

use crate::core::problem::Problem;
use crate::core::CoreError;
use crate::error::BarrierSolverResult;
use crate::linalg::{
    row_scale, DenseLbltSolver, DenseLdltSolver, DenseLinearSolver, LinearSolverType,
};
use crate::solver::bfgs::bfgs_update;
use crate::solver::merit::{merit_directional_derivative, merit_value};
use crate::solver::{
    ConvergenceInfo, DescentMethod, SolveStatus, SolverError, SolverResult,
};
use crate::telemetry::{IterationRecord, StdoutSink, TelemetrySink};

/// Configuration parameters for the interior-point solver.
///
/// All numeric parameters must be positive; the `with_*` builders reject
/// invalid values at the call site and [`InteriorPointConfig::validate`]
/// re-checks the whole struct at solve entry (the fields are public, so
/// direct mutation is possible but validated late).
///
/// # Builder Pattern
///
/// ```
/// use barrier_solver::solver::interior_point::InteriorPointConfig;
/// use barrier_solver::solver::DescentMethod;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = InteriorPointConfig::new()
///     .with_descent(DescentMethod::Newton)
///     .with_tolerance(1e-8)?
///     .with_max_iterations(200)?
///     .with_verbose(true);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct InteriorPointConfig {
    /// Source of the descent direction
    pub descent: DescentMethod,
    /// Dense factorization backend for the reduced Newton system
    pub linear_solver_type: LinearSolverType,
    /// Convergence tolerance on the scaled KKT residual
    pub tolerance: f64,
    /// Iteration cap
    pub max_iterations: usize,
    /// Emit one telemetry row per iteration to the configured sink
    pub verbose: bool,
    /// Numerical floor protecting logarithms and denominators
    pub epsilon: f64,
    /// Upper bound on the centering parameter sigma
    pub sigma_max: f64,
    /// Upper bound on the forcing value eta
    pub eta_max: f64,
    /// Lower bound on the barrier parameter mu
    pub mu_min: f64,
    /// Initial (largest) line search step
    pub alpha_max: f64,
    /// Smallest admissible line search step
    pub alpha_min: f64,
    /// Backtracking shrink factor
    pub beta: f64,
    /// Sufficient-decrease coefficient
    pub tau: f64,
}

impl Default for InteriorPointConfig {
    fn default() -> Self {
        Self {
            descent: DescentMethod::default(),
            linear_solver_type: LinearSolverType::default(),
            tolerance: 1e-6,
            max_iterations: 100,
            verbose: false,
            epsilon: 1e-8,
            sigma_max: 0.5,
            eta_max: 0.25,
            mu_min: 1e-9,
            alpha_max: 0.995,
            alpha_min: 1e-6,
            beta: 0.75,
            tau: 0.01,
        }
    }
}

fn positive(parameter: &'static str, value: f64) -> Result<f64, SolverError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SolverError::InvalidConfig { parameter, value }.log())
    }
}

impl InteriorPointConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the descent method.
    pub fn with_descent(mut self, descent: DescentMethod) -> Self {
        self.descent = descent;
        self
    }

    /// Set the dense factorization backend.
    pub fn with_linear_solver_type(mut self, linear_solver_type: LinearSolverType) -> Self {
        self.linear_solver_type = linear_solver_type;
        self
    }

    /// Enable or disable telemetry output.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the convergence tolerance (must be positive).
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self, SolverError> {
        self.tolerance = positive("tolerance", tolerance)?;
        Ok(self)
    }

    /// Set the iteration cap (must be positive).
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Result<Self, SolverError> {
        if max_iterations == 0 {
            return Err(SolverError::InvalidConfig {
                parameter: "max_iterations",
                value: 0.0,
            }
            .log());
        }
        self.max_iterations = max_iterations;
        Ok(self)
    }

    /// Set the numerical floor (must be positive).
    pub fn with_epsilon(mut self, epsilon: f64) -> Result<Self, SolverError> {
        self.epsilon = positive("epsilon", epsilon)?;
        Ok(self)
    }

    /// Set the centering parameter cap (must be positive).
    pub fn with_sigma_max(mut self, sigma_max: f64) -> Result<Self, SolverError> {
        self.sigma_max = positive("sigma_max", sigma_max)?;
        Ok(self)
    }

    /// Set the forcing value cap (must be positive).
    pub fn with_eta_max(mut self, eta_max: f64) -> Result<Self, SolverError> {
        self.eta_max = positive("eta_max", eta_max)?;
        Ok(self)
    }

    /// Set the barrier parameter floor (must be positive).
    pub fn with_mu_min(mut self, mu_min: f64) -> Result<Self, SolverError> {
        self.mu_min = positive("mu_min", mu_min)?;
        Ok(self)
    }

    /// Set the initial line search step (must be positive).
    pub fn with_alpha_max(mut self, alpha_max: f64) -> Result<Self, SolverError> {
        self.alpha_max = positive("alpha_max", alpha_max)?;
        Ok(self)
    }

    /// Set the smallest admissible line search step (must be positive).
    pub fn with_alpha_min(mut self, alpha_min: f64) -> Result<Self, SolverError> {
        self.alpha_min = positive("alpha_min", alpha_min)?;
        Ok(self)
    }

    /// Set the backtracking shrink factor (must be positive).
    pub fn with_beta(mut self, beta: f64) -> Result<Self, SolverError> {
        self.beta = positive("beta", beta)?;
        Ok(self)
    }

    /// Set the sufficient-decrease coefficient (must be positive).
    pub fn with_tau(mut self, tau: f64) -> Result<Self, SolverError> {
        self.tau = positive("tau", tau)?;
        Ok(self)
    }

    /// Check every parameter, for configurations assembled by direct
    /// field access rather than the builders.
    pub fn validate(&self) -> Result<(), SolverError> {
        positive("tolerance", self.tolerance)?;
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig {
                parameter: "max_iterations",
                value: 0.0,
            }
            .log());
        }
        positive("epsilon", self.epsilon)?;
        positive("sigma_max", self.sigma_max)?;
        positive("eta_max", self.eta_max)?;
        positive("mu_min", self.mu_min)?;
        positive("alpha_max", self.alpha_max)?;
        positive("alpha_min", self.alpha_min)?;
        positive("beta", self.beta)?;
        positive("tau", self.tau)?;
        Ok(())
    }

    /// Print configuration parameters (debug level only).
    pub fn print_configuration(&self) {
        debug!(
            "Configuration:\n  Solver:         Interior point ({})\n  Linear solver:  {}\n  Tolerance:      {:.2e}\n  Max iterations: {}\n  epsilon:        {:.2e}\n  sigma_max:      {:.2}\n  eta_max:        {:.2}\n  mu_min:         {:.2e}\n  alpha range:    [{:.2e}, {:.3}]\n  beta:           {:.2}\n  tau:            {:.2}",
            self.descent,
            self.linear_solver_type,
            self.tolerance,
            self.max_iterations,
            self.epsilon,
            self.sigma_max,
            self.eta_max,
            self.mu_min,
            self.alpha_min,
            self.alpha_max,
            self.beta,
            self.tau
        );
    }
}

/// Callback values at the current iterate
struct Evaluation {
    f: f64,
    c: DVector<f64>,
    g: DVector<f64>,
    j: DMatrix<f64>,
    w: DMatrix<f64>,
}

/// Primal and dual search directions
struct StepDirections {
    p_x: DVector<f64>,
    p_z: DVector<f64>,
}

/// Accepted point produced by the line search
struct LineSearchOutcome {
    x: DVector<f64>,
    z: DVector<f64>,
    objective: f64,
    alpha: f64,
    evaluations: usize,
}

/// Callback invocation counters for diagnostics
#[derive(Default)]
struct EvalCounters {
    objective: usize,
    constraints: usize,
    gradients: usize,
}

/// Primal-dual interior-point solver.
///
/// Owns a configuration and a telemetry sink; each call to
/// [`InteriorPointSolver::solve`] runs one complete iteration from a
/// caller-supplied guess and returns the final primal-dual pair with a
/// termination status. Workspace is allocated per solve; nothing is
/// shared between solves (in particular the BFGS approximation starts
/// from the identity every time).
pub struct InteriorPointSolver {
    config: InteriorPointConfig,
    sink: Box<dyn TelemetrySink>,
}

impl Default for InteriorPointSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl InteriorPointSolver {
    /// Create a solver with the default configuration.
    pub fn new() -> Self {
        Self::with_config(InteriorPointConfig::default())
    }

    /// Create a solver with the given configuration.
    pub fn with_config(config: InteriorPointConfig) -> Self {
        Self {
            config,
            sink: Box::new(StdoutSink),
        }
    }

    /// Access the active configuration.
    pub fn config(&self) -> &InteriorPointConfig {
        &self.config
    }

    /// Replace the telemetry sink.
    ///
    /// The default sink writes to standard output; tests typically inject
    /// a [`crate::telemetry::MemorySink`] and inspect the captured rows.
    pub fn set_telemetry_sink(&mut self, sink: impl TelemetrySink + 'static) {
        self.sink = Box::new(sink);
    }

    fn create_linear_solver(&self) -> Box<dyn DenseLinearSolver> {
        match self.config.linear_solver_type {
            LinearSolverType::DenseLdlt => Box::new(DenseLdltSolver::new()),
            LinearSolverType::DenseLblt => Box::new(DenseLbltSolver::new()),
        }
    }

    /// Evaluate all callbacks at the current iterate and verify shapes.
    fn evaluate<P: Problem + ?Sized>(
        &self,
        problem: &P,
        x: &DVector<f64>,
        z: &DVector<f64>,
        n: usize,
        m: usize,
        counters: &mut EvalCounters,
    ) -> BarrierSolverResult<Evaluation> {
        let f = problem.objective(x)?;
        let c = problem.constraints(x)?;
        let g = problem.objective_gradient(x)?;
        let j = problem.constraints_jacobian(x, z)?;
        let w = problem.lagrangian_hessian(x, z)?;
        counters.objective += 1;
        counters.constraints += 1;
        counters.gradients += 1;

        if c.len() != m {
            return Err(CoreError::DimensionMismatch(format!(
                "constraints returned length {}, expected {}",
                c.len(),
                m
            ))
            .log()
            .into());
        }
        if g.len() != n {
            return Err(CoreError::DimensionMismatch(format!(
                "objective_gradient returned length {}, expected {}",
                g.len(),
                n
            ))
            .log()
            .into());
        }
        if j.shape() != (m, n) {
            return Err(CoreError::DimensionMismatch(format!(
                "constraints_jacobian returned {}x{}, expected {}x{}",
                j.nrows(),
                j.ncols(),
                m,
                n
            ))
            .log()
            .into());
        }
        if w.shape() != (n, n) {
            return Err(CoreError::DimensionMismatch(format!(
                "lagrangian_hessian returned {}x{}, expected {}x{}",
                w.nrows(),
                w.ncols(),
                n,
                n
            ))
            .log()
            .into());
        }

        Ok(Evaluation { f, c, g, j, w })
    }

    /// Solve the reduced Newton system and recover the dual direction.
    fn compute_step(
        &self,
        eval: &Evaluation,
        b: &DMatrix<f64>,
        z: &DVector<f64>,
        mu: f64,
        linear_solver: &mut Box<dyn DenseLinearSolver>,
    ) -> BarrierSolverResult<StepDirections> {
        let epsilon = self.config.epsilon;

        // Shifted constraint values keep the divisions away from zero; on
        // the strict interior c - eps < 0 componentwise.
        let c_eps_inv = eval.c.map(|ci| 1.0 / (ci - epsilon));
        let s_diag = eval.c.zip_map(z, |ci, zi| zi / (ci - epsilon));

        let sj = row_scale(&eval.j, &s_diag);
        let g_b = &eval.g - mu * (eval.j.transpose() * &c_eps_inv);
        let h = b + &eval.w - eval.j.transpose() * &sj;

        let rhs = -&g_b;
        let p_x = linear_solver.solve_symmetric(&h, &rhs)?;
        let p_z = -(z + mu * &c_eps_inv + &sj * &p_x);

        Ok(StepDirections { p_x, p_z })
    }

    /// Fraction-to-boundary rule followed by backtracking on the barrier
    /// merit function.
    fn line_search<P: Problem + ?Sized>(
        &self,
        problem: &P,
        x: &DVector<f64>,
        z: &DVector<f64>,
        step: &StepDirections,
        eval: &Evaluation,
        mu: f64,
        eta: f64,
        counters: &mut EvalCounters,
    ) -> BarrierSolverResult<LineSearchOutcome> {
        let cfg = &self.config;

        // Largest step keeping z strictly positive.
        let mut alpha = cfg.alpha_max;
        for i in 0..z.len() {
            if step.p_z[i] < 0.0 {
                alpha = alpha.min(cfg.alpha_max * z[i] / (-step.p_z[i]));
            }
        }

        let psi = merit_value(eval.f, &eval.c, z, mu, cfg.epsilon);
        let dpsi = merit_directional_derivative(
            &eval.g, &eval.c, &eval.j, z, &step.p_x, &step.p_z, mu, cfg.epsilon,
        );

        let mut evaluations = 0;
        loop {
            evaluations += 1;
            let x_new = x + alpha * &step.p_x;
            let z_new = z + alpha * &step.p_z;

            let trial = problem
                .objective(&x_new)
                .and_then(|f_new| problem.constraints(&x_new).map(|c_new| (f_new, c_new)));
            counters.objective += 1;
            counters.constraints += 1;

            // A refused or non-finite trial point is just an unacceptable
            // candidate; contract the step and retry.
            if let Ok((f_new, c_new)) = trial {
                if c_new.len() != eval.c.len() {
                    return Err(CoreError::DimensionMismatch(format!(
                        "constraints returned length {} at a trial point, expected {}",
                        c_new.len(),
                        eval.c.len()
                    ))
                    .log()
                    .into());
                }

                let psi_new = merit_value(f_new, &c_new, &z_new, mu, cfg.epsilon);
                let feasible = c_new.iter().all(|&ci| ci <= 0.0);
                if feasible && psi_new.is_finite() && psi_new < psi + cfg.tau * eta * alpha * dpsi
                {
                    return Ok(LineSearchOutcome {
                        x: x_new,
                        z: z_new,
                        objective: f_new,
                        alpha,
                        evaluations,
                    });
                }
            }

            alpha *= cfg.beta;
            if alpha < cfg.alpha_min {
                return Err(SolverError::LineSearchFailed {
                    alpha,
                    alpha_min: cfg.alpha_min,
                }
                .log()
                .into());
            }
        }
    }

    /// Run the interior-point iteration from `x_guess`.
    ///
    /// Returns the final primal-dual pair together with a
    /// [`SolveStatus`]: `Converged` when the scaled KKT residual dropped
    /// below the tolerance, `MaxIterationsReached` when the iteration cap
    /// was hit first (the last accepted iterate is still returned).
    ///
    /// # Errors
    ///
    /// Configuration problems are reported before the first iteration;
    /// evaluation failures at the current iterate, factorization
    /// breakdown, a BFGS curvature violation and line-search exhaustion
    /// abort the solve. No retries are attempted.
    pub fn solve<P: Problem + ?Sized>(
        &mut self,
        problem: &P,
        x_guess: &DVector<f64>,
    ) -> BarrierSolverResult<SolverResult> {
        let start_time = Instant::now();
        let cfg = self.config.clone();

        // Pre-solve validation: none of these consume iteration budget.
        cfg.validate()?;
        if x_guess.is_empty() {
            return Err(SolverError::EmptyProblem.log().into());
        }
        if cfg.descent == DescentMethod::Newton && !problem.has_objective_hessian() {
            return Err(SolverError::MissingHessian.log().into());
        }

        let n = x_guess.len();
        let mut counters = EvalCounters::default();

        let mut x = x_guess.clone();
        let c0 = problem.constraints(&x)?;
        counters.constraints += 1;
        let m = c0.len();
        if m == 0 {
            return Err(SolverError::NoConstraints.log().into());
        }
        let nu = (n + m) as f64;

        let mut z = DVector::from_element(m, 1.0);
        let mut b = DMatrix::identity(n, n);
        let mut g_old: Option<DVector<f64>> = None;
        let mut prev_step: Option<DVector<f64>> = None;
        let mut linear_solver = self.create_linear_solver();

        let mut alpha = 0.0_f64;
        let mut ls = 0_usize;
        let mut current_objective = f64::NAN;
        let mut initial_objective = f64::NAN;
        let mut status = SolveStatus::MaxIterationsReached;
        let mut iterations = 0;
        let mut kkt_residual = f64::INFINITY;
        let mut dual_residual_norm = f64::INFINITY;
        let mut complementarity_norm = f64::INFINITY;

        if tracing::enabled!(tracing::Level::DEBUG) {
            cfg.print_configuration();
        }
        if cfg.verbose {
            self.sink.emit(IterationRecord::header());
        }

        for iter in 0..cfg.max_iterations {
            iterations = iter + 1;

            let eval = self.evaluate(problem, &x, &z, n, m, &mut counters)?;
            current_objective = eval.f;
            if iter == 0 {
                initial_objective = eval.f;
            }

            // The Hessian block of the reduced system: exact, quasi-Newton
            // or identity depending on the configured descent method.
            if cfg.descent == DescentMethod::Newton {
                b = problem.objective_hessian(&x)?;
                if b.shape() != (n, n) {
                    return Err(CoreError::DimensionMismatch(format!(
                        "objective_hessian returned {}x{}, expected {}x{}",
                        b.nrows(),
                        b.ncols(),
                        n,
                        n
                    ))
                    .log()
                    .into());
                }
            }

            // Unperturbed KKT residuals: dual feasibility and
            // complementarity.
            let r_x = &eval.g + eval.j.transpose() * &z;
            let r_c = eval.c.component_mul(&z);
            let norm_r0 = (r_x.norm_squared() + r_c.norm_squared()).sqrt();
            kkt_residual = norm_r0 / nu;
            dual_residual_norm = r_x.norm();
            complementarity_norm = r_c.norm();

            // Centering schedule.
            let eta = cfg.eta_max.min(kkt_residual);
            let sigma = cfg.sigma_max.min(kkt_residual.sqrt());
            let duality_gap = -eval.c.dot(&z);
            let mu = cfg.mu_min.max(sigma * duality_gap / m as f64);

            let record = IterationRecord {
                iteration: iterations,
                objective: eval.f,
                log10_mu: mu.log10(),
                sigma,
                dual_residual_norm,
                complementarity_norm,
                step_size: alpha,
                line_search_steps: ls,
            };
            if cfg.verbose {
                self.sink.emit(&record.format_row());
            }
            debug!(
                "iter {:>3}: f = {:.6e}, mu = {:.2e}, ||r_x|| = {:.2e}, ||r_c|| = {:.2e}, alpha = {:.2e}, ls = {}",
                iterations, eval.f, mu, dual_residual_norm, complementarity_norm, alpha, ls
            );

            if kkt_residual < cfg.tolerance {
                status = SolveStatus::Converged;
                break;
            }

            // Quasi-Newton refresh, once a previous gradient exists.
            if cfg.descent == DescentMethod::Bfgs && iter > 0 {
                if let (Some(g_prev), Some(s)) = (&g_old, &prev_step) {
                    let y = &eval.g - g_prev;
                    b = bfgs_update(&b, s, &y)?;
                }
            }

            let step = self.compute_step(&eval, &b, &z, mu, &mut linear_solver)?;
            let outcome =
                self.line_search(problem, &x, &z, &step, &eval, mu, eta, &mut counters)?;

            alpha = outcome.alpha;
            ls = outcome.evaluations;
            prev_step = Some(alpha * &step.p_x);
            g_old = Some(eval.g);
            current_objective = outcome.objective;
            x = outcome.x;
            z = outcome.z;
        }

        let elapsed_time = start_time.elapsed();
        debug!(
            "finished: {} after {} iterations in {:.2} ms (KKT residual {:.2e})",
            status,
            iterations,
            elapsed_time.as_secs_f64() * 1000.0,
            kkt_residual
        );

        Ok(SolverResult {
            x,
            z,
            status,
            initial_objective,
            final_objective: current_objective,
            iterations,
            elapsed_time,
            convergence_info: Some(ConvergenceInfo {
                kkt_residual,
                dual_residual_norm,
                complementarity_norm,
                objective_evaluations: counters.objective,
                constraint_evaluations: counters.constraints,
                gradient_evaluations: counters.gradients,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration_values() {
        let config = InteriorPointConfig::default();
        assert_eq!(config.descent, DescentMethod::Bfgs);
        assert_eq!(config.linear_solver_type, LinearSolverType::DenseLdlt);
        assert!((config.tolerance - 1e-6).abs() < 1e-18);
        assert_eq!(config.max_iterations, 100);
        assert!(!config.verbose);
        assert!((config.epsilon - 1e-8).abs() < 1e-20);
        assert!((config.sigma_max - 0.5).abs() < 1e-15);
        assert!((config.eta_max - 0.25).abs() < 1e-15);
        assert!((config.mu_min - 1e-9).abs() < 1e-21);
        assert!((config.alpha_max - 0.995).abs() < 1e-15);
        assert!((config.alpha_min - 1e-6).abs() < 1e-18);
        assert!((config.beta - 0.75).abs() < 1e-15);
        assert!((config.tau - 0.01).abs() < 1e-15);
    }

    #[test]
    fn test_builders_accept_valid_values() -> Result<(), SolverError> {
        let config = InteriorPointConfig::new()
            .with_descent(DescentMethod::Steepest)
            .with_linear_solver_type(LinearSolverType::DenseLblt)
            .with_verbose(true)
            .with_tolerance(1e-8)?
            .with_max_iterations(50)?
            .with_epsilon(1e-10)?
            .with_sigma_max(0.4)?
            .with_eta_max(0.2)?
            .with_mu_min(1e-10)?
            .with_alpha_max(0.99)?
            .with_alpha_min(1e-8)?
            .with_beta(0.5)?
            .with_tau(0.05)?;

        assert_eq!(config.descent, DescentMethod::Steepest);
        assert!(config.verbose);
        config.validate()
    }

    #[test]
    fn test_builders_reject_non_positive_values() {
        assert!(InteriorPointConfig::new().with_tolerance(0.0).is_err());
        assert!(InteriorPointConfig::new().with_tolerance(-1.0).is_err());
        assert!(InteriorPointConfig::new().with_tolerance(f64::NAN).is_err());
        assert!(InteriorPointConfig::new().with_max_iterations(0).is_err());
        assert!(InteriorPointConfig::new().with_epsilon(0.0).is_err());
        assert!(InteriorPointConfig::new().with_sigma_max(-0.5).is_err());
        assert!(InteriorPointConfig::new().with_eta_max(0.0).is_err());
        assert!(InteriorPointConfig::new().with_mu_min(-1e-9).is_err());
        assert!(InteriorPointConfig::new().with_alpha_max(0.0).is_err());
        assert!(InteriorPointConfig::new().with_alpha_min(-1.0).is_err());
        assert!(InteriorPointConfig::new().with_beta(0.0).is_err());
        assert!(InteriorPointConfig::new().with_tau(-0.01).is_err());
    }

    #[test]
    fn test_validate_catches_direct_field_mutation() {
        let mut config = InteriorPointConfig::default();
        config.tolerance = -1.0;
        assert!(config.validate().is_err());

        let mut config = InteriorPointConfig::default();
        config.max_iterations = 0;
        assert!(config.validate().is_err());
    }
}
