//! Logarithmic-barrier merit function.
//!
//! The backtracking line search scores candidate points with
//!
//! ```text
//! psi(x, z; mu) = f(x) - c(x)^T z - mu * sum_i log(c_i(x)^2 * z_i + eps)
//! ```
//!
//! and measures descent along a direction `(p_x, p_z)` with
//!
//! ```text
//! Dpsi = p_x^T [g - J^T z - 2 mu J^T (1 / (c - eps))]
//!      - p_z^T [c + mu (1 / (z + eps))]
//! ```
//!
//! The squared constraint value inside the logarithm makes `psi` itself
//! insensitive to the sign of `c_i`; interior feasibility is enforced by
//! the line search's `c <= 0` filter, not by the merit function. Both
//! expressions use the solver's single configured numerical floor `eps`.

use nalgebra::{DMatrix, DVector};

/// Evaluate the barrier merit function at a point.
///
/// `f` and `c` are the objective and constraint values at `x`; passing
/// them in avoids re-invoking the callbacks for a point the caller has
/// already evaluated.
pub fn merit_value(
    f: f64,
    c: &DVector<f64>,
    z: &DVector<f64>,
    mu: f64,
    epsilon: f64,
) -> f64 {
    let barrier: f64 = c
        .iter()
        .zip(z.iter())
        .map(|(ci, zi)| (ci * ci * zi + epsilon).ln())
        .sum();
    f - c.dot(z) - mu * barrier
}

/// Evaluate the directional derivative of the merit function along
/// `(p_x, p_z)`.
#[allow(clippy::too_many_arguments)]
pub fn merit_directional_derivative(
    g: &DVector<f64>,
    c: &DVector<f64>,
    j: &DMatrix<f64>,
    z: &DVector<f64>,
    p_x: &DVector<f64>,
    p_z: &DVector<f64>,
    mu: f64,
    epsilon: f64,
) -> f64 {
    let c_eps_inv = c.map(|ci| 1.0 / (ci - epsilon));
    let primal = g - j.transpose() * z - 2.0 * mu * (j.transpose() * c_eps_inv);
    let dual = c + mu * z.map(|zi| 1.0 / (zi + epsilon));
    p_x.dot(&primal) - p_z.dot(&dual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{dmatrix, dvector};

    const EPSILON: f64 = 1e-8;

    #[test]
    fn test_merit_value_hand_computed() {
        // f = 2, c = [-1], z = [2], mu = 0.5:
        // psi = 2 - (-1 * 2) - 0.5 * ln((-1)^2 * 2 + eps) = 4 - 0.5 ln 2
        let psi = merit_value(2.0, &dvector![-1.0], &dvector![2.0], 0.5, EPSILON);
        let expected = 4.0 - 0.5 * 2.0_f64.ln();
        assert!((psi - expected).abs() < 1e-7);
    }

    #[test]
    fn test_barrier_term_ignores_constraint_sign() {
        // The squared argument of the logarithm makes the barrier part
        // identical for c and -c; only the linear coupling -c'z differs.
        let z = dvector![3.0];
        let psi_pos = merit_value(0.0, &dvector![1.0], &z, 0.25, EPSILON);
        let psi_neg = merit_value(0.0, &dvector![-1.0], &z, 0.25, EPSILON);

        assert!((psi_pos - psi_neg + 2.0 * 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_directional_derivative_hand_computed() {
        // One variable, one constraint, all quantities chosen so the two
        // bracketed terms are easy to evaluate by hand:
        //   g = [1], c = [-2], J = [1], z = [1], p_x = [1], p_z = [0], mu = 1
        //   primal = 1 - 1 - 2 * (1 / (-2 - eps)) ~ 1 - 1 + 1 = 1
        let dpsi = merit_directional_derivative(
            &dvector![1.0],
            &dvector![-2.0],
            &dmatrix![1.0],
            &dvector![1.0],
            &dvector![1.0],
            &dvector![0.0],
            1.0,
            EPSILON,
        );
        assert!((dpsi - 1.0).abs() < 1e-7);
    }

    #[test]
    fn test_directional_derivative_dual_term() {
        // Pure dual direction: Dpsi = -p_z^T (c + mu / (z + eps)).
        //   c = [-1], z = [1], mu = 2, p_z = [1]
        //   Dpsi = -(-1 + 2 / 1) = -1
        let dpsi = merit_directional_derivative(
            &dvector![0.0],
            &dvector![-1.0],
            &dmatrix![0.0],
            &dvector![1.0],
            &dvector![0.0],
            &dvector![1.0],
            2.0,
            EPSILON,
        );
        assert!((dpsi + 1.0).abs() < 1e-7);
    }

    #[test]
    fn test_newton_direction_descends_on_quadratic() {
        // For f = 1/2 x^2 at x = 2 with an inactive constraint, the
        // Newton-like direction p_x = -g must have negative Dpsi once the
        // barrier contribution is small.
        let g = dvector![2.0];
        let c = dvector![-10.0];
        let j = dmatrix![0.0];
        let z = dvector![1.0];
        let p_x = dvector![-2.0];
        let p_z = dvector![0.0];

        let dpsi = merit_directional_derivative(&g, &c, &j, &z, &p_x, &p_z, 1e-6, EPSILON);
        assert!(dpsi < 0.0);
    }
}
