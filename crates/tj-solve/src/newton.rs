//! Damped Newton iteration for small dense root-finding problems.

use nalgebra::{DMatrix, DVector};

use crate::error::{SolveError, SolveResult};

/// Newton solver configuration.
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for residual norm
    pub abs_tol: f64,
    /// Relative tolerance for residual norm
    pub rel_tol: f64,
    /// Floor applied to every unknown during line search
    pub min_value: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            abs_tol: 1e-10,
            rel_tol: 1e-10,
            min_value: 1e-9,
            line_search_beta: 0.5,
            max_line_search_iters: 20,
        }
    }
}

/// Newton iteration result.
#[derive(Debug)]
pub struct NewtonResult {
    /// Solution vector
    pub x: DVector<f64>,
    /// Final residual norm
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Converged flag
    pub converged: bool,
}

/// Solve `residual_fn(x) = 0` by Newton's method with backtracking.
///
/// Every unknown is kept at or above `config.min_value`; a step is only
/// accepted when it also reduces the residual norm, so the iteration fails
/// fast instead of wandering once no descent direction remains.
pub fn newton_solve<F, J>(
    x0: DVector<f64>,
    residual_fn: F,
    jacobian_fn: J,
    config: &NewtonConfig,
) -> SolveResult<NewtonResult>
where
    F: Fn(&DVector<f64>) -> SolveResult<DVector<f64>>,
    J: Fn(&DVector<f64>) -> SolveResult<DMatrix<f64>>,
{
    let mut x = x0;
    let mut residual = residual_fn(&x)?;
    let mut norm = residual.norm();
    let initial_norm = norm;

    for iteration in 0..config.max_iterations {
        if norm < config.abs_tol || norm < config.rel_tol * initial_norm {
            return Ok(NewtonResult {
                x,
                residual_norm: norm,
                iterations: iteration,
                converged: true,
            });
        }

        let step = jacobian_fn(&x)?
            .lu()
            .solve(&(-residual.clone()))
            .ok_or_else(|| SolveError::Numeric {
                what: format!("singular Jacobian at iteration {}", iteration),
            })?;

        // Backtrack until the candidate keeps every unknown above the floor
        // and shrinks the residual.
        let mut accepted = None;
        let mut alpha = 1.0;
        for _ in 0..config.max_line_search_iters {
            let candidate = &x + alpha * &step;
            let feasible = candidate.iter().all(|&v| v >= config.min_value);
            if feasible {
                let r = residual_fn(&candidate)?;
                let n = r.norm();
                if n < norm {
                    accepted = Some((candidate, r, n));
                    break;
                }
            }
            alpha *= config.line_search_beta;
        }

        let Some((next_x, next_residual, next_norm)) = accepted else {
            return Err(SolveError::ConvergenceFailed {
                what: format!(
                    "line search found no acceptable step at iteration {}, residual = {}",
                    iteration, norm
                ),
            });
        };

        tracing::debug!(iteration, residual = next_norm, step = alpha, "newton step");

        x = next_x;
        residual = next_residual;
        norm = next_norm;
    }

    Err(SolveError::ConvergenceFailed {
        what: format!(
            "no convergence in {} iterations, residual = {}",
            config.max_iterations, norm
        ),
    })
}
