//! Normalized result of a fit-statistic minimization.
use crate::optimization::errors::{OptError, OptResult};
use argmin::core::{TerminationReason, TerminationStatus};
use ndarray::Array1;
use std::collections::HashMap;

/// Function-evaluation counters reported by `argmin` (e.g. `"cost_count"`).
pub type FnEvalMap = HashMap<String, u64>;

/// Canonical result returned by [`minimize_statistic`].
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: the statistic at `theta_hat` in its natural sign (chi-square,
///   or G-square, not the internal cost). `±∞` if `theta_hat` is degenerate.
/// - `converged`: `true` only when the simplex met `sd_tolerance`.
/// - `status`: human-readable termination status.
/// - `iterations`: iterations performed.
/// - `fn_evals`: function-evaluation counters.
///
/// [`minimize_statistic`]: crate::optimization::minimize_statistic
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Array1<f64>,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
}

impl OptimOutcome {
    /// Build an [`OptimOutcome`] from raw solver state.
    ///
    /// # Errors
    /// - `OptError::MissingThetaHat` if the solver produced no best parameter.
    pub fn new(
        theta_hat_opt: Option<Array1<f64>>, value: f64, termination: &TerminationStatus,
        iterations: u64, fn_evals: FnEvalMap,
    ) -> OptResult<Self> {
        let theta_hat = theta_hat_opt.ok_or(OptError::MissingThetaHat)?;
        let (converged, status) = match termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => {
                (matches!(reason, TerminationReason::SolverConverged), format!("{reason:?}"))
            }
        };
        Ok(Self { theta_hat, value, converged, status, iterations: iterations as usize, fn_evals })
    }
}
