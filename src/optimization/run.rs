//! Derivative-free minimization of a node's fit statistic.
use crate::{
    goodness_of_fit::FitCriterion,
    node::{FitStatisticProvider, ModelCdfProvider, WfptNode},
    optimization::{
        adapter::StatisticCost,
        errors::{OptError, OptResult},
        options::OptimizeOptions,
        outcome::OptimOutcome,
    },
};
use argmin::{
    core::{Executor, State},
    solver::neldermead::NelderMead,
};
use ndarray::Array1;
use tracing::{debug, info};

/// Minimize `criterion` over the provider parameters of `node`.
///
/// Chi-square is minimized directly and G-square through its negation (see
/// [`StatisticCost`]). The search is a Nelder–Mead simplex started from
/// `θ₀` and `θ₀ + step·eᵢ` for each coordinate `i`. On success the best
/// parameter vector is stored on the node with `set_params`.
///
/// # Arguments
/// - `node`: node with computed quantile statistics.
/// - `criterion`: statistic to optimize.
/// - `theta0`: starting parameters (non-empty, finite).
/// - `opts`: iteration cap, simplex tolerance and initial step.
///
/// # Returns
/// An [`OptimOutcome`] whose `value` is the statistic at `theta_hat` in its
/// natural sign.
///
/// # Errors
/// - `OptError::Fit(FitError::StatsNotComputed)` when the node has no
///   statistics. Nothing is run in that case.
/// - `OptError::EmptyTheta0` / `OptError::InvalidTheta0` for a bad start.
/// - Any `argmin` runtime error via `From<argmin::core::Error>`.
///
/// # Examples
/// ```ignore
/// node.compute_quantiles_stats(&[0.1, 0.3, 0.5, 0.7, 0.9])?;
/// let out = minimize_statistic(&mut node, FitCriterion::ChiSquare, theta0, &OptimizeOptions::default())?;
/// println!("chi-square {} after {} iterations ({})", out.value, out.iterations, out.status);
/// ```
pub fn minimize_statistic<P: ModelCdfProvider>(
    node: &mut WfptNode<P>, criterion: FitCriterion, theta0: Array1<f64>, opts: &OptimizeOptions,
) -> OptResult<OptimOutcome> {
    node.get_quantiles_stats()?;
    validate_theta0(&theta0)?;

    info!(?criterion, dim = theta0.len(), max_iter = opts.max_iter, "starting fit-statistic minimization");
    let solver = NelderMead::new(initial_simplex(&theta0, opts.simplex_step))
        .with_sd_tolerance(opts.sd_tolerance)?;

    let outcome = {
        let problem = StatisticCost::new(node, criterion);
        let optimizer =
            Executor::new(problem, solver).configure(|state| state.max_iters(opts.max_iter as u64));
        let mut result = optimizer.run()?.state().clone();
        let iterations = result.get_iter();
        let function_counts = result.get_func_counts().clone();
        let termination = result.get_termination_status().clone();
        debug!(best_cost = result.get_best_cost(), iterations, "nelder-mead finished");

        let theta_hat = result.take_best_param();
        let value = match &theta_hat {
            Some(theta) => criterion.sentinel_value(node.statistic_at(criterion, theta.view())?),
            None => f64::NAN,
        };
        OptimOutcome::new(theta_hat, value, &termination, iterations, function_counts)?
    };

    node.set_params(outcome.theta_hat.clone());
    info!(
        value = outcome.value,
        converged = outcome.converged,
        iterations = outcome.iterations,
        status = %outcome.status,
        "fit-statistic minimization finished"
    );
    Ok(outcome)
}

// ---- Helper Methods ----

fn validate_theta0(theta0: &Array1<f64>) -> OptResult<()> {
    if theta0.is_empty() {
        return Err(OptError::EmptyTheta0);
    }
    match theta0.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(OptError::InvalidTheta0 { index, value: theta0[index] }),
        None => Ok(()),
    }
}

/// `θ₀` followed by one vertex per coordinate, offset by `step`.
fn initial_simplex(theta0: &Array1<f64>, step: f64) -> Vec<Array1<f64>> {
    std::iter::once(theta0.clone())
        .chain((0..theta0.len()).map(|i| {
            let mut vertex = theta0.clone();
            vertex[i] += step;
            vertex
        }))
        .collect()
}
