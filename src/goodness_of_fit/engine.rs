//! goodness_of_fit::engine — per-node quantile fit engine.
//!
//! Purpose
//! -------
//! Own the mutable statistics cache of one observed node and evaluate fit
//! statistics against model CDFs supplied on demand. The engine never
//! caches the model CDF: every evaluation pulls a fresh one, so results are
//! always relative to the caller's current parameters.
//!
//! Key behaviors
//! -------------
//! - [`QuantileFitEngine::compute_stats`] derives and stores
//!   [`QuantileStats`] from observations; [`QuantileFitEngine::set_stats`]
//!   injects precomputed statistics. Both replace the cache wholesale.
//! - [`QuantileFitEngine::evaluate`] checks the cache first, then asks the
//!   supplied closure for the model CDF. Provider failures, degenerate
//!   CDFs, non-finite cached quantiles and NaN statistic values become
//!   [`FitOutcome::Degenerate`]; only the missing-cache precondition is
//!   returned as an error.
//! - [`QuantileFitEngine::quantile_report`] tabulates model quantiles and
//!   does not need the cache.
//!
//! Invariants & assumptions
//! ------------------------
//! - The model-CDF closure is not invoked when the cache is empty.
//! - One engine per node; engines share nothing, so independent nodes can
//!   be evaluated in parallel without synchronization.
//!
//! Testing notes
//! -------------
//! - Unit tests drive the engine with fixed CDF closures: uninitialized
//!   cache, exact fit, empty CDF sentinels, and provider failures. Node-level
//!   behavior is covered in `node::wfpt` and the integration tests.
use crate::{
    goodness_of_fit::{
        errors::{FitError, FitResult},
        options::FitOptions,
        proportion::theoretical_proportion,
        report::QuantileReport,
        statistics::{
            ChiSquareOutcome, FitCriterion, FitOutcome, gsquare_surrogate, pearson_chisquare,
        },
        stats::QuantileStats,
    },
    response_time::{
        cdf::{ModelCdf, SplitCdf},
        data::ObservationSet,
        grid::QuantileGrid,
    },
};
use ndarray::Array1;
use tracing::debug;

/// QuantileFitEngine — statistics cache plus fit-statistic evaluation.
///
/// Fields
/// ------
/// - `options`: [`FitOptions`]
///   Floor, estimator, provider window and default report grid.
/// - `stats`: `Option<QuantileStats>`
///   Cached data summary; `None` until computed or injected.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuantileFitEngine {
    options: FitOptions,
    stats: Option<QuantileStats>,
}

impl QuantileFitEngine {
    pub fn new(options: FitOptions) -> Self {
        QuantileFitEngine { options, stats: None }
    }

    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Derive statistics from `obs` on `grid` and replace the cache.
    pub fn compute_stats(&mut self, obs: &ObservationSet, grid: &QuantileGrid) {
        let stats = QuantileStats::from_observations(obs, grid, &self.options.estimator);
        debug!(
            n_lower = obs.n_lower(),
            n_upper = obs.n_upper(),
            grid_len = grid.len(),
            n_bins = stats.n_bins(),
            "computed quantile statistics"
        );
        self.stats = Some(stats);
    }

    /// Inject precomputed statistics, replacing the cache.
    ///
    /// Errors
    /// ------
    /// - `FitError::StatsShapeMismatch` when `freq_obs` does not have one
    ///   more entry than `emp_rt`. The cache is left untouched.
    pub fn set_stats(
        &mut self, n_samples: usize, emp_rt: Array1<f64>, freq_obs: Array1<f64>,
    ) -> FitResult<()> {
        let stats = QuantileStats::from_parts(n_samples, emp_rt, freq_obs)?;
        debug!(n_samples, n_bins = stats.n_bins(), "injected quantile statistics");
        self.stats = Some(stats);
        Ok(())
    }

    /// Cached statistics.
    ///
    /// Errors
    /// ------
    /// - `FitError::StatsNotComputed` before the first compute or set.
    pub fn stats(&self) -> FitResult<&QuantileStats> {
        self.stats.as_ref().ok_or(FitError::StatsNotComputed)
    }

    /// Evaluate `criterion` against the CDF produced by `model_cdf`.
    ///
    /// Parameters
    /// ----------
    /// - `criterion`: [`FitCriterion`]
    ///   Statistic to compute.
    /// - `model_cdf`: `FnOnce() -> FitResult<ModelCdf>`
    ///   Produces the combined CDF at the current parameters. Called at most
    ///   once, and only when the cache is populated.
    ///
    /// Returns
    /// -------
    /// `FitResult<FitOutcome>`
    ///   `Finite(stat)` on success, `Degenerate` when the CDF could not be
    ///   produced or resolved against the cache, or the statistic is NaN.
    ///
    /// Errors
    /// ------
    /// - `FitError::StatsNotComputed` when the cache is empty.
    pub fn evaluate<F>(&self, criterion: FitCriterion, model_cdf: F) -> FitResult<FitOutcome>
    where
        F: FnOnce() -> FitResult<ModelCdf>,
    {
        let stats = self.stats()?;
        let resolved = model_cdf().and_then(|model| {
            theoretical_proportion(stats.emp_rt(), &model, self.options.proportion_floor)
        });

        let proportions = match resolved {
            Ok(p) => p,
            Err(err) => {
                debug!(?criterion, reason = %err, "degenerate model CDF; reporting sentinel");
                return Ok(FitOutcome::Degenerate);
            }
        };

        let value = match criterion {
            FitCriterion::ChiSquare => {
                pearson_chisquare(stats.freq_obs(), proportions.view(), stats.n_samples())
            }
            FitCriterion::GSquare => gsquare_surrogate(stats.freq_obs(), proportions.view()),
        };
        if value.is_nan() {
            debug!(?criterion, "statistic evaluated to NaN; reporting sentinel");
            return Ok(FitOutcome::Degenerate);
        }
        Ok(FitOutcome::Finite(value))
    }

    /// Pearson chi-square; `+∞` on a degenerate CDF.
    pub fn chisquare<F>(&self, model_cdf: F) -> FitResult<f64>
    where
        F: FnOnce() -> FitResult<ModelCdf>,
    {
        Ok(self.evaluate(FitCriterion::ChiSquare, model_cdf)?.or_pos_infinity())
    }

    /// G-square surrogate `2·Σ O·ln p`; `−∞` on a degenerate CDF.
    pub fn gsquare<F>(&self, model_cdf: F) -> FitResult<f64>
    where
        F: FnOnce() -> FitResult<ModelCdf>,
    {
        Ok(self.evaluate(FitCriterion::GSquare, model_cdf)?.or_neg_infinity())
    }

    /// Chi-square with its χ²(k − 1) p-value.
    pub fn chisquare_test<F>(&self, model_cdf: F) -> FitResult<ChiSquareOutcome>
    where
        F: FnOnce() -> FitResult<ModelCdf>,
    {
        let outcome = self.evaluate(FitCriterion::ChiSquare, model_cdf)?;
        Ok(ChiSquareOutcome::new(outcome, self.stats()?.n_bins()))
    }

    /// Model quantile tables on `grid`, or on the configured report grid.
    pub fn quantile_report(&self, split: &SplitCdf, grid: Option<&QuantileGrid>) -> QuantileReport {
        QuantileReport::from_split(split, grid.unwrap_or(&self.options.report_grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The uninitialized-cache precondition.
    // - Exact-fit and degenerate evaluations for both statistics, including
    //   data with an empty boundary.
    // - Cache replacement on set.
    // -------------------------------------------------------------------------

    /// Four lower and four upper observations mirrored around zero.
    fn symmetric_engine() -> QuantileFitEngine {
        let obs = ObservationSet::new(array![-0.4, -0.6, -0.8, -1.0, 0.4, 0.6, 0.8, 1.0]).unwrap();
        let grid = QuantileGrid::new(&[0.25, 0.5, 0.75]).unwrap();
        let mut engine = QuantileFitEngine::default();
        engine.compute_stats(&obs, &grid);
        engine
    }

    /// CDF whose values at `emp_rt` reproduce the observed bin masses exactly.
    fn matching_cdf(engine: &QuantileFitEngine) -> ModelCdf {
        let emp = engine.stats().unwrap().emp_rt().to_vec();
        let mut x = emp.clone();
        x.push(emp[emp.len() - 1] + 1.0);
        let cdf: Vec<f64> = (1..=x.len()).map(|i| i as f64 / 8.0).collect();
        ModelCdf::new(Array1::from(x), Array1::from(cdf)).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Statistics read before the cache exists fail without calling the
    // provider.
    //
    // Given
    // -----
    // - A fresh engine and a closure that panics if called.
    //
    // Expect
    // ------
    // - `Err(StatsNotComputed)` from `chisquare`, `gsquare` and `stats`.
    fn evaluate_without_stats_is_a_precondition_error() {
        let engine = QuantileFitEngine::default();

        let chi = engine.chisquare(|| panic!("provider must not be called"));
        let g = engine.gsquare(|| panic!("provider must not be called"));

        assert_eq!(chi.unwrap_err(), FitError::StatsNotComputed);
        assert_eq!(g.unwrap_err(), FitError::StatsNotComputed);
        assert_eq!(engine.stats().unwrap_err(), FitError::StatsNotComputed);
    }

    #[test]
    // Purpose
    // -------
    // A CDF that reproduces every bin mass gives a zero chi-square.
    //
    // Given
    // -----
    // - Symmetric 4 + 4 observations on grid (0.25, 0.5, 0.75), so every
    //   one of the 8 bins holds 1 observation.
    // - A CDF stepping by 1/8 at each empirical quantile.
    //
    // Expect
    // ------
    // - chisquare = 0, G-square = 2·8·ln(1/8), p-value 1.
    fn evaluate_exact_fit_gives_zero_chisquare() {
        let engine = symmetric_engine();
        let model = matching_cdf(&engine);

        let chi = engine.chisquare(|| Ok(model.clone())).unwrap();
        let g = engine.gsquare(|| Ok(model.clone())).unwrap();
        let test = engine.chisquare_test(|| Ok(model.clone())).unwrap();

        assert_relative_eq!(chi, 0.0, epsilon = 1e-12);
        assert_relative_eq!(g, 16.0 * (0.125_f64).ln(), epsilon = 1e-10);
        assert_eq!(test.df(), 7);
        assert_relative_eq!(test.p_value(), 1.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Empty CDFs and provider failures saturate to the directional
    // infinities.
    //
    // Given
    // -----
    // - Cached statistics; an empty CDF; a failing provider closure.
    //
    // Expect
    // ------
    // - chisquare = +∞ and gsquare = −∞ in both cases.
    fn evaluate_degenerate_cdf_saturates_to_sentinels() {
        let engine = symmetric_engine();
        let failing = || Err(FitError::ProviderFailed { reason: "diverged".to_string() });

        assert_eq!(engine.chisquare(|| Ok(ModelCdf::empty())).unwrap(), f64::INFINITY);
        assert_eq!(engine.gsquare(|| Ok(ModelCdf::empty())).unwrap(), f64::NEG_INFINITY);
        assert_eq!(engine.chisquare(failing).unwrap(), f64::INFINITY);
        assert_eq!(engine.gsquare(failing).unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    // Purpose
    // -------
    // A boundary without observations leaves NaN quantiles in the cache and
    // both statistics saturate instead of returning finite values.
    //
    // Given
    // -----
    // - Upper-only observations [0.3, 0.5, 0.7] on grid (0.5,).
    // - CDF x = [-1, 0, 1, 2], cdf = [0, .5, .75, 1].
    //
    // Expect
    // ------
    // - emp_rt[0] is NaN.
    // - chisquare = +∞, gsquare = −∞, chi-square p-value 0.
    fn evaluate_single_boundary_data_saturates_to_sentinels() {
        let obs = ObservationSet::new(array![0.3, 0.5, 0.7]).unwrap();
        let grid = QuantileGrid::new(&[0.5]).unwrap();
        let model =
            ModelCdf::new(array![-1.0, 0.0, 1.0, 2.0], array![0.0, 0.5, 0.75, 1.0]).unwrap();
        let mut engine = QuantileFitEngine::default();
        engine.compute_stats(&obs, &grid);

        let test = engine.chisquare_test(|| Ok(model.clone())).unwrap();

        assert!(engine.stats().unwrap().emp_rt()[0].is_nan());
        assert_eq!(engine.chisquare(|| Ok(model.clone())).unwrap(), f64::INFINITY);
        assert_eq!(engine.gsquare(|| Ok(model.clone())).unwrap(), f64::NEG_INFINITY);
        assert_eq!(test.stat(), f64::INFINITY);
        assert_eq!(test.p_value(), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // A non-monotone CDF that drives a proportion negative makes the
    // G-square logarithm NaN; the outcome is reported as degenerate.
    //
    // Given
    // -----
    // - Injected stats emp_rt = [-1, 0, 1], freq_obs = [1, 1, 1, 1].
    // - CDF x = [-1, 0, 1], cdf = [0.6, 0.3, 0.9].
    //
    // Expect
    // ------
    // - gsquare = −∞.
    fn evaluate_nan_statistic_is_degenerate() {
        let mut engine = QuantileFitEngine::default();
        engine.set_stats(4, array![-1.0, 0.0, 1.0], array![1.0, 1.0, 1.0, 1.0]).unwrap();
        let model = ModelCdf::new(array![-1.0, 0.0, 1.0], array![0.6, 0.3, 0.9]).unwrap();

        assert_eq!(engine.gsquare(|| Ok(model)).unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    // Purpose
    // -------
    // Injected statistics replace computed ones and are returned verbatim.
    //
    // Given
    // -----
    // - A computed cache, then `set_stats(10, [-1, 0, 1], [1, 2, 3, 4])`.
    //
    // Expect
    // ------
    // - `stats()` returns exactly the injected triple.
    // - A malformed injection fails and keeps the previous cache.
    fn set_stats_replaces_cache() {
        let mut engine = symmetric_engine();

        engine.set_stats(10, array![-1.0, 0.0, 1.0], array![1.0, 2.0, 3.0, 4.0]).unwrap();
        let bad = engine.set_stats(3, array![0.0], array![1.0]);

        let stats = engine.stats().unwrap();
        assert_eq!(stats.n_samples(), 10);
        assert_eq!(stats.emp_rt().to_vec(), vec![-1.0, 0.0, 1.0]);
        assert_eq!(stats.freq_obs().to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
        assert!(matches!(bad, Err(FitError::StatsShapeMismatch { .. })));
    }
}
