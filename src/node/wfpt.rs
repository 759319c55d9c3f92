//! node::wfpt — observed response-time node with fit-statistic callbacks.
//!
//! Purpose
//! -------
//! Attach the quantile fit engine to an observed node: a holder of signed
//! response times, the current model parameters, and a CDF provider. A
//! sampler or optimizer drives the node through the
//! [`FitStatisticProvider`] methods.
//!
//! Key behaviors
//! -------------
//! - [`FitStatisticProvider`] is implemented by any node type that owns a
//!   [`QuantileFitEngine`], exposes its observations, and can produce its
//!   current model CDF. All six node operations are provided methods:
//!   `compute_quantiles_stats`, `set_quantiles_stats`,
//!   `get_quantiles_stats`, `chisquare`, `gsquare` and `quantiles`, plus
//!   `chisquare_test`.
//! - [`WfptNode`] is the concrete node over any [`ModelCdfProvider`].
//!   [`WfptNode::statistic_at`] evaluates a statistic at an arbitrary
//!   parameter vector without touching the stored parameters, which is what
//!   the optimizer needs.
//!
//! Invariants & assumptions
//! ------------------------
//! - The model CDF is recomputed on every statistic request; it is never
//!   cached, so changing parameters cannot produce stale statistics.
//! - The statistics cache persists across parameter changes until it is
//!   recomputed or replaced.
//! - Quantile reporting treats a failed CDF evaluation like an empty CDF:
//!   both tables come back `2 × 0`.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use ndarray::array;
//! use wfpt_fit::goodness_of_fit::FitOptions;
//! use wfpt_fit::node::{BoundaryMixtureCdf, FitStatisticProvider, WfptNode};
//! use wfpt_fit::response_time::ObservationSet;
//!
//! let obs = ObservationSet::new(array![-0.6, -0.4, 0.3, 0.5, 0.7, 0.9]).unwrap();
//! let provider = BoundaryMixtureCdf::new(2.0, 2001).unwrap();
//! let mut node = WfptNode::new(obs, provider, array![0.6, 0.5, 0.6], FitOptions::default());
//!
//! node.compute_quantiles_stats(&[0.1, 0.3, 0.5, 0.7, 0.9]).unwrap();
//! let chi = node.chisquare().unwrap();
//! assert!(chi.is_finite() && chi >= 0.0);
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests cover the trait's provided methods through [`WfptNode`] with
//!   both built-in providers; the integration tests exercise the documented
//!   end-to-end properties.
use crate::{
    goodness_of_fit::{
        engine::QuantileFitEngine,
        errors::FitResult,
        options::FitOptions,
        report::QuantileReport,
        statistics::{ChiSquareOutcome, FitCriterion, FitOutcome},
        stats::QuantileStats,
    },
    node::provider::ModelCdfProvider,
    response_time::{
        cdf::{ModelCdf, SplitCdf, split_cdf},
        data::ObservationSet,
        grid::QuantileGrid,
    },
};
use ndarray::{Array1, ArrayView1};

/// FitStatisticProvider — fit-statistic and quantile callbacks of a node.
///
/// Required methods
/// ----------------
/// - `fit_engine` / `fit_engine_mut`: access to the node's engine.
/// - `observed`: the node's observations.
/// - `model_cdf`: the combined CDF at the node's current parameters.
///
/// Provided methods
/// ----------------
/// Everything else. Statistic methods fail only with
/// `FitError::StatsNotComputed`; degenerate CDFs saturate to ±∞.
pub trait FitStatisticProvider {
    fn fit_engine(&self) -> &QuantileFitEngine;

    fn fit_engine_mut(&mut self) -> &mut QuantileFitEngine;

    fn observed(&self) -> &ObservationSet;

    fn model_cdf(&self) -> FitResult<ModelCdf>;

    /// Boundary split used by quantile reporting.
    fn split_model_cdf(&self, model: &ModelCdf) -> SplitCdf {
        split_cdf(model)
    }

    /// Compute and cache quantile statistics on the probability grid
    /// `quantiles`.
    ///
    /// Errors
    /// ------
    /// - `FitError::Input` when the grid is empty, not strictly increasing,
    ///   or leaves (0, 1). The cache is left untouched.
    fn compute_quantiles_stats(&mut self, quantiles: &[f64]) -> FitResult<()> {
        let grid = QuantileGrid::new(quantiles)?;
        let observed = self.observed().clone();
        self.fit_engine_mut().compute_stats(&observed, &grid);
        Ok(())
    }

    /// Inject precomputed statistics.
    fn set_quantiles_stats(
        &mut self, n_samples: usize, emp_rt: Array1<f64>, freq_obs: Array1<f64>,
    ) -> FitResult<()> {
        self.fit_engine_mut().set_stats(n_samples, emp_rt, freq_obs)
    }

    /// Cached `(n_samples, emp_rt, freq_obs)`.
    fn get_quantiles_stats(&self) -> FitResult<&QuantileStats> {
        self.fit_engine().stats()
    }

    /// Pearson chi-square at the current parameters (`+∞` if degenerate).
    fn chisquare(&self) -> FitResult<f64> {
        self.fit_engine().chisquare(|| self.model_cdf())
    }

    /// G-square surrogate at the current parameters (`−∞` if degenerate).
    fn gsquare(&self) -> FitResult<f64> {
        self.fit_engine().gsquare(|| self.model_cdf())
    }

    /// Chi-square with its χ²(k − 1) p-value.
    fn chisquare_test(&self) -> FitResult<ChiSquareOutcome> {
        self.fit_engine().chisquare_test(|| self.model_cdf())
    }

    /// Model quantile tables per boundary.
    ///
    /// Parameters
    /// ----------
    /// - `grid`: `Option<&[f64]>`
    ///   Probabilities to report; `None` uses the configured report grid
    ///   (0.1, 0.3, 0.5, 0.7, 0.9 by default).
    ///
    /// Errors
    /// ------
    /// - `FitError::Input` for an invalid grid.
    fn quantiles(&self, grid: Option<&[f64]>) -> FitResult<QuantileReport> {
        let grid = grid.map(QuantileGrid::new).transpose()?;
        let model = self.model_cdf().unwrap_or_else(|_| ModelCdf::empty());
        let split = self.split_model_cdf(&model);
        Ok(self.fit_engine().quantile_report(&split, grid.as_ref()))
    }
}

/// WfptNode — observed two-boundary response-time node.
///
/// Fields
/// ------
/// - `observations`: [`ObservationSet`]
///   Signed response times; immutable once attached.
/// - `params`: `Array1<f64>`
///   Current parameter vector handed to the provider.
/// - `provider`: `P`
///   Model CDF provider.
/// - `engine`: [`QuantileFitEngine`]
///   Statistics cache and evaluation.
#[derive(Debug, Clone)]
pub struct WfptNode<P: ModelCdfProvider> {
    observations: ObservationSet,
    params: Array1<f64>,
    provider: P,
    engine: QuantileFitEngine,
}

impl<P: ModelCdfProvider> WfptNode<P> {
    pub fn new(
        observations: ObservationSet, provider: P, params: Array1<f64>, options: FitOptions,
    ) -> Self {
        WfptNode { observations, params, provider, engine: QuantileFitEngine::new(options) }
    }

    pub fn params(&self) -> ArrayView1<'_, f64> {
        self.params.view()
    }

    /// Replace the current parameters. The statistics cache is kept.
    pub fn set_params(&mut self, params: Array1<f64>) {
        self.params = params;
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Evaluate `criterion` at `theta` instead of the stored parameters.
    ///
    /// Errors
    /// ------
    /// - `FitError::StatsNotComputed` when the cache is empty.
    pub fn statistic_at(
        &self, criterion: FitCriterion, theta: ArrayView1<'_, f64>,
    ) -> FitResult<FitOutcome> {
        let time_range = self.engine.options().time_range;
        self.engine.evaluate(criterion, || self.provider.cdf_vec(theta, time_range))
    }
}

impl<P: ModelCdfProvider> FitStatisticProvider for WfptNode<P> {
    fn fit_engine(&self) -> &QuantileFitEngine {
        &self.engine
    }

    fn fit_engine_mut(&mut self) -> &mut QuantileFitEngine {
        &mut self.engine
    }

    fn observed(&self) -> &ObservationSet {
        &self.observations
    }

    fn model_cdf(&self) -> FitResult<ModelCdf> {
        self.provider.cdf_vec(self.params.view(), self.engine.options().time_range)
    }

    fn split_model_cdf(&self, model: &ModelCdf) -> SplitCdf {
        self.provider.split_cdf(model)
    }
}
