//! wfpt_fit — quantile goodness-of-fit for two-boundary first-passage-time models.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the fit statistics to Python via the `_wfpt_fit` extension module. Observed
//! data are signed response times (negative for lower-boundary responses,
//! positive for upper-boundary responses); models are summarized by a combined
//! CDF over signed time.
//!
//! Key behaviors
//! -------------
//! - `response_time`: observation validation, quantile grids, the plotting-
//!   position quantile estimator, left-search primitives and CDF splitting.
//! - `goodness_of_fit`: the cached quantile statistics, theoretical bin
//!   proportions, chi-square / G-square evaluation and quantile reports.
//! - `node`: model CDF providers and the observed [`node::WfptNode`] that
//!   exposes the fit statistics as methods.
//! - `optimization`: Nelder–Mead minimization of a fit statistic over the
//!   provider parameters.
//! - With `python-bindings`, a `WfptNode` class and an `OptimizeOutcome`
//!   class are registered under `wfpt_fit.nodes`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner modules; the PyO3 items
//!   here perform only argument conversion, dispatch and error mapping.
//! - Python CDF callables are invoked with the GIL held and must return
//!   `(x, cdf)` with equal lengths; anything else is a degenerate
//!   evaluation, not an exception.
//!
//! Conventions
//! -----------
//! - Errors from core Rust code stay typed internally (`RTError`, `FitError`,
//!   `OptError`) and are converted to `ValueError` at the PyO3 boundary.
//! - Quantile tables cross the boundary as two rows `[times, targets]`.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on the inner modules and can ignore the
//!   items guarded by the `python-bindings` feature.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by the
//!   integration and property tests under `tests/`.

pub mod goodness_of_fit;
pub mod node;
pub mod optimization;
pub mod response_time;
pub mod utils;

#[cfg(feature = "python-bindings")]
use ndarray::ArrayView2;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    goodness_of_fit::FitCriterion,
    node::{BoundaryMixtureCdf, FitStatisticProvider, ModelCdfProvider, WfptNode},
    optimization::{OptimOutcome, minimize_statistic},
    response_time::ObservationSet,
    utils::{
        PyCdfProvider, build_fit_options, build_optimize_options, extract_owned_array,
    },
};

/// WfptNode — Python-facing wrapper for an observed two-boundary node.
///
/// Purpose
/// -------
/// Expose the quantile fit statistics of [`node::WfptNode`] to Python, with
/// the model CDF supplied either by a Python callable or by the built-in
/// Gamma latency mixture.
///
/// Parameters
/// ----------
/// Constructed from Python via:
/// - `WfptNode(data, cdf_fn, params, ...)`
///   `cdf_fn(params, time_range) -> (x, cdf)` provides the combined CDF.
/// - `WfptNode.gamma_mixture(data, params, shape=2.0, n_points=2001, ...)`
///   Uses [`BoundaryMixtureCdf`] with `params = (p_upper, mean_lower,
///   mean_upper)`.
///
/// Common keyword options: `proportion_floor`, `alphap`, `betap`,
/// `time_range`, `report_grid` (see [`goodness_of_fit::FitOptions`]).
///
/// Notes
/// -----
/// - `unsendable` because the callable provider holds a Python object that
///   is only ever touched on the creating thread.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "WfptNode", module = "wfpt_fit.nodes", unsendable)]
pub struct PyWfptNode {
    inner: WfptNode<Box<dyn ModelCdfProvider>>,
}

/// A quantile table as Python rows `[times, targets]`.
#[cfg(feature = "python-bindings")]
type TableRows = Vec<Vec<f64>>;

#[cfg(feature = "python-bindings")]
impl PyWfptNode {
    #[allow(clippy::too_many_arguments)]
    fn build<'py>(
        py: Python<'py>, data: &Bound<'py, PyAny>, provider: Box<dyn ModelCdfProvider>,
        params: &Bound<'py, PyAny>, proportion_floor: Option<f64>, alphap: Option<f64>,
        betap: Option<f64>, time_range: Option<(f64, f64)>, report_grid: Option<Vec<f64>>,
    ) -> PyResult<Self> {
        let observations = ObservationSet::new(extract_owned_array(py, data, "data")?)?;
        let params = extract_owned_array(py, params, "params")?;
        let options = build_fit_options(proportion_floor, alphap, betap, time_range, report_grid)?;
        Ok(PyWfptNode { inner: WfptNode::new(observations, provider, params, options) })
    }
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyWfptNode {
    #[new]
    #[pyo3(
        signature = (
            data,
            cdf_fn,
            params,
            proportion_floor = None,
            alphap = None,
            betap = None,
            time_range = None,
            report_grid = None,
        ),
        text_signature = "(data, cdf_fn, params, /, proportion_floor=1e-5, alphap=0.4, \
                          betap=0.4, time_range=(-5.0, 5.0), report_grid=None)"
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn new<'py>(
        py: Python<'py>, data: &Bound<'py, PyAny>, cdf_fn: Py<PyAny>, params: &Bound<'py, PyAny>,
        proportion_floor: Option<f64>, alphap: Option<f64>, betap: Option<f64>,
        time_range: Option<(f64, f64)>, report_grid: Option<Vec<f64>>,
    ) -> PyResult<Self> {
        let provider: Box<dyn ModelCdfProvider> = Box::new(PyCdfProvider::new(cdf_fn));
        Self::build(py, data, provider, params, proportion_floor, alphap, betap, time_range, report_grid)
    }

    #[staticmethod]
    #[pyo3(
        signature = (
            data,
            params,
            shape = 2.0,
            n_points = 2001,
            proportion_floor = None,
            alphap = None,
            betap = None,
            time_range = None,
            report_grid = None,
        ),
        text_signature = "(data, params, /, shape=2.0, n_points=2001, proportion_floor=1e-5, \
                          alphap=0.4, betap=0.4, time_range=(-5.0, 5.0), report_grid=None)"
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn gamma_mixture<'py>(
        py: Python<'py>, data: &Bound<'py, PyAny>, params: &Bound<'py, PyAny>, shape: f64,
        n_points: usize, proportion_floor: Option<f64>, alphap: Option<f64>, betap: Option<f64>,
        time_range: Option<(f64, f64)>, report_grid: Option<Vec<f64>>,
    ) -> PyResult<Self> {
        let provider: Box<dyn ModelCdfProvider> = Box::new(BoundaryMixtureCdf::new(shape, n_points)?);
        Self::build(py, data, provider, params, proportion_floor, alphap, betap, time_range, report_grid)
    }

    #[pyo3(signature = (quantiles), text_signature = "(self, quantiles, /)")]
    pub fn compute_quantiles_stats(&mut self, quantiles: Vec<f64>) -> PyResult<()> {
        self.inner.compute_quantiles_stats(&quantiles)?;
        Ok(())
    }

    #[pyo3(
        signature = (n_samples, emp_rt, freq_obs),
        text_signature = "(self, n_samples, emp_rt, freq_obs, /)"
    )]
    pub fn set_quantiles_stats<'py>(
        &mut self, py: Python<'py>, n_samples: usize, emp_rt: &Bound<'py, PyAny>,
        freq_obs: &Bound<'py, PyAny>,
    ) -> PyResult<()> {
        let emp_rt = extract_owned_array(py, emp_rt, "emp_rt")?;
        let freq_obs = extract_owned_array(py, freq_obs, "freq_obs")?;
        self.inner.set_quantiles_stats(n_samples, emp_rt, freq_obs)?;
        Ok(())
    }

    /// `(n_samples, emp_rt, freq_obs)` of the cached statistics.
    pub fn get_quantiles_stats(&self) -> PyResult<(usize, Vec<f64>, Vec<f64>)> {
        let stats = self.inner.get_quantiles_stats()?;
        Ok((stats.n_samples(), stats.emp_rt().to_vec(), stats.freq_obs().to_vec()))
    }

    pub fn chisquare(&self) -> PyResult<f64> {
        Ok(self.inner.chisquare()?)
    }

    pub fn gsquare(&self) -> PyResult<f64> {
        Ok(self.inner.gsquare()?)
    }

    /// `(statistic, df, p_value)`.
    pub fn chisquare_test(&self) -> PyResult<(f64, usize, f64)> {
        let outcome = self.inner.chisquare_test()?;
        Ok((outcome.stat(), outcome.df(), outcome.p_value()))
    }

    /// `(lower, upper)` tables, each as rows `[times, targets]`.
    #[pyo3(signature = (quantiles = None), text_signature = "(self, /, quantiles=None)")]
    pub fn quantiles(&self, quantiles: Option<Vec<f64>>) -> PyResult<(TableRows, TableRows)> {
        let report = self.inner.quantiles(quantiles.as_deref())?;
        Ok((table_rows(report.lower()), table_rows(report.upper())))
    }

    #[getter]
    pub fn params(&self) -> Vec<f64> {
        self.inner.params().to_vec()
    }

    #[pyo3(signature = (params), text_signature = "(self, params, /)")]
    pub fn set_params<'py>(&mut self, py: Python<'py>, params: &Bound<'py, PyAny>) -> PyResult<()> {
        let params = extract_owned_array(py, params, "params")?;
        self.inner.set_params(params);
        Ok(())
    }

    /// Fit the parameters by minimizing chi-square or maximizing G-square.
    #[pyo3(
        signature = (
            criterion = "chisquare",
            theta0 = None,
            max_iter = None,
            sd_tolerance = None,
            simplex_step = None,
        ),
        text_signature = "(self, /, criterion='chisquare', theta0=None, max_iter=500, \
                          sd_tolerance=1e-8, simplex_step=0.1)"
    )]
    pub fn optimize<'py>(
        &mut self, py: Python<'py>, criterion: &str, theta0: Option<&Bound<'py, PyAny>>,
        max_iter: Option<usize>, sd_tolerance: Option<f64>, simplex_step: Option<f64>,
    ) -> PyResult<OptimizeOutcome> {
        let criterion: FitCriterion = criterion.parse()?;
        let theta0 = match theta0 {
            Some(raw) => extract_owned_array(py, raw, "theta0")?,
            None => self.inner.params().to_owned(),
        };
        let opts = build_optimize_options(max_iter, sd_tolerance, simplex_step)?;
        let outcome = minimize_statistic(&mut self.inner, criterion, theta0, &opts)?;
        Ok(OptimizeOutcome { inner: outcome })
    }
}

/// OptimizeOutcome — read-only view of an [`OptimOutcome`] for Python.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "wfpt_fit.nodes")]
pub struct OptimizeOutcome {
    pub inner: OptimOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl OptimizeOutcome {
    #[getter]
    pub fn theta_hat(&self) -> Vec<f64> {
        self.inner.theta_hat.to_vec()
    }

    #[getter]
    pub fn value(&self) -> f64 {
        self.inner.value
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged
    }

    #[getter]
    pub fn status(&self) -> String {
        self.inner.status.clone()
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.iterations
    }

    #[getter]
    pub fn fn_evals(&self) -> Vec<(String, u64)> {
        self.inner.fn_evals.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }
}

#[cfg(feature = "python-bindings")]
fn table_rows(table: ArrayView2<'_, f64>) -> TableRows {
    table.rows().into_iter().map(|row| row.to_vec()).collect()
}

/// _wfpt_fit — PyO3 module initializer for the Python extension.
///
/// Creates the `nodes` submodule, attaches it to `_wfpt_fit`, and registers
/// it in `sys.modules` as `wfpt_fit.nodes` so dotted imports work.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _wfpt_fit<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let nodes_mod = PyModule::new(_py, "nodes")?;
    nodes(_py, m, &nodes_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("wfpt_fit.nodes", nodes_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn nodes<'py>(
    _py: Python, wfpt_fit: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyWfptNode>()?;
    m.add_class::<OptimizeOutcome>()?;
    wfpt_fit.add_submodule(m)?;
    Ok(())
}
