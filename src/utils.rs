//! utils — PyO3 glue shared by the Python bindings.
//!
//! Conversions from loosely typed Python arguments into validated Rust
//! option structs, plus [`PyCdfProvider`], which lets a Python callable
//! act as a [`ModelCdfProvider`].
#[cfg(feature = "python-bindings")]
use ndarray::{Array1, ArrayView1};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    goodness_of_fit::{
        DEFAULT_PROPORTION_FLOOR, DEFAULT_TIME_RANGE, FitError, FitOptions, FitResult,
    },
    node::ModelCdfProvider,
    optimization::OptimizeOptions,
    response_time::{DEFAULT_REPORT_GRID, ModelCdf, QuantileEstimator, QuantileGrid},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a 1-D array-like into an owned `Array1<f64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_owned_array<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{name} must be a 1-D contiguous float64 array or sequence"))
    })?;
    Ok(Array1::from(slice.to_vec()))
}

#[cfg(feature = "python-bindings")]
pub fn build_fit_options(
    proportion_floor: Option<f64>, alphap: Option<f64>, betap: Option<f64>,
    time_range: Option<(f64, f64)>, report_grid: Option<Vec<f64>>,
) -> PyResult<FitOptions> {
    let estimator = QuantileEstimator::new(alphap.unwrap_or(0.4), betap.unwrap_or(0.4))
        .map_err(FitError::from)?;
    let grid = QuantileGrid::new(report_grid.as_deref().unwrap_or(&DEFAULT_REPORT_GRID))
        .map_err(FitError::from)?;
    let opts = FitOptions::new(
        proportion_floor.unwrap_or(DEFAULT_PROPORTION_FLOOR),
        estimator,
        time_range.unwrap_or(DEFAULT_TIME_RANGE),
        grid,
    )?;
    Ok(opts)
}

#[cfg(feature = "python-bindings")]
pub fn build_optimize_options(
    max_iter: Option<usize>, sd_tolerance: Option<f64>, simplex_step: Option<f64>,
) -> PyResult<OptimizeOptions> {
    let defaults = OptimizeOptions::default();
    let opts = OptimizeOptions::new(
        max_iter.unwrap_or(defaults.max_iter),
        sd_tolerance.unwrap_or(defaults.sd_tolerance),
        simplex_step.unwrap_or(defaults.simplex_step),
    )?;
    Ok(opts)
}

/// PyCdfProvider — a Python callable used as a model CDF provider.
///
/// The callable is invoked as `cdf_fn(params, time_range)`, with `params` as
/// a float64 ndarray, and must return a pair `(x, cdf)` of equal-length
/// float sequences. Any Python exception or malformed return value is
/// reported as `FitError::ProviderFailed`, which the fit engine treats as a
/// degenerate evaluation.
#[cfg(feature = "python-bindings")]
#[derive(Debug)]
pub struct PyCdfProvider {
    callback: Py<PyAny>,
}

#[cfg(feature = "python-bindings")]
impl PyCdfProvider {
    pub fn new(callback: Py<PyAny>) -> Self {
        PyCdfProvider { callback }
    }
}

#[cfg(feature = "python-bindings")]
impl ModelCdfProvider for PyCdfProvider {
    fn cdf_vec(&self, params: ArrayView1<'_, f64>, time_range: (f64, f64)) -> FitResult<ModelCdf> {
        let provider_failed = |e: PyErr| FitError::ProviderFailed { reason: e.to_string() };
        let (x, cdf): (Vec<f64>, Vec<f64>) = Python::with_gil(|py| {
            self.callback
                .call1(py, (params.to_vec().into_pyarray(py), time_range))
                .and_then(|out| out.extract(py))
                .map_err(provider_failed)
        })?;
        Ok(ModelCdf::new(Array1::from(x), Array1::from(cdf))?)
    }
}
