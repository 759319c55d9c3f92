//! node::provider — model CDF providers.
//!
//! Purpose
//! -------
//! Define the seam through which a node obtains its model-implied combined
//! CDF, and ship two concrete providers: a fixed tabulated CDF and a
//! two-boundary Gamma latency mixture.
//!
//! Key behaviors
//! -------------
//! - [`ModelCdfProvider::cdf_vec`] evaluates the combined CDF for a
//!   parameter vector over a signed-time window. Failures are reported as
//!   [`FitError`] values, which the fit engine treats as degenerate
//!   evaluations.
//! - [`ModelCdfProvider::split_cdf`] splits a combined CDF at the boundary;
//!   the provided implementation defers to
//!   [`crate::response_time::split_cdf`].
//! - [`TabulatedCdf`] ignores the parameters and returns a fixed CDF.
//! - [`BoundaryMixtureCdf`] builds the CDF from a choice probability and one
//!   Gamma latency distribution per boundary.
//!
//! Invariants & assumptions
//! ------------------------
//! - Providers return `x` ascending and `cdf` non-decreasing from ≈0 to ≈1.
//!   The engine does not check these.
//! - [`BoundaryMixtureCdf`] always places an exact `x == 0` marker whose CDF
//!   value is the lower-boundary total probability.
//!
//! Testing notes
//! -------------
//! - Unit tests check parameter validation, the zero marker, boundary
//!   totals, and monotonicity of the mixture CDF.
use crate::{
    goodness_of_fit::{
        errors::{FitError, FitResult},
        options::validate_time_range,
    },
    response_time::cdf::{self, ModelCdf, SplitCdf},
};
use ndarray::{Array1, ArrayView1};
use statrs::distribution::{ContinuousCDF, Gamma};

/// ModelCdfProvider — source of model-implied combined CDFs.
///
/// Required methods
/// ----------------
/// - `cdf_vec(params, time_range)`
///   Combined CDF over signed time for the given parameters.
///
/// Provided methods
/// ----------------
/// - `split_cdf(model)`
///   Boundary split of a combined CDF.
pub trait ModelCdfProvider {
    fn cdf_vec(&self, params: ArrayView1<'_, f64>, time_range: (f64, f64)) -> FitResult<ModelCdf>;

    fn split_cdf(&self, model: &ModelCdf) -> SplitCdf {
        cdf::split_cdf(model)
    }
}

impl<T: ModelCdfProvider + ?Sized> ModelCdfProvider for Box<T> {
    fn cdf_vec(&self, params: ArrayView1<'_, f64>, time_range: (f64, f64)) -> FitResult<ModelCdf> {
        (**self).cdf_vec(params, time_range)
    }

    fn split_cdf(&self, model: &ModelCdf) -> SplitCdf {
        (**self).split_cdf(model)
    }
}

/// TabulatedCdf — a fixed, parameter-independent combined CDF.
#[derive(Debug, Clone, PartialEq)]
pub struct TabulatedCdf {
    model: ModelCdf,
}

impl TabulatedCdf {
    pub fn new(model: ModelCdf) -> Self {
        TabulatedCdf { model }
    }
}

impl ModelCdfProvider for TabulatedCdf {
    fn cdf_vec(&self, _params: ArrayView1<'_, f64>, _time_range: (f64, f64)) -> FitResult<ModelCdf> {
        Ok(self.model.clone())
    }
}

/// Number of parameters of [`BoundaryMixtureCdf`].
pub const MIXTURE_PARAMS: usize = 3;

/// BoundaryMixtureCdf — choice probability plus Gamma latencies per boundary.
///
/// Parameters
/// ----------
/// `θ = (p_upper, mean_lower, mean_upper)`:
/// - `p_upper` in [0, 1]: probability of an upper-boundary response.
/// - `mean_lower`, `mean_upper` > 0: mean latency of each boundary.
///
/// Both latency distributions are Gamma with the configured `shape` and
/// `rate = shape / mean`.
///
/// Conventions
/// -----------
/// - The grid has `2·⌊n_points / 2⌋ + 1` points: evenly spaced on each side
///   of zero, with zero itself as the middle point.
/// - `F(x) = (1 − p_upper)·(1 − G_lower(−x))` for `x < 0` and
///   `F(x) = (1 − p_upper) + p_upper·G_upper(x)` for `x ≥ 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryMixtureCdf {
    shape: f64,
    half_points: usize,
}

impl BoundaryMixtureCdf {
    /// Errors
    /// ------
    /// - `FitError::InvalidLatencyShape` for a non-finite or non-positive
    ///   shape.
    /// - `FitError::InvalidGridPoints` for fewer than 3 grid points.
    pub fn new(shape: f64, n_points: usize) -> FitResult<Self> {
        if !(shape.is_finite() && shape > 0.0) {
            return Err(FitError::InvalidLatencyShape { value: shape });
        }
        if n_points < 3 {
            return Err(FitError::InvalidGridPoints { points: n_points, min: 3 });
        }
        Ok(BoundaryMixtureCdf { shape, half_points: n_points / 2 })
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Total number of grid points produced by `cdf_vec`.
    pub fn n_points(&self) -> usize {
        2 * self.half_points + 1
    }

    /// Latency distribution with the configured shape and the given mean.
    pub fn latency(&self, mean: f64) -> FitResult<Gamma> {
        Gamma::new(self.shape, self.shape / mean)
            .map_err(|e| FitError::ProviderFailed { reason: e.to_string() })
    }

    fn signed_grid(&self, (lo, hi): (f64, f64)) -> Array1<f64> {
        let h = self.half_points as f64;
        let lower = (0..self.half_points).map(|i| lo * (self.half_points - i) as f64 / h);
        let upper = (1..=self.half_points).map(|j| hi * j as f64 / h);
        lower.chain(std::iter::once(0.0)).chain(upper).collect()
    }
}

impl ModelCdfProvider for BoundaryMixtureCdf {
    fn cdf_vec(&self, params: ArrayView1<'_, f64>, time_range: (f64, f64)) -> FitResult<ModelCdf> {
        validate_time_range(time_range)?;
        let (p_upper, mean_lower, mean_upper) = validate_mixture_params(params)?;
        let lower = self.latency(mean_lower)?;
        let upper = self.latency(mean_upper)?;
        let p_lower = 1.0 - p_upper;

        let x = self.signed_grid(time_range);
        let cdf = x.mapv(|t| {
            if t < 0.0 {
                p_lower * (1.0 - lower.cdf(-t))
            } else {
                p_lower + p_upper * upper.cdf(t)
            }
        });
        Ok(ModelCdf::new(x, cdf)?)
    }
}

fn validate_mixture_params(params: ArrayView1<'_, f64>) -> FitResult<(f64, f64, f64)> {
    if params.len() != MIXTURE_PARAMS {
        return Err(FitError::ParamLengthMismatch {
            expected: MIXTURE_PARAMS,
            actual: params.len(),
        });
    }

    let p_upper = params[0];
    if !(0.0..=1.0).contains(&p_upper) {
        return Err(FitError::InvalidModelParams {
            index: 0,
            value: p_upper,
            reason: "choice probability must lie in [0, 1]",
        });
    }
    for index in 1..MIXTURE_PARAMS {
        let value = params[index];
        if !(value.is_finite() && value > 0.0) {
            return Err(FitError::InvalidModelParams {
                index,
                value,
                reason: "mean latency must be finite and > 0",
            });
        }
    }
    Ok((p_upper, params[1], params[2]))
}
