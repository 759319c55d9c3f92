//! goodness_of_fit::proportion — theoretical bin proportions from a model CDF.
//!
//! Purpose
//! -------
//! Map the empirical quantile times onto the model's combined CDF and turn
//! the resulting cumulative values into per-bin theoretical proportions,
//! aligned with the observed-frequency layout.
//!
//! Key behaviors
//! -------------
//! - Each `emp_rt` value is located in the CDF grid with a left
//!   insertion-point search; indices past the right edge are clamped to the
//!   last grid point, so empirical extremes outside the model's numerical
//!   support still resolve.
//! - `theo_cdf = [0] ++ cdf[idx] ++ [1]`; proportions are its consecutive
//!   differences (one more bin than `emp_rt` has points).
//! - Proportions exactly equal to zero are replaced by the configured floor,
//!   keeping the chi-square ratios and G-square logarithms finite.
//!
//! Invariants & assumptions
//! ------------------------
//! - A CDF that is empty or carries non-finite values is degenerate and is
//!   reported as [`FitError::DegenerateCdf`]; the statistic layer turns it
//!   into a sentinel.
//! - A non-finite `emp_rt` entry (the NaN quantiles of a boundary without
//!   observations) has no position on the CDF grid and is reported as
//!   [`FitError::NonFiniteQuantile`], which the statistic layer also turns
//!   into a sentinel.
//! - Monotonicity of the CDF is the provider's obligation. A non-monotone
//!   CDF can yield negative proportions, which are passed through.
//!
//! Testing notes
//! -------------
//! - Unit tests cover exact lookups, right-edge clamping, zero flooring, and
//!   the degenerate paths, including NaN quantiles.
use crate::{
    goodness_of_fit::errors::{FitError, FitResult},
    response_time::{cdf::ModelCdf, search::search_sorted_clamped},
};
use ndarray::{Array1, ArrayView1};

/// Theoretical bin proportions of `model` at the empirical quantile times.
///
/// Parameters
/// ----------
/// - `emp_rt`: `ArrayView1<f64>`
///   Signed empirical quantile times. Every entry must be finite.
/// - `model`: `&ModelCdf`
///   Combined model CDF for the current parameters.
/// - `floor`: `f64`
///   Replacement for proportions that are exactly zero.
///
/// Returns
/// -------
/// `FitResult<Array1<f64>>`
///   `emp_rt.len() + 1` proportions.
///
/// Errors
/// ------
/// - `FitError::NonFiniteQuantile` for the first non-finite `emp_rt` entry.
/// - `FitError::DegenerateCdf` when the CDF is empty or non-finite.
pub fn theoretical_proportion(
    emp_rt: ArrayView1<'_, f64>, model: &ModelCdf, floor: f64,
) -> FitResult<Array1<f64>> {
    if let Some((index, &value)) = emp_rt.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(FitError::NonFiniteQuantile { index, value });
    }
    if model.is_empty() {
        return Err(FitError::DegenerateCdf { reason: "empty CDF grid".to_string() });
    }
    if !model.is_finite() {
        return Err(FitError::DegenerateCdf { reason: "non-finite CDF values".to_string() });
    }

    let x = model.x();
    let cdf = model.cdf();

    let mut proportions = Array1::zeros(emp_rt.len() + 1);
    let mut prev = 0.0;
    for (slot, &t) in proportions.iter_mut().zip(emp_rt.iter()) {
        let idx = search_sorted_clamped(x, t)
            .ok_or_else(|| FitError::DegenerateCdf { reason: "empty CDF grid".to_string() })?;
        *slot = cdf[idx] - prev;
        prev = cdf[idx];
    }
    proportions[emp_rt.len()] = 1.0 - prev;

    proportions.mapv_inplace(|p| if p == 0.0 { floor } else { p });
    Ok(proportions)
}
