//! goodness_of_fit::options — configuration for the quantile fit engine.
//!
//! Purpose
//! -------
//! Collect the tuning knobs of the fit engine in one validated value so that
//! call sites pass explicit options instead of ad-hoc constants.
//!
//! Key behaviors
//! -------------
//! - [`FitOptions`] bundles the proportion floor, the quantile estimator,
//!   the time range handed to the CDF provider, and the default report grid.
//! - [`FitOptions::new`] validates the scalar fields; the estimator and grid
//!   are validated by their own constructors.
//!
//! Invariants & assumptions
//! ------------------------
//! - `0 < proportion_floor < 1`.
//! - `time_range = (lo, hi)` is finite with `lo < 0 < hi`, so the provider
//!   grid straddles the boundary marker.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the defaults and each rejected field.
use crate::{
    goodness_of_fit::errors::{FitError, FitResult},
    response_time::{empirical::QuantileEstimator, grid::QuantileGrid},
};

/// Floor applied to theoretical bin proportions that are exactly zero.
pub const DEFAULT_PROPORTION_FLOOR: f64 = 1e-5;

/// Signed-time window requested from CDF providers by default.
pub const DEFAULT_TIME_RANGE: (f64, f64) = (-5.0, 5.0);

/// FitOptions — validated configuration for the quantile fit engine.
///
/// Fields
/// ------
/// - `proportion_floor`: `f64`
///   Replacement for theoretical proportions that are exactly zero.
/// - `estimator`: [`QuantileEstimator`]
///   Plotting positions used for empirical quantiles.
/// - `time_range`: `(f64, f64)`
///   Signed-time window passed to the CDF provider.
/// - `report_grid`: [`QuantileGrid`]
///   Grid used by quantile reporting when the caller does not supply one.
///
/// Notes
/// -----
/// - `FitOptions::default()` reproduces the classic setup: floor `1e-5`,
///   `(0.4, 0.4)` plotting positions, window `(-5, 5)`, report grid
///   `(0.1, 0.3, 0.5, 0.7, 0.9)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    pub proportion_floor: f64,
    pub estimator: QuantileEstimator,
    pub time_range: (f64, f64),
    pub report_grid: QuantileGrid,
}

impl FitOptions {
    /// Construct validated [`FitOptions`].
    ///
    /// Errors
    /// ------
    /// - `FitError::InvalidProportionFloor` if the floor is not in (0, 1).
    /// - `FitError::InvalidTimeRange` if the window is non-finite or does not
    ///   straddle zero.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use wfpt_fit::goodness_of_fit::options::FitOptions;
    /// # use wfpt_fit::response_time::{QuantileEstimator, QuantileGrid};
    /// let opts = FitOptions::new(
    ///     1e-6,
    ///     QuantileEstimator::new(0.5, 0.5).unwrap(),
    ///     (-3.0, 3.0),
    ///     QuantileGrid::default(),
    /// )
    /// .unwrap();
    /// assert_eq!(opts.time_range, (-3.0, 3.0));
    /// ```
    pub fn new(
        proportion_floor: f64, estimator: QuantileEstimator, time_range: (f64, f64),
        report_grid: QuantileGrid,
    ) -> FitResult<Self> {
        if !(proportion_floor > 0.0 && proportion_floor < 1.0) {
            return Err(FitError::InvalidProportionFloor { value: proportion_floor });
        }
        validate_time_range(time_range)?;
        Ok(FitOptions { proportion_floor, estimator, time_range, report_grid })
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        FitOptions {
            proportion_floor: DEFAULT_PROPORTION_FLOOR,
            estimator: QuantileEstimator::default(),
            time_range: DEFAULT_TIME_RANGE,
            report_grid: QuantileGrid::default(),
        }
    }
}

/// Check that a provider window is finite and straddles zero.
pub fn validate_time_range((lo, hi): (f64, f64)) -> FitResult<()> {
    if !(lo.is_finite() && hi.is_finite() && lo < 0.0 && hi > 0.0) {
        return Err(FitError::InvalidTimeRange { lo, hi });
    }
    Ok(())
}
