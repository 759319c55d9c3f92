//! goodness_of_fit::errors — failures of the quantile fit engine.
//!
//! Purpose
//! -------
//! Define the error enum and result alias for fit-statistic computation:
//! missing or malformed cached statistics, degenerate model CDFs, provider
//! failures, and invalid engine configuration.
//!
//! Key behaviors
//! -------------
//! - [`FitError::StatsNotComputed`] is the precondition violation raised by
//!   every statistic or stats read before the cache is populated. It is the
//!   only failure that reaches callers of `chisquare` / `gsquare`.
//! - [`FitError::DegenerateCdf`], [`FitError::ProviderFailed`] and
//!   [`FitError::NonFiniteQuantile`] are raised internally while resolving
//!   theoretical proportions; the statistic layer contains them and converts
//!   them into ±∞.
//! - `From<RTError>` lets validation failures of grids, observations and
//!   estimator settings propagate with `?`.
//!
//! Conventions
//! -----------
//! - `reason` payloads are short, human-readable phrases; they are logged
//!   when a degenerate evaluation is converted into a sentinel.
//!
//! Testing notes
//! -------------
//! - Unit tests check message payloads and the `RTError` conversion.
use crate::response_time::errors::RTError;
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};
use thiserror::Error;

/// Result alias for goodness-of-fit operations.
pub type FitResult<T> = Result<T, FitError>;

/// FitError — errors raised by the quantile fit engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    // ---- Cached statistics ----
    /// Statistics were read before `compute_quantiles_stats` or
    /// `set_quantiles_stats` populated the cache.
    #[error("Quantile statistics are uninitialized; compute or set them first.")]
    StatsNotComputed,

    /// Injected statistics have an inconsistent layout.
    #[error(
        "Quantile statistics shape mismatch: emp_rt has {emp_len} entries, freq_obs must have {expected} but has {freq_len}"
    )]
    StatsShapeMismatch { emp_len: usize, freq_len: usize, expected: usize },

    /// A cached quantile time is NaN or infinite, as happens for a boundary
    /// with no observations.
    #[error("Empirical quantile at index {index} is non-finite: {value}")]
    NonFiniteQuantile { index: usize, value: f64 },

    // ---- Model CDF ----
    /// The model CDF cannot be used to resolve proportions.
    #[error("Degenerate model CDF: {reason}")]
    DegenerateCdf { reason: String },

    /// The CDF provider could not evaluate the CDF at the current parameters.
    #[error("CDF provider failed: {reason}")]
    ProviderFailed { reason: String },

    /// Parameter vector rejected by a provider.
    #[error("Invalid model parameter at index {index}: {value} ({reason})")]
    InvalidModelParams { index: usize, value: f64, reason: &'static str },

    /// Parameter vector has the wrong length for a provider.
    #[error("Model parameter vector must have length {expected}; got {actual}")]
    ParamLengthMismatch { expected: usize, actual: usize },

    // ---- Options ----
    /// Proportion floor must be finite and inside (0, 1).
    #[error("Proportion floor must lie in (0, 1); got: {value}")]
    InvalidProportionFloor { value: f64 },

    /// Time range must be finite and straddle zero.
    #[error("Time range must be finite with lo < 0 < hi; got: ({lo}, {hi})")]
    InvalidTimeRange { lo: f64, hi: f64 },

    /// Tabulation grid for a built-in provider is too small.
    #[error("CDF grid must have at least {min} points; got: {points}")]
    InvalidGridPoints { points: usize, min: usize },

    /// Latency shape of a built-in provider must be finite and positive.
    #[error("Latency shape must be finite and > 0; got: {value}")]
    InvalidLatencyShape { value: f64 },

    /// Unknown fit-statistic name.
    #[error("Invalid fit criterion {name:?}; valid options are 'chisquare' or 'gsquare'.")]
    InvalidCriterion { name: String },

    // ---- Input validation ----
    /// Wrapped response-time validation failure.
    #[error(transparent)]
    Input(#[from] RTError),
}

#[cfg(feature = "python-bindings")]
impl From<FitError> for PyErr {
    fn from(err: FitError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
