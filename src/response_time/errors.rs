//! response_time::errors — validation errors for response-time inputs.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used when raw inputs enter the
//! crate: signed response-time observations, quantile grids, quantile
//! estimator settings, and model CDF arrays. Keeping these failures in one
//! place means every constructor reports the same message for the same
//! violated constraint.
//!
//! Key behaviors
//! -------------
//! - Define [`RTResult`] and [`RTError`] as the canonical result and error
//!   types for the `response_time` subtree.
//! - Attach domain-phrased `Display` messages carrying the offending value
//!   and index where one exists.
//! - Convert into a Python `ValueError` when the `python-bindings` feature is
//!   enabled.
//!
//! Conventions
//! -----------
//! - Indices are 0-based.
//! - Messages describe the constraint ("must be strictly increasing",
//!   "must lie in (0, 1)") rather than the code path that failed.
//!
//! Testing notes
//! -------------
//! - Unit tests check that payloads are embedded in the `Display` output.
//!   Constructors in sibling modules exercise every variant.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};
use thiserror::Error;

/// Result alias for response-time validation paths.
pub type RTResult<T> = Result<T, RTError>;

/// RTError — invalid response-time data, grid, estimator, or CDF arrays.
///
/// Variants
/// --------
/// - `NonFiniteObservation { index, value }`
///   An observation is NaN or ±∞.
/// - `ZeroObservation { index }`
///   A zero response time was supplied; zero is the boundary separator and
///   never a valid latency.
/// - `EmptyGrid`
///   The quantile grid has no entries.
/// - `GridOutOfRange { index, value }`
///   A grid probability lies outside the open interval (0, 1).
/// - `GridNotIncreasing { index, value }`
///   A grid probability is not strictly greater than its predecessor.
/// - `InvalidPlottingPosition { name, value }`
///   A quantile-estimator plotting position is outside [0, 1].
/// - `CdfLengthMismatch { x_len, cdf_len }`
///   The `x` grid and `cdf` values of a model CDF differ in length.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RTError {
    // ---- Observations ----
    #[error("Observation at index {index} is non-finite: {value}")]
    NonFiniteObservation { index: usize, value: f64 },

    #[error("Observation at index {index} is zero; response times must be non-zero.")]
    ZeroObservation { index: usize },

    // ---- Quantile grid ----
    #[error("Quantile grid is empty.")]
    EmptyGrid,

    #[error("Quantile grid value at index {index} must lie in (0, 1); got: {value}")]
    GridOutOfRange { index: usize, value: f64 },

    #[error("Quantile grid must be strictly increasing; index {index} has value {value}")]
    GridNotIncreasing { index: usize, value: f64 },

    // ---- Estimator ----
    #[error("Plotting position {name} must lie in [0, 1]; got: {value}")]
    InvalidPlottingPosition { name: &'static str, value: f64 },

    // ---- Model CDF ----
    #[error("Model CDF arrays differ in length: x has {x_len}, cdf has {cdf_len}")]
    CdfLengthMismatch { x_len: usize, cdf_len: usize },
}

#[cfg(feature = "python-bindings")]
impl From<RTError> for PyErr {
    fn from(err: RTError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Payload embedding in `Display` messages for RTError variants.
    //
    // They intentionally DO NOT cover:
    // - The PyO3 conversion, which needs a Python interpreter.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that index-carrying variants report both index and value.
    //
    // Given
    // -----
    // - `NonFiniteObservation { index: 4, value: NaN }`.
    // - `GridNotIncreasing { index: 2, value: 0.3 }`.
    //
    // Expect
    // ------
    // - Each message contains its index and value.
    fn rt_error_messages_embed_index_and_value() {
        let non_finite = RTError::NonFiniteObservation { index: 4, value: f64::NAN }.to_string();
        let not_increasing = RTError::GridNotIncreasing { index: 2, value: 0.3 }.to_string();

        assert!(non_finite.contains('4') && non_finite.contains("NaN"), "Got: {non_finite}");
        assert!(not_increasing.contains('2') && not_increasing.contains("0.3"), "Got: {not_increasing}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that the CDF length mismatch names both lengths.
    //
    // Given
    // -----
    // - `CdfLengthMismatch { x_len: 11, cdf_len: 7 }`.
    //
    // Expect
    // ------
    // - The message contains "11" and "7".
    fn rt_error_cdf_length_mismatch_reports_both_lengths() {
        let msg = RTError::CdfLengthMismatch { x_len: 11, cdf_len: 7 }.to_string();

        assert!(msg.contains("11") && msg.contains('7'), "Got: {msg}");
    }
}
