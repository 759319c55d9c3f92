//! optimization::errors — error surface of the fit-statistic minimizer.
//!
//! Purpose
//! -------
//! Normalize configuration mistakes, fit-engine preconditions and `argmin`
//! backend failures into a single enum, [`OptError`], with the result alias
//! [`OptResult`].
//!
//! Key behaviors
//! -------------
//! - Option validation (`max_iter`, `sd_tolerance`, `simplex_step`) and
//!   starting-point validation report dedicated variants.
//! - `From<FitError>` carries engine failures (typically
//!   `StatsNotComputed`) through unchanged.
//! - `From<argmin::core::Error>` unwraps `ArgminError` variants and fit
//!   errors raised inside cost evaluations; anything else becomes
//!   [`OptError::BackendError`].
//!
//! Testing notes
//! -------------
//! - Unit tests cover both downcast paths of the `argmin` conversion.
use crate::goodness_of_fit::errors::FitError;
use argmin::core::{ArgminError, Error};
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};
use thiserror::Error;

/// Result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptError {
    // ---- OptimizeOptions ----
    /// Maximum iterations needs to be positive.
    #[error("Invalid maximum iterations {max_iter}: {reason}")]
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    /// Simplex standard-deviation tolerance must be finite and >= 0.
    #[error("Invalid simplex tolerance {tol}: {reason}")]
    InvalidSdTolerance { tol: f64, reason: &'static str },

    /// Initial simplex step must be finite and non-zero.
    #[error("Invalid simplex step {step}: {reason}")]
    InvalidSimplexStep { step: f64, reason: &'static str },

    // ---- Starting point ----
    /// The starting parameter vector is empty.
    #[error("Starting parameter vector is empty")]
    EmptyTheta0,

    /// Starting parameters need to be finite.
    #[error("Invalid starting parameter at index {index}: {value}, must be finite")]
    InvalidTheta0 { index: usize, value: f64 },

    // ---- Outcome ----
    /// The solver finished without a best parameter vector.
    #[error("Missing estimated parameters (theta hat)")]
    MissingThetaHat,

    // ---- Fit engine ----
    #[error(transparent)]
    Fit(#[from] FitError),

    // ---- Argmin ----
    #[error("Invalid parameter: {text}")]
    InvalidParameter { text: String },
    #[error("Not implemented: {text}")]
    NotImplemented { text: String },
    #[error("Not initialized: {text}")]
    NotInitialized { text: String },
    #[error("Condition violated: {text}")]
    ConditionViolated { text: String },
    #[error("Potential bug: {text}")]
    PotentialBug { text: String },
    /// Wrapper for other `argmin` error types.
    #[error("Backend error: {text}")]
    BackendError { text: String },
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let err = match original_err.downcast::<ArgminError>() {
            Ok(argmin_err) => {
                return match argmin_err {
                    ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                    ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                    ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                    ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                    ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                    other => OptError::BackendError { text: other.to_string() },
                };
            }
            Err(err) => err,
        };
        match err.downcast::<FitError>() {
            Ok(fit_err) => OptError::Fit(fit_err),
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<OptError> for PyErr {
    fn from(err: OptError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Errors boxed into `argmin::core::Error` come back as their typed
    // variants.
    //
    // Given
    // -----
    // - An `ArgminError::InvalidParameter` and a `FitError::StatsNotComputed`,
    //   each converted into `argmin::core::Error`.
    //
    // Expect
    // ------
    // - `OptError::InvalidParameter` and `OptError::Fit(StatsNotComputed)`.
    fn opt_error_from_argmin_error_downcasts() {
        let argmin_err: Error = ArgminError::InvalidParameter { text: "tol".to_string() }.into();
        let fit_err: Error = FitError::StatsNotComputed.into();

        assert_eq!(OptError::from(argmin_err), OptError::InvalidParameter { text: "tol".to_string() });
        assert_eq!(OptError::from(fit_err), OptError::Fit(FitError::StatsNotComputed));
    }
}
