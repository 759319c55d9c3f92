//! optimization::options — settings for the fit-statistic minimizer.
use crate::optimization::errors::{OptError, OptResult};

pub const DEFAULT_MAX_ITER: usize = 500;
pub const DEFAULT_SD_TOLERANCE: f64 = 1e-8;
pub const DEFAULT_SIMPLEX_STEP: f64 = 0.1;

/// Nelder–Mead settings.
///
/// - `max_iter`: hard cap on the number of iterations.
/// - `sd_tolerance`: terminate once the standard deviation of the simplex
///   costs falls below this threshold.
/// - `simplex_step`: offset added to one coordinate of `θ₀` per extra vertex
///   of the initial simplex.
///
/// Defaults
/// --------
/// `max_iter = 500`, `sd_tolerance = 1e-8`, `simplex_step = 0.1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizeOptions {
    pub max_iter: usize,
    pub sd_tolerance: f64,
    pub simplex_step: f64,
}

impl OptimizeOptions {
    /// Construct validated options.
    ///
    /// # Errors
    /// - `OptError::InvalidMaxIter` if `max_iter == 0`.
    /// - `OptError::InvalidSdTolerance` for a non-finite or negative tolerance.
    /// - `OptError::InvalidSimplexStep` for a non-finite or zero step.
    pub fn new(max_iter: usize, sd_tolerance: f64, simplex_step: f64) -> OptResult<Self> {
        if max_iter == 0 {
            return Err(OptError::InvalidMaxIter {
                max_iter,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        if !(sd_tolerance.is_finite() && sd_tolerance >= 0.0) {
            return Err(OptError::InvalidSdTolerance {
                tol: sd_tolerance,
                reason: "Tolerance must be finite and non-negative.",
            });
        }
        if !simplex_step.is_finite() || simplex_step == 0.0 {
            return Err(OptError::InvalidSimplexStep {
                step: simplex_step,
                reason: "Simplex step must be finite and non-zero.",
            });
        }
        Ok(Self { max_iter, sd_tolerance, simplex_step })
    }
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
            sd_tolerance: DEFAULT_SD_TOLERANCE,
            simplex_step: DEFAULT_SIMPLEX_STEP,
        }
    }
}
