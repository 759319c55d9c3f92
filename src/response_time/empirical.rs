//! response_time::empirical — plotting-position quantile estimator.
//!
//! Purpose
//! -------
//! Estimate sample quantiles of response-time latencies with a documented,
//! deterministic interpolation rule, so empirical quantiles are reproducible
//! across implementations.
//!
//! Key behaviors
//! -------------
//! - [`QuantileEstimator`] stores the plotting positions `(α, β)` of the
//!   Hyndman–Fan family. With `m = α + p(1 − α − β)` and
//!   `aleph = n·p + m`, the estimate is
//!   `(1 − γ)·x₍ₖ₋₁₎ + γ·x₍ₖ₎` where `k = ⌊clip(aleph, 1, n − 1)⌋` and
//!   `γ = clip(aleph − k, 0, 1)` on the sorted sample.
//! - The default `(0.4, 0.4)` gives approximately unbiased quantiles for
//!   a wide range of continuous distributions (Cunnane).
//! - [`empirical_quantiles`] sorts a copy of the sample once and evaluates
//!   every requested probability.
//!
//! Invariants & assumptions
//! ------------------------
//! - `0 ≤ α ≤ 1` and `0 ≤ β ≤ 1`; enforced by [`QuantileEstimator::new`].
//! - Sample values are finite (guaranteed upstream by `ObservationSet`).
//! - A sample of size 1 returns its single value for every probability;
//!   an empty sample returns NaN for every probability.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the estimator to hand-computed values on a small sample,
//!   and check the size-0 and size-1 cases.
use crate::response_time::errors::{RTError, RTResult};
use ndarray::{Array1, ArrayView1};

/// QuantileEstimator — plotting positions for sample quantiles.
///
/// Fields
/// ------
/// - `alphap`: `f64`
///   Plotting position α in [0, 1].
/// - `betap`: `f64`
///   Plotting position β in [0, 1].
///
/// Notes
/// -----
/// - `(1, 1)` reproduces the "linear interpolation between order
///   statistics" rule; `(0, 0)` gives the Weibull rule `p·(n + 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantileEstimator {
    alphap: f64,
    betap: f64,
}

impl QuantileEstimator {
    /// Build an estimator from validated plotting positions.
    ///
    /// Errors
    /// ------
    /// - `RTError::InvalidPlottingPosition` when either value is NaN or
    ///   outside [0, 1].
    pub fn new(alphap: f64, betap: f64) -> RTResult<Self> {
        if !(0.0..=1.0).contains(&alphap) {
            return Err(RTError::InvalidPlottingPosition { name: "alphap", value: alphap });
        }
        if !(0.0..=1.0).contains(&betap) {
            return Err(RTError::InvalidPlottingPosition { name: "betap", value: betap });
        }
        Ok(QuantileEstimator { alphap, betap })
    }

    pub fn alphap(&self) -> f64 {
        self.alphap
    }

    pub fn betap(&self) -> f64 {
        self.betap
    }

    /// Quantile at probability `p` of an ascending, non-empty sample.
    fn quantile_sorted(&self, sorted: &[f64], p: f64) -> f64 {
        let n = sorted.len();
        if n == 1 {
            return sorted[0];
        }

        let m = self.alphap + p * (1.0 - self.alphap - self.betap);
        let aleph = n as f64 * p + m;
        let k = aleph.clamp(1.0, (n - 1) as f64).floor();
        let gamma = (aleph - k).clamp(0.0, 1.0);
        let k = k as usize;
        (1.0 - gamma) * sorted[k - 1] + gamma * sorted[k]
    }
}

impl Default for QuantileEstimator {
    fn default() -> Self {
        QuantileEstimator { alphap: 0.4, betap: 0.4 }
    }
}

/// Empirical quantiles of `sample` at each probability in `probs`.
///
/// Parameters
/// ----------
/// - `sample`: `&[f64]`
///   Finite values in any order; a sorted copy is taken.
/// - `probs`: `ArrayView1<f64>`
///   Probabilities in (0, 1).
/// - `estimator`: `&QuantileEstimator`
///   Plotting positions used for interpolation.
///
/// Returns
/// -------
/// `Array1<f64>`
///   One estimate per probability, in the order of `probs`. All NaN when
///   `sample` is empty.
pub fn empirical_quantiles(
    sample: &[f64], probs: ArrayView1<'_, f64>, estimator: &QuantileEstimator,
) -> Array1<f64> {
    if sample.is_empty() {
        return Array1::from_elem(probs.len(), f64::NAN);
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);
    probs.mapv(|p| estimator.quantile_sorted(&sorted, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The default (0.4, 0.4) estimator on a hand-computed sample.
    // - Size-0 and size-1 samples.
    // - Validation of plotting positions.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Pin the default estimator to hand-computed values.
    //
    // Given
    // -----
    // - Unsorted sample {0.9, 0.3, 1.5, 0.4, 1.2, 0.6} (n = 6).
    // - Probabilities (0.25, 0.5, 0.75).
    //
    // Expect
    // ------
    // - p = 0.25: aleph = 1.95 → 0.05·0.3 + 0.95·0.4 = 0.395.
    // - p = 0.50: aleph = 3.50 → (0.6 + 0.9) / 2 = 0.75.
    // - p = 0.75: aleph = 5.05 → 0.95·1.2 + 0.05·1.5 = 1.215.
    fn empirical_quantiles_default_estimator_matches_hand_values() {
        let sample = [0.9, 0.3, 1.5, 0.4, 1.2, 0.6];
        let probs = array![0.25, 0.5, 0.75];

        let q = empirical_quantiles(&sample, probs.view(), &QuantileEstimator::default());

        assert_relative_eq!(q[0], 0.395, epsilon = 1e-12);
        assert_relative_eq!(q[1], 0.75, epsilon = 1e-12);
        assert_relative_eq!(q[2], 1.215, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Small samples clamp to the order statistics instead of indexing out of
    // range.
    //
    // Given
    // -----
    // - A two-element sample {0.8, 0.5}; a one-element sample {0.7}; an
    //   empty sample.
    //
    // Expect
    // ------
    // - Two elements: (0.5, 0.65, 0.8) at (0.25, 0.5, 0.75).
    // - One element: 0.7 everywhere.
    // - Empty: NaN everywhere, same length as `probs`.
    fn empirical_quantiles_handles_tiny_samples() {
        let probs = array![0.25, 0.5, 0.75];
        let est = QuantileEstimator::default();

        let two = empirical_quantiles(&[0.8, 0.5], probs.view(), &est);
        let one = empirical_quantiles(&[0.7], probs.view(), &est);
        let none = empirical_quantiles(&[], probs.view(), &est);

        assert_relative_eq!(two[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(two[1], 0.65, epsilon = 1e-12);
        assert_relative_eq!(two[2], 0.8, epsilon = 1e-12);
        assert!(one.iter().all(|&v| v == 0.7));
        assert_eq!(none.len(), 3);
        assert!(none.iter().all(|v| v.is_nan()));
    }

    #[test]
    // Purpose
    // -------
    // The (1, 1) plotting positions reproduce linear interpolation between
    // order statistics.
    //
    // Given
    // -----
    // - Sample {1, 2, 3, 4, 5} and p = 0.3.
    //
    // Expect
    // ------
    // - Estimate 1 + 0.3·4 = 2.2.
    fn empirical_quantiles_linear_rule_with_unit_plotting_positions() {
        let est = QuantileEstimator::new(1.0, 1.0).unwrap();

        let q = empirical_quantiles(&[5.0, 1.0, 4.0, 2.0, 3.0], array![0.3].view(), &est);

        assert_relative_eq!(q[0], 2.2, epsilon = 1e-12);
    }

    #[test]
    fn quantile_estimator_new_rejects_out_of_range_positions() {
        assert_eq!(
            QuantileEstimator::new(-0.1, 0.4).unwrap_err(),
            RTError::InvalidPlottingPosition { name: "alphap", value: -0.1 }
        );
        assert!(matches!(
            QuantileEstimator::new(0.4, f64::NAN),
            Err(RTError::InvalidPlottingPosition { name: "betap", .. })
        ));
    }
}
