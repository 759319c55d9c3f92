//! goodness_of_fit::stats — cached empirical quantile statistics.
//!
//! Purpose
//! -------
//! Build and hold the data-side summary consumed by the fit statistics: the
//! sample count, the signed empirical quantile times, and the observed
//! frequency per quantile bin.
//!
//! Key behaviors
//! -------------
//! - [`QuantileStats::from_observations`] partitions the observations by
//!   boundary, estimates per-boundary quantiles of the latencies, and lays
//!   them out on one ascending signed-time axis:
//!   `emp_rt = reverse(−q_lower) ++ [0] ++ q_upper`.
//! - Observed frequencies mirror the grid's bin masses on the lower side:
//!   `freq_obs = n_lower · reverse(m) ++ n_upper · m`, where `m` are the
//!   grid bin masses (bookended by 0 and 1).
//! - [`QuantileStats::from_parts`] wraps externally computed statistics and
//!   only checks the structural layout.
//!
//! Invariants & assumptions
//! ------------------------
//! - `emp_rt.len() == 2·|G| + 1` and `freq_obs.len() == emp_rt.len() + 1`
//!   for statistics derived from data. Injected statistics only need the
//!   second relation.
//! - For non-empty boundaries, `emp_rt` is ascending with a single zero in
//!   the middle. A boundary with no observations yields NaN quantiles on its
//!   side; the layout is kept and downstream statistics degrade instead of
//!   failing here.
//! - `Σ freq_obs == n_samples` up to rounding for data-derived statistics.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the layout against a hand-computed eight-observation
//!   example and check the empty-boundary and shape-mismatch paths.
use crate::{
    goodness_of_fit::errors::{FitError, FitResult},
    response_time::{
        data::ObservationSet, empirical::QuantileEstimator, empirical_quantiles,
        grid::QuantileGrid,
    },
};
use ndarray::{Array1, ArrayView1};

/// QuantileStats — `(n_samples, emp_rt, freq_obs)` for one node.
///
/// Fields
/// ------
/// - `n_samples`: `usize`
///   Total number of observations the statistics summarize.
/// - `emp_rt`: `Array1<f64>`
///   Signed empirical quantile times with a zero boundary marker.
/// - `freq_obs`: `Array1<f64>`
///   Observed frequency per bin; one more entry than `emp_rt`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileStats {
    n_samples: usize,
    emp_rt: Array1<f64>,
    freq_obs: Array1<f64>,
}

impl QuantileStats {
    /// Derive statistics from observations on a probability grid.
    ///
    /// Parameters
    /// ----------
    /// - `obs`: `&ObservationSet`
    ///   Validated signed response times.
    /// - `grid`: `&QuantileGrid`
    ///   Validated probabilities at which quantiles are estimated.
    /// - `estimator`: `&QuantileEstimator`
    ///   Plotting positions for the quantile estimates.
    ///
    /// Returns
    /// -------
    /// `QuantileStats` with `emp_rt.len() == 2·grid.len() + 1`.
    pub fn from_observations(
        obs: &ObservationSet, grid: &QuantileGrid, estimator: &QuantileEstimator,
    ) -> Self {
        let probs = grid.probs().view();
        let lower = empirical_quantiles(&obs.lower_latencies(), probs, estimator);
        let upper = empirical_quantiles(&obs.upper_latencies(), probs, estimator);

        let emp_rt: Array1<f64> = lower
            .iter()
            .rev()
            .map(|&q| -q)
            .chain(std::iter::once(0.0))
            .chain(upper.iter().copied())
            .collect();

        let masses = grid.bin_masses();
        let n_lower = obs.n_lower() as f64;
        let n_upper = obs.n_upper() as f64;
        let freq_obs: Array1<f64> = masses
            .iter()
            .rev()
            .map(|&m| m * n_lower)
            .chain(masses.iter().map(|&m| m * n_upper))
            .collect();

        QuantileStats { n_samples: obs.len(), emp_rt, freq_obs }
    }

    /// Wrap externally computed statistics.
    ///
    /// Errors
    /// ------
    /// - `FitError::StatsShapeMismatch` unless
    ///   `freq_obs.len() == emp_rt.len() + 1`.
    pub fn from_parts(
        n_samples: usize, emp_rt: Array1<f64>, freq_obs: Array1<f64>,
    ) -> FitResult<Self> {
        let expected = emp_rt.len() + 1;
        if freq_obs.len() != expected {
            return Err(FitError::StatsShapeMismatch {
                emp_len: emp_rt.len(),
                freq_len: freq_obs.len(),
                expected,
            });
        }
        Ok(QuantileStats { n_samples, emp_rt, freq_obs })
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    pub fn emp_rt(&self) -> ArrayView1<'_, f64> {
        self.emp_rt.view()
    }

    pub fn freq_obs(&self) -> ArrayView1<'_, f64> {
        self.freq_obs.view()
    }

    /// Number of bins (`freq_obs.len()`).
    pub fn n_bins(&self) -> usize {
        self.freq_obs.len()
    }

    /// Decompose into `(n_samples, emp_rt, freq_obs)`.
    pub fn into_parts(self) -> (usize, Array1<f64>, Array1<f64>) {
        (self.n_samples, self.emp_rt, self.freq_obs)
    }
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
    // - The `emp_rt` / `freq_obs` layout on a small mixed dataset.
    // - A dataset with no lower-boundary responses.
    // - Structural validation in `from_parts`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Pin the full layout on a hand-computed example.
    //
    // Given
    // -----
    // - Observations [-0.8, -0.5, 0.3, 0.4, 0.6, 0.9, 1.2, 1.5].
    // - Grid (0.25, 0.5, 0.75) and the default (0.4, 0.4) estimator.
    //
    // Expect
    // ------
    // - emp_rt = [-0.8, -0.65, -0.5, 0, 0.395, 0.75, 1.215].
    // - freq_obs = 2·(.25, .25, .25, .25) ++ 6·(.25, .25, .25, .25).
    // - Σ freq_obs = 8 = n_samples.
    fn from_observations_lays_out_mirrored_quantiles() {
        let obs =
            ObservationSet::new(array![-0.8, -0.5, 0.3, 0.4, 0.6, 0.9, 1.2, 1.5]).unwrap();
        let grid = QuantileGrid::new(&[0.25, 0.5, 0.75]).unwrap();

        let stats = QuantileStats::from_observations(&obs, &grid, &QuantileEstimator::default());

        let expected_rt = [-0.8, -0.65, -0.5, 0.0, 0.395, 0.75, 1.215];
        assert_eq!(stats.emp_rt().len(), 7);
        for (got, want) in stats.emp_rt().iter().zip(expected_rt) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
        assert_eq!(stats.n_bins(), 8);
        for (i, f) in stats.freq_obs().iter().enumerate() {
            let want = if i < 4 { 0.5 } else { 1.5 };
            assert_relative_eq!(*f, want, epsilon = 1e-12);
        }
        assert_relative_eq!(stats.freq_obs().sum(), 8.0, epsilon = 1e-12);
        assert_eq!(stats.n_samples(), 8);
    }

    #[test]
    // Purpose
    // -------
    // A boundary without responses keeps the layout but carries NaN
    // quantiles and zero frequencies.
    //
    // Given
    // -----
    // - Only upper responses [0.3, 0.5, 0.7] on grid (0.5,).
    //
    // Expect
    // ------
    // - emp_rt = [NaN, 0, 0.5]; freq_obs = [0, 0, 1.5, 1.5].
    fn from_observations_with_empty_boundary_keeps_layout() {
        let obs = ObservationSet::new(array![0.3, 0.5, 0.7]).unwrap();
        let grid = QuantileGrid::new(&[0.5]).unwrap();

        let stats = QuantileStats::from_observations(&obs, &grid, &QuantileEstimator::default());

        assert_eq!(stats.emp_rt().len(), 3);
        assert!(stats.emp_rt()[0].is_nan());
        assert_eq!(stats.emp_rt()[1], 0.0);
        assert_relative_eq!(stats.emp_rt()[2], 0.5, epsilon = 1e-12);
        assert_eq!(stats.freq_obs().to_vec(), vec![0.0, 0.0, 1.5, 1.5]);
    }

    #[test]
    fn from_parts_rejects_inconsistent_layout() {
        let res = QuantileStats::from_parts(4, array![-1.0, 0.0, 1.0], array![1.0, 1.0, 2.0]);

        assert_eq!(
            res.unwrap_err(),
            FitError::StatsShapeMismatch { emp_len: 3, freq_len: 3, expected: 4 }
        );
    }
}
