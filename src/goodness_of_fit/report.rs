//! goodness_of_fit::report — per-boundary quantile-probability tables.
//!
//! Purpose
//! -------
//! Produce model-implied `(time, cumulative probability)` tables for each
//! boundary, for posterior-predictive plots and comparison against
//! empirical quantiles.
//!
//! Key behaviors
//! -------------
//! - The combined CDF is split at the boundary; for each side the requested
//!   grid is scaled by that side's total probability, and each target is
//!   located in the side's CDF with a clamped left search.
//! - Each table has two rows: row 0 holds latency magnitudes, row 1 holds
//!   the target cumulative probabilities.
//!
//! Invariants & assumptions
//! ------------------------
//! - A side without CDF support produces an empty `2 × 0` table; this is
//!   not an error.
//! - Lower-boundary times are magnitudes, matching the split CDF.
use crate::response_time::{
    cdf::{BoundaryCdf, ModelCdf, SplitCdf, split_cdf},
    grid::QuantileGrid,
    search::search_sorted_clamped,
};
use ndarray::{Array2, ArrayView2};

/// QuantileReport — model quantile tables for both boundaries.
///
/// Fields
/// ------
/// - `lower`: `Array2<f64>` of shape `(2, |G|)` or `(2, 0)`.
/// - `upper`: `Array2<f64>` of shape `(2, |G|)` or `(2, 0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileReport {
    lower: Array2<f64>,
    upper: Array2<f64>,
}

impl QuantileReport {
    /// Tabulate the model quantiles of `model` on `grid`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use wfpt_fit::goodness_of_fit::report::QuantileReport;
    /// # use wfpt_fit::response_time::{ModelCdf, QuantileGrid};
    /// let model = ModelCdf::new(
    ///     array![-2.0, -1.0, 0.0, 1.0, 2.0],
    ///     array![0.0, 0.25, 0.5, 0.75, 1.0],
    /// )
    /// .unwrap();
    /// let report = QuantileReport::from_model(&model, &QuantileGrid::new(&[0.5]).unwrap());
    /// assert_eq!(report.upper()[[1, 0]], 0.25);
    /// ```
    pub fn from_model(model: &ModelCdf, grid: &QuantileGrid) -> Self {
        Self::from_split(&split_cdf(model), grid)
    }

    /// Tabulate from an already split CDF.
    pub fn from_split(split: &SplitCdf, grid: &QuantileGrid) -> Self {
        QuantileReport {
            lower: boundary_table(&split.lower, grid),
            upper: boundary_table(&split.upper, grid),
        }
    }

    pub fn lower(&self) -> ArrayView2<'_, f64> {
        self.lower.view()
    }

    pub fn upper(&self) -> ArrayView2<'_, f64> {
        self.upper.view()
    }

    /// Decompose into `(lower, upper)`.
    pub fn into_parts(self) -> (Array2<f64>, Array2<f64>) {
        (self.lower, self.upper)
    }
}

fn boundary_table(side: &BoundaryCdf, grid: &QuantileGrid) -> Array2<f64> {
    if side.is_empty() {
        return Array2::zeros((2, 0));
    }

    let total = side.total();
    let mut table = Array2::zeros((2, grid.len()));
    for (j, &p) in grid.probs().iter().enumerate() {
        let target = p * total;
        // Non-empty side, so the clamped search always yields an index.
        let idx = search_sorted_clamped(side.cdf.view(), target).unwrap_or(0);
        table[[0, j]] = side.time[idx];
        table[[1, j]] = target;
    }
    table
}
