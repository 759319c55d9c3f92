//! response_time::cdf — combined and boundary-split model CDFs.
//!
//! Purpose
//! -------
//! Represent the model-implied cumulative response probability over signed
//! time, and split it into one partial CDF per boundary.
//!
//! Key behaviors
//! -------------
//! - [`ModelCdf`] holds parallel `(x, cdf)` arrays as produced by a CDF
//!   provider. Construction only checks that the arrays have the same length;
//!   an empty pair is allowed and represents a degenerate evaluation.
//! - [`split_cdf`] partitions the domain at zero and rebases each side so it
//!   starts at zero and ends at that boundary's total response probability.
//!
//! Invariants & assumptions
//! ------------------------
//! - `x` is ascending and `cdf` is non-decreasing from ≈0 to ≈1. These are
//!   the provider's obligations; violating them produces meaningless (but
//!   non-panicking) splits and proportions.
//! - Lower-boundary times are reported as latency magnitudes, ascending
//!   outward from the boundary.
//!
//! Conventions
//! -----------
//! - `c0` denotes the combined CDF at the boundary: the value at an exact
//!   `x == 0` marker if present, otherwise the last value with `x < 0`,
//!   otherwise `cdf[0]`.
//! - `cdf_lower[i] = c0 − cdf[z − 1 − i]` where `z` is the number of grid
//!   points with `x < 0`; `cdf_upper[j] = cdf[j] − c0` for `x[j] > 0`.
//!
//! Testing notes
//! -------------
//! - Unit tests split a hand-built CDF with and without an explicit zero
//!   marker and check the boundary totals.
use crate::response_time::{
    errors::{RTError, RTResult},
    search::search_sorted_left,
};
use ndarray::{Array1, ArrayView1, s};

/// ModelCdf — combined two-boundary CDF over signed time.
///
/// Fields
/// ------
/// - `x`: `Array1<f64>`
///   Ascending signed-time grid.
/// - `cdf`: `Array1<f64>`
///   Cumulative response probability at each grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCdf {
    x: Array1<f64>,
    cdf: Array1<f64>,
}

impl ModelCdf {
    /// Pair a time grid with its CDF values.
    ///
    /// Errors
    /// ------
    /// - `RTError::CdfLengthMismatch` when the arrays differ in length.
    pub fn new(x: Array1<f64>, cdf: Array1<f64>) -> RTResult<Self> {
        if x.len() != cdf.len() {
            return Err(RTError::CdfLengthMismatch { x_len: x.len(), cdf_len: cdf.len() });
        }
        Ok(ModelCdf { x, cdf })
    }

    /// A CDF with no support, as returned for failed evaluations.
    pub fn empty() -> Self {
        ModelCdf { x: Array1::zeros(0), cdf: Array1::zeros(0) }
    }

    pub fn x(&self) -> ArrayView1<'_, f64> {
        self.x.view()
    }

    pub fn cdf(&self) -> ArrayView1<'_, f64> {
        self.cdf.view()
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// `true` when every grid point and CDF value is finite.
    pub fn is_finite(&self) -> bool {
        self.x.iter().chain(self.cdf.iter()).all(|v| v.is_finite())
    }
}

/// BoundaryCdf — one boundary's partial CDF over latency magnitude.
///
/// `time` is ascending and positive; `cdf` starts near zero and ends at the
/// boundary's total response probability.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryCdf {
    pub time: Array1<f64>,
    pub cdf: Array1<f64>,
}

impl BoundaryCdf {
    /// Total response probability of the boundary (0 when it has no support).
    pub fn total(&self) -> f64 {
        self.cdf.last().copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// SplitCdf — lower and upper partial CDFs of one [`ModelCdf`].
#[derive(Debug, Clone, PartialEq)]
pub struct SplitCdf {
    pub lower: BoundaryCdf,
    pub upper: BoundaryCdf,
}

/// Split a combined CDF at the zero-time boundary.
///
/// Parameters
/// ----------
/// - `model`: `&ModelCdf`
///   Combined CDF; may be empty, in which case both sides are empty.
///
/// Returns
/// -------
/// `SplitCdf`
///   Lower side as latency magnitudes (nearest to the boundary first) and the
///   upper side as positive times, each rebased on `c0`.
///
/// Notes
/// -----
/// - An exact `x == 0` grid point is treated as the boundary marker and is
///   excluded from both sides.
/// - `lower.total() + upper.total() == cdf[last] − cdf[0]`, which is ≈1 for
///   a conforming provider.
pub fn split_cdf(model: &ModelCdf) -> SplitCdf {
    let x = model.x();
    let cdf = model.cdf();
    let n = x.len();

    // z: first index with x >= 0; u: first index with x > 0.
    let z = search_sorted_left(x, 0.0);
    let u = if z < n && x[z] == 0.0 { z + 1 } else { z };

    let c0 = if u > z {
        cdf[z]
    } else if z > 0 {
        cdf[z - 1]
    } else {
        cdf.first().copied().unwrap_or(0.0)
    };

    let lower_x = x.slice(s![..z;-1]);
    let lower_cdf = cdf.slice(s![..z;-1]);
    let lower = BoundaryCdf { time: lower_x.mapv(|t| -t), cdf: lower_cdf.mapv(|c| c0 - c) };

    let upper = BoundaryCdf {
        time: x.slice(s![u..]).to_owned(),
        cdf: cdf.slice(s![u..]).mapv(|c| c - c0),
    };

    SplitCdf { lower, upper }
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
    // - `ModelCdf::new` length validation.
    // - `split_cdf` with an explicit zero marker, without one, and on an
    //   empty CDF.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Split a symmetric CDF that carries an explicit zero marker.
    //
    // Given
    // -----
    // - x   = [-2, -1, 0, 1, 2]
    // - cdf = [0.0, 0.3, 0.4, 0.7, 1.0]
    //
    // Expect
    // ------
    // - c0 = 0.4 (value at the marker).
    // - Lower: time [1, 2], cdf [0.1, 0.4]; total 0.4.
    // - Upper: time [1, 2], cdf [0.3, 0.6]; total 0.6.
    fn split_cdf_with_zero_marker_rebases_both_sides() {
        let model =
            ModelCdf::new(array![-2.0, -1.0, 0.0, 1.0, 2.0], array![0.0, 0.3, 0.4, 0.7, 1.0])
                .unwrap();

        let split = split_cdf(&model);

        assert_eq!(split.lower.time, array![1.0, 2.0]);
        assert_relative_eq!(split.lower.cdf[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(split.lower.total(), 0.4, epsilon = 1e-12);
        assert_eq!(split.upper.time, array![1.0, 2.0]);
        assert_relative_eq!(split.upper.cdf[0], 0.3, epsilon = 1e-12);
        assert_relative_eq!(split.upper.total(), 0.6, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Without a zero marker the last negative point anchors both sides.
    //
    // Given
    // -----
    // - x   = [-1.5, -0.5, 0.5, 1.5]
    // - cdf = [0.05, 0.25, 0.5, 1.0]
    //
    // Expect
    // ------
    // - c0 = 0.25; lower cdf [0, 0.2]; upper cdf [0.25, 0.75].
    // - Totals sum to cdf[last] − cdf[0] = 0.95.
    fn split_cdf_without_marker_uses_last_negative_point() {
        let model =
            ModelCdf::new(array![-1.5, -0.5, 0.5, 1.5], array![0.05, 0.25, 0.5, 1.0]).unwrap();

        let split = split_cdf(&model);

        assert_eq!(split.lower.time, array![0.5, 1.5]);
        assert_relative_eq!(split.lower.cdf[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(split.lower.total(), 0.2, epsilon = 1e-12);
        assert_eq!(split.upper.time, array![0.5, 1.5]);
        assert_relative_eq!(split.upper.total(), 0.75, epsilon = 1e-12);
        assert_relative_eq!(split.lower.total() + split.upper.total(), 0.95, epsilon = 1e-12);
    }

    #[test]
    fn split_cdf_of_empty_model_has_empty_sides() {
        let split = split_cdf(&ModelCdf::empty());

        assert!(split.lower.is_empty() && split.upper.is_empty());
        assert_eq!(split.lower.total(), 0.0);
    }

    #[test]
    fn model_cdf_new_rejects_length_mismatch() {
        let result = ModelCdf::new(array![0.0, 1.0], array![0.5]);

        assert_eq!(result.unwrap_err(), RTError::CdfLengthMismatch { x_len: 2, cdf_len: 1 });
    }
}
