//! Signed response-time observations for two-boundary models.
//!
//! Purpose
//! -------
//! Provide a small, validated container for the observed data attached to a
//! node. Each observation is a signed response time: the sign encodes which
//! boundary was reached and the magnitude is the latency.
//!
//! Key behaviors
//! -------------
//! - [`ObservationSet`] enforces basic data invariants (finite, non-zero)
//!   at construction time. An empty set is valid; its quantile statistics
//!   are NaN and the fit statistics saturate downstream.
//! - Boundary-specific views: counts per boundary and the latency magnitudes
//!   of each boundary, ready for quantile estimation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Negative values are lower-boundary responses, positive values are
//!   upper-boundary responses.
//! - Zero is the boundary separator used elsewhere in the crate and is never
//!   a valid observation.
//! - The set is immutable once constructed.
//!
//! Downstream usage
//! ----------------
//! - Construct [`ObservationSet`] where raw data enters the crate, then hand
//!   it to a node; quantile extraction relies on these invariants and does
//!   not re-validate.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path, empty input, non-finite values, zero
//!   values, and the boundary partition.
use crate::response_time::errors::{RTError, RTResult};
use ndarray::Array1;

/// `ObservationSet` — validated signed response times.
///
/// Purpose
/// -------
/// Represent one node's observed data so that quantile extraction can assume
/// clean, non-zero, finite values.
///
/// Fields
/// ------
/// - `data`: `Array1<f64>`
///   Signed response times in their original order.
///
/// Invariants
/// ----------
/// - Every entry is finite and non-zero.
///
/// Performance
/// -----------
/// - Validation is a single O(n) scan. Boundary views allocate one vector
///   per call.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSet {
    data: Array1<f64>,
}

impl ObservationSet {
    /// Construct a validated [`ObservationSet`] from raw signed response times.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `Array1<f64>`
    ///   Signed response times. Must be finite and non-zero; may be empty.
    ///
    /// Returns
    /// -------
    /// `RTResult<ObservationSet>`
    ///   - `Ok(ObservationSet)` if all invariants are satisfied.
    ///   - `Err(RTError)` pointing at the first offending element otherwise.
    ///
    /// Errors
    /// ------
    /// - `RTError::NonFiniteObservation { index, value }`
    ///   Returned for the first NaN or ±∞ entry.
    /// - `RTError::ZeroObservation { index }`
    ///   Returned for the first entry equal to zero.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use wfpt_fit::response_time::data::ObservationSet;
    /// let obs = ObservationSet::new(array![-0.8, 0.4, 0.6]).unwrap();
    /// assert_eq!(obs.n_lower(), 1);
    /// assert_eq!(obs.n_upper(), 2);
    /// ```
    pub fn new(data: Array1<f64>) -> RTResult<Self> {
        for (index, &value) in data.iter().enumerate() {
            if !value.is_finite() {
                return Err(RTError::NonFiniteObservation { index, value });
            }
            if value == 0.0 {
                return Err(RTError::ZeroObservation { index });
            }
        }

        Ok(ObservationSet { data })
    }

    /// Raw signed response times.
    pub fn data(&self) -> &Array1<f64> {
        &self.data
    }

    /// Total number of observations.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` when no responses were observed.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of lower-boundary (negative) observations.
    pub fn n_lower(&self) -> usize {
        self.data.iter().filter(|&&v| v < 0.0).count()
    }

    /// Number of upper-boundary (positive) observations.
    pub fn n_upper(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0.0).count()
    }

    /// Latencies of the lower-boundary responses (negated, so all positive).
    pub fn lower_latencies(&self) -> Vec<f64> {
        self.data.iter().filter(|&&v| v < 0.0).map(|&v| -v).collect()
    }

    /// Latencies of the upper-boundary responses.
    pub fn upper_latencies(&self) -> Vec<f64> {
        self.data.iter().filter(|&&v| v > 0.0).copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction behavior of `ObservationSet::new`.
    // - Boundary counts and latency views.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a valid mixed-sign series is accepted and partitioned.
    //
    // Given
    // -----
    // - `data = [-0.8, -0.5, 0.3, 0.4, 0.6]`.
    //
    // Expect
    // ------
    // - Two lower and three upper responses.
    // - Lower latencies are the magnitudes in original order.
    fn observation_set_new_partitions_valid_input() {
        let obs = ObservationSet::new(array![-0.8, -0.5, 0.3, 0.4, 0.6]).unwrap();

        assert_eq!(obs.len(), 5);
        assert_eq!(obs.n_lower(), 2);
        assert_eq!(obs.n_upper(), 3);
        assert_eq!(obs.lower_latencies(), vec![0.8, 0.5]);
        assert_eq!(obs.upper_latencies(), vec![0.3, 0.4, 0.6]);
    }

    #[test]
    // Purpose
    // -------
    // An empty series is a valid, degenerate observation set.
    //
    // Given
    // -----
    // - `data = []`.
    //
    // Expect
    // ------
    // - `Ok` with zero responses on both boundaries and empty latency views.
    fn observation_set_new_accepts_empty_series() {
        let obs = ObservationSet::new(array![]).unwrap();

        assert!(obs.is_empty());
        assert_eq!(obs.len(), 0);
        assert_eq!(obs.n_lower(), 0);
        assert_eq!(obs.n_upper(), 0);
        assert!(obs.lower_latencies().is_empty());
        assert!(obs.upper_latencies().is_empty());
    }

    #[test]
    // Purpose
    // -------
    // Ensure non-finite and zero values are rejected at the first offending
    // index.
    //
    // Given
    // -----
    // - `[0.4, +∞, 0.0]` and `[0.4, 0.0, f64::NAN]`.
    //
    // Expect
    // ------
    // - `NonFiniteObservation { index: 1 }` for the first.
    // - `ZeroObservation { index: 1 }` for the second.
    fn observation_set_new_rejects_non_finite_and_zero_values() {
        let non_finite = ObservationSet::new(array![0.4, f64::INFINITY, 0.0]);
        let zero = ObservationSet::new(array![0.4, 0.0, f64::NAN]);

        assert_eq!(
            non_finite.unwrap_err(),
            RTError::NonFiniteObservation { index: 1, value: f64::INFINITY }
        );
        assert_eq!(zero.unwrap_err(), RTError::ZeroObservation { index: 1 });
    }
}
