//! Quantile grids — validated probability sequences in (0, 1).
//!
//! A [`QuantileGrid`] is what callers pass to quantile extraction and
//! quantile reporting. It also derives the per-bin probability masses used to
//! build observed frequencies.
use crate::response_time::errors::{RTError, RTResult};
use ndarray::Array1;

/// Default grid used for predictive-check reports.
pub const DEFAULT_REPORT_GRID: [f64; 5] = [0.1, 0.3, 0.5, 0.7, 0.9];

/// `QuantileGrid` — strictly increasing probabilities in the open interval (0, 1).
///
/// Invariants
/// ----------
/// - At least one entry.
/// - Every entry lies in (0, 1).
/// - Entries are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileGrid {
    probs: Array1<f64>,
}

impl QuantileGrid {
    /// Validate and wrap a probability sequence.
    ///
    /// Errors
    /// ------
    /// - `RTError::EmptyGrid` for an empty slice.
    /// - `RTError::GridOutOfRange` for NaN or values outside (0, 1).
    /// - `RTError::GridNotIncreasing` when an entry does not exceed its
    ///   predecessor.
    pub fn new(probs: &[f64]) -> RTResult<Self> {
        if probs.is_empty() {
            return Err(RTError::EmptyGrid);
        }

        let mut prev = 0.0_f64;
        for (index, &value) in probs.iter().enumerate() {
            if !(value > 0.0 && value < 1.0) {
                return Err(RTError::GridOutOfRange { index, value });
            }
            if index > 0 && value <= prev {
                return Err(RTError::GridNotIncreasing { index, value });
            }
            prev = value;
        }

        Ok(QuantileGrid { probs: Array1::from(probs.to_vec()) })
    }

    /// Probabilities of the grid.
    pub fn probs(&self) -> &Array1<f64> {
        &self.probs
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    /// Always `false` for a constructed grid.
    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Probability mass between consecutive grid points, bookended by 0 and 1.
    ///
    /// Returns `len() + 1` entries summing to one. This is the upper-boundary
    /// bin layout; the lower boundary uses the same masses reversed.
    pub fn bin_masses(&self) -> Array1<f64> {
        let mut masses = Array1::zeros(self.probs.len() + 1);
        let mut prev = 0.0;
        for (mass, &p) in masses.iter_mut().zip(self.probs.iter()) {
            *mass = p - prev;
            prev = p;
        }
        masses[self.probs.len()] = 1.0 - prev;
        masses
    }
}

impl Default for QuantileGrid {
    fn default() -> Self {
        QuantileGrid { probs: Array1::from(DEFAULT_REPORT_GRID.to_vec()) }
    }
}
