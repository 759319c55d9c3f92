//! goodness_of_fit::statistics — chi-square and G-square fit statistics.
//!
//! Purpose
//! -------
//! Compare observed bin frequencies against theoretical bin proportions and
//! summarize the agreement as a scalar. Degenerate model evaluations are
//! tracked explicitly as [`FitOutcome::Degenerate`] and only turned into
//! ±∞ at the public boundary.
//!
//! Key behaviors
//! -------------
//! - [`pearson_chisquare`]: `Σ (O − E)² / E` with `E = p · n_samples`.
//! - [`gsquare_surrogate`]: `2 · Σ O · ln p`. This omits the
//!   `−2 Σ O · ln(O / n)` term of the likelihood-ratio G², which depends
//!   only on the data, so it ranks models on a fixed dataset identically
//!   but is not the canonical statistic.
//! - [`ChiSquareOutcome`] adds the upper-tail p-value under χ²(k − 1) for
//!   `k` bins.
//!
//! Invariants & assumptions
//! ------------------------
//! - Proportions are strictly positive (floored upstream), so ratios and
//!   logarithms are finite for finite inputs.
//! - `FitOutcome::Degenerate` maps to `+∞` for chi-square and `−∞` for
//!   G-square: the worst possible fit in each statistic's direction.
//!
//! Testing notes
//! -------------
//! - Unit tests pin both statistics on small hand-computed vectors and
//!   check the sentinel conversion.
use crate::goodness_of_fit::errors::FitError;
use ndarray::ArrayView1;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::str::FromStr;

/// Which fit statistic to evaluate.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"chisquare"`, `"gsquare"`). Unknown names return
/// `FitError::InvalidCriterion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitCriterion {
    ChiSquare,
    GSquare,
}

impl FitCriterion {
    /// Public value of an outcome for this criterion (±∞ on degeneracy).
    pub fn sentinel_value(self, outcome: FitOutcome) -> f64 {
        match self {
            FitCriterion::ChiSquare => outcome.or_pos_infinity(),
            FitCriterion::GSquare => outcome.or_neg_infinity(),
        }
    }
}

impl FromStr for FitCriterion {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chisquare" => Ok(FitCriterion::ChiSquare),
            "gsquare" => Ok(FitCriterion::GSquare),
            _ => Err(FitError::InvalidCriterion { name: s.to_string() }),
        }
    }
}

/// FitOutcome — result of one fit-statistic evaluation.
///
/// Variants
/// --------
/// - `Finite(f64)`
///   The statistic could be computed.
/// - `Degenerate`
///   The model CDF could not be resolved at the current parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitOutcome {
    Finite(f64),
    Degenerate,
}

impl FitOutcome {
    /// Chi-square view: degenerate evaluations are `+∞`.
    pub fn or_pos_infinity(self) -> f64 {
        match self {
            FitOutcome::Finite(v) => v,
            FitOutcome::Degenerate => f64::INFINITY,
        }
    }

    /// G-square view: degenerate evaluations are `−∞`.
    pub fn or_neg_infinity(self) -> f64 {
        match self {
            FitOutcome::Finite(v) => v,
            FitOutcome::Degenerate => f64::NEG_INFINITY,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, FitOutcome::Degenerate)
    }
}

/// Pearson chi-square of observed frequencies against expected counts.
///
/// Parameters
/// ----------
/// - `freq_obs`: observed frequency per bin.
/// - `proportions`: theoretical proportion per bin (same length).
/// - `n_samples`: total sample count scaling the proportions.
pub fn pearson_chisquare(
    freq_obs: ArrayView1<'_, f64>, proportions: ArrayView1<'_, f64>, n_samples: usize,
) -> f64 {
    let n = n_samples as f64;
    freq_obs
        .iter()
        .zip(proportions.iter())
        .map(|(&o, &p)| {
            let e = p * n;
            (o - e) * (o - e) / e
        })
        .sum()
}

/// `2 · Σ O · ln p`, the data-shifted G-square surrogate.
pub fn gsquare_surrogate(freq_obs: ArrayView1<'_, f64>, proportions: ArrayView1<'_, f64>) -> f64 {
    2.0 * freq_obs.iter().zip(proportions.iter()).map(|(&o, &p)| o * p.ln()).sum::<f64>()
}

/// ChiSquareOutcome — chi-square statistic with its asymptotic p-value.
///
/// Fields
/// ------
/// - `stat`: `f64`
///   Pearson statistic, `+∞` for degenerate evaluations.
/// - `df`: `usize`
///   Degrees of freedom, number of bins minus one.
/// - `p_value`: `f64`
///   Upper-tail probability under χ²(df); `0` for degenerate evaluations
///   and NaN when `df == 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquareOutcome {
    stat: f64,
    df: usize,
    p_value: f64,
}

impl ChiSquareOutcome {
    /// Attach the χ²(k − 1) p-value to a chi-square evaluation over `n_bins`.
    pub fn new(outcome: FitOutcome, n_bins: usize) -> Self {
        let df = n_bins.saturating_sub(1);
        let stat = outcome.or_pos_infinity();
        let p_value = match outcome {
            FitOutcome::Degenerate => 0.0,
            FitOutcome::Finite(s) => {
                ChiSquared::new(df as f64).map(|dist| dist.sf(s)).unwrap_or(f64::NAN)
            }
        };
        ChiSquareOutcome { stat, df, p_value }
    }

    pub fn stat(&self) -> f64 {
        self.stat
    }

    pub fn df(&self) -> usize {
        self.df
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }
}
