//! goodness_of_fit — quantile-based fit statistics for two-boundary models.
//!
//! Purpose
//! -------
//! Compare observed signed response times against a model-implied combined
//! CDF. The subtree covers the data-side quantile statistics, theoretical
//! bin proportions, the chi-square and G-square statistics, and the
//! per-boundary quantile tables used for predictive checks.
//!
//! Key behaviors
//! -------------
//! - [`QuantileStats`] summarizes the data once per grid:
//!   `(n_samples, emp_rt, freq_obs)`.
//! - [`theoretical_proportion`] maps `emp_rt` onto a [`ModelCdf`] with
//!   clamped left search and zero flooring.
//! - [`QuantileFitEngine`] owns the cache and evaluates [`FitCriterion`]s,
//!   returning [`FitOutcome::Degenerate`] instead of failing when the model
//!   CDF is unusable.
//! - [`QuantileReport`] tabulates `(time, target)` pairs per boundary.
//!
//! Invariants & assumptions
//! ------------------------
//! - The only error surfaced by statistic evaluation is
//!   [`FitError::StatsNotComputed`]. Degenerate model CDFs saturate to `+∞`
//!   (chi-square) or `−∞` (G-square).
//! - Theoretical proportions are strictly positive for any finite CDF.
//!
//! Conventions
//! -----------
//! - The G-square value is `2·Σ O·ln p`, correct up to a data-dependent
//!   additive constant; compare it only across models on the same data.
//!
//! Downstream usage
//! ----------------
//! - Node types hold a [`QuantileFitEngine`] and implement
//!   [`crate::node::FitStatisticProvider`] to expose the engine as node
//!   methods.
//!
//!   ```rust
//!   use wfpt_fit::goodness_of_fit::{FitOptions, QuantileFitEngine};
//!
//!   let engine = QuantileFitEngine::new(FitOptions::default());
//!   assert!(engine.stats().is_err());
//!   ```
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests; cross-module properties (layout,
//!   frequency totals, sentinel behavior) are exercised by the integration
//!   and property tests.
//!
//! [`ModelCdf`]: crate::response_time::ModelCdf

pub mod engine;
pub mod errors;
pub mod options;
pub mod proportion;
pub mod report;
pub mod statistics;
pub mod stats;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::engine::QuantileFitEngine;
pub use self::errors::{FitError, FitResult};
pub use self::options::{DEFAULT_PROPORTION_FLOOR, DEFAULT_TIME_RANGE, FitOptions};
pub use self::proportion::theoretical_proportion;
pub use self::report::QuantileReport;
pub use self::statistics::{ChiSquareOutcome, FitCriterion, FitOutcome};
pub use self::stats::QuantileStats;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::engine::QuantileFitEngine;
    pub use super::errors::{FitError, FitResult};
    pub use super::options::FitOptions;
    pub use super::statistics::{FitCriterion, FitOutcome};
}
