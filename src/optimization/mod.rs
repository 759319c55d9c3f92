//! optimization — derivative-free fitting of node parameters.
//!
//! Purpose
//! -------
//! Fit the provider parameters of a [`WfptNode`] by optimizing one of its
//! quantile fit statistics with an `argmin` Nelder–Mead simplex. The
//! statistics are piecewise smooth in `θ` and saturate at degenerate
//! parameters, so no gradients are used.
//!
//! Key behaviors
//! -------------
//! - [`minimize_statistic`] minimizes chi-square, or maximizes G-square by
//!   minimizing `−G`, and stores the best `θ` on the node.
//! - [`StatisticCost`] replaces degenerate evaluations with the finite
//!   [`DEGENERATE_COST`] so simplex comparisons stay well defined.
//! - Configuration issues, fit-engine preconditions and backend failures
//!   are normalized into [`OptError`] with the alias [`OptResult`].
//!
//! Invariants & assumptions
//! ------------------------
//! - The node must carry computed quantile statistics before minimization;
//!   this is checked once up front.
//! - The statistics cache is never modified by the minimizer, only the
//!   node parameters.
//!
//! Conventions
//! -----------
//! - [`OptimOutcome::value`] is always the statistic in its natural sign,
//!   never the internal cost.
//! - Start and finish of every run are logged through `tracing` at `info`.
//!
//! Downstream usage
//! ----------------
//! - Python bindings expose `minimize_statistic` as `WfptNode.optimize`.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; convergence toward a known
//!   generating parameter is covered in the integration tests.
//!
//! [`WfptNode`]: crate::node::WfptNode

pub mod adapter;
pub mod errors;
pub mod options;
pub mod outcome;
pub mod run;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::adapter::{DEGENERATE_COST, StatisticCost};
pub use self::errors::{OptError, OptResult};
pub use self::options::OptimizeOptions;
pub use self::outcome::{FnEvalMap, OptimOutcome};
pub use self::run::minimize_statistic;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::options::OptimizeOptions;
    pub use super::outcome::OptimOutcome;
    pub use super::run::minimize_statistic;
}
