//! response_time — signed response-time data and model CDF primitives.
//!
//! Purpose
//! -------
//! Collect the validated inputs and small numeric building blocks that the
//! goodness-of-fit engine is assembled from: observed signed response times,
//! probability grids, the plotting-position quantile estimator, monotone
//! search, and the combined and boundary-split model CDFs.
//!
//! Key behaviors
//! -------------
//! - [`ObservationSet`] validates raw observations once (finite,
//!   non-zero) and exposes per-boundary latency views.
//! - [`QuantileGrid`] validates probability grids and derives per-bin masses.
//! - [`QuantileEstimator`] and [`empirical_quantiles`] estimate sample
//!   quantiles with configurable plotting positions.
//! - [`ModelCdf`] and [`split_cdf`] carry provider output and split it at
//!   the zero-time boundary.
//! - [`search_sorted_left`] / [`search_sorted_clamped`] give left
//!   insertion-point search with edge clamping.
//!
//! Invariants & assumptions
//! ------------------------
//! - Sign encodes the boundary (negative = lower, positive = upper); zero is
//!   the boundary separator and never an observation.
//! - Constructors report failures via [`RTResult`] and never panic on
//!   user-facing invalid inputs.
//! - Provider-side contract breaches (non-monotone or unnormalized CDFs) are
//!   not detected here.
//!
//! Conventions
//! -----------
//! - Lower-boundary latencies are handled as positive magnitudes internally
//!   and only negated when assembled back into signed-time arrays.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use wfpt_fit::response_time::{ObservationSet, QuantileGrid, RTResult};
//!   ```
//!
//!   and only reaches into submodules when matching on [`RTError`].
//!
//! Testing notes
//! -------------
//! - Each submodule carries its own unit tests; the end-to-end behavior is
//!   covered by the integration tests under `tests/`.

pub mod cdf;
pub mod data;
pub mod empirical;
pub mod errors;
pub mod grid;
pub mod search;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::cdf::{BoundaryCdf, ModelCdf, SplitCdf, split_cdf};
pub use self::data::ObservationSet;
pub use self::empirical::{QuantileEstimator, empirical_quantiles};
pub use self::errors::{RTError, RTResult};
pub use self::grid::{DEFAULT_REPORT_GRID, QuantileGrid};
pub use self::search::{search_sorted_clamped, search_sorted_left};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::cdf::{ModelCdf, split_cdf};
    pub use super::data::ObservationSet;
    pub use super::errors::{RTError, RTResult};
    pub use super::grid::QuantileGrid;
}
