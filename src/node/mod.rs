//! node — observed response-time nodes and their model CDF providers.
//!
//! Purpose
//! -------
//! Expose the goodness-of-fit engine as node behavior. A node holds its
//! observations, current parameters and a CDF provider; the sampler or
//! optimizer that owns the parameters calls the node's fit-statistic and
//! quantile methods.
//!
//! Key behaviors
//! -------------
//! - [`ModelCdfProvider`] is the seam to the model: parameters and a time
//!   window in, combined `(x, cdf)` out.
//! - [`FitStatisticProvider`] turns any node type holding a
//!   [`QuantileFitEngine`](crate::goodness_of_fit::QuantileFitEngine) into a
//!   fit-statistic provider through provided methods.
//! - [`WfptNode`] is the ready-made node; [`TabulatedCdf`] and
//!   [`BoundaryMixtureCdf`] are the built-in providers.
//!
//! Testing notes
//! -------------
//! - See [`provider`] and [`wfpt`] for unit tests.

pub mod provider;
pub mod wfpt;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::provider::{BoundaryMixtureCdf, MIXTURE_PARAMS, ModelCdfProvider, TabulatedCdf};
pub use self::wfpt::{FitStatisticProvider, WfptNode};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::provider::{BoundaryMixtureCdf, ModelCdfProvider, TabulatedCdf};
    pub use super::wfpt::{FitStatisticProvider, WfptNode};
}
