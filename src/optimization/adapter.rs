//! Adapter that exposes a node's fit statistic as an `argmin` problem.
//!
//! Chi-square is minimized directly. G-square grows with fit quality, so the
//! cost is `c(θ) = −G(θ)`. Degenerate evaluations (the provider failed or
//! produced an unusable CDF at `θ`) and non-finite values cost
//! [`DEGENERATE_COST`], which keeps the simplex comparisons well defined
//! while steering the search back into the valid region.
use crate::{
    goodness_of_fit::{FitCriterion, FitOutcome},
    node::{ModelCdfProvider, WfptNode},
};
use argmin::core::{CostFunction, Error};
use ndarray::Array1;

/// Cost assigned to parameter vectors where the statistic cannot be computed.
pub const DEGENERATE_COST: f64 = 1e12;

/// Bridges a [`WfptNode`] and a [`FitCriterion`] to `argmin`'s `CostFunction`.
#[derive(Debug, Clone)]
pub struct StatisticCost<'a, P: ModelCdfProvider> {
    pub node: &'a WfptNode<P>,
    pub criterion: FitCriterion,
}

impl<'a, P: ModelCdfProvider> StatisticCost<'a, P> {
    pub fn new(node: &'a WfptNode<P>, criterion: FitCriterion) -> Self {
        Self { node, criterion }
    }

    /// Map a cost back to the statistic in its natural sign.
    pub fn statistic_from_cost(&self, cost: f64) -> f64 {
        match self.criterion {
            FitCriterion::ChiSquare => cost,
            FitCriterion::GSquare => -cost,
        }
    }
}

impl<'a, P: ModelCdfProvider> CostFunction for StatisticCost<'a, P> {
    type Param = Array1<f64>;
    type Output = f64;

    /// Evaluate `c(θ)`.
    ///
    /// # Errors
    /// Only `FitError::StatsNotComputed` is propagated; every other failure
    /// is absorbed into [`DEGENERATE_COST`].
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let cost = match self.node.statistic_at(self.criterion, theta.view())? {
            FitOutcome::Finite(value) => self.statistic_from_cost(value),
            FitOutcome::Degenerate => DEGENERATE_COST,
        };
        if cost.is_finite() { Ok(cost) } else { Ok(DEGENERATE_COST) }
    }
}
