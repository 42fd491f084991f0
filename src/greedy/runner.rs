//! Priority-ordered greedy admission.

use crate::error::{check_supply, Result};
use crate::ranking::priority_order;
use crate::score::ScoredBatch;
use crate::selection::{Selection, SelectionOutcome, SelectionStatus, Selector};
use std::time::Instant;
use tracing::{debug, trace};

/// Greedy baseline. See the [module docs](super).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreedySelector {
    epsilon: f64,
}

impl GreedySelector {
    pub fn new() -> Self {
        Self { epsilon: 1e-9 }
    }

    /// Slack added to the supply cap in capacity checks.
    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.epsilon = eps;
        self
    }
}

impl Default for GreedySelector {
    fn default() -> Self {
        Self::new()
    }
}

impl Selector for GreedySelector {
    fn name(&self) -> &str {
        "greedy"
    }

    fn select(&self, batch: &ScoredBatch, supply_mw: f64) -> Result<SelectionOutcome> {
        check_supply(supply_mw)?;
        let started = Instant::now();

        let mut selection = Selection::empty(batch.len());
        let mut used = 0.0;
        let mut score = 0.0;
        for i in priority_order(batch) {
            let demand = batch.demand(i);
            if used + demand <= supply_mw + self.epsilon {
                selection.insert(i);
                used += demand;
                score += batch.base_score(i);
                trace!(record = i, demand, used, "greedy admit");
            } else {
                trace!(record = i, demand, used, "greedy skip");
            }
        }

        let admitted = selection.count() as u64;
        debug!(
            records = batch.len(),
            admitted,
            used_mw = used,
            score,
            "greedy selection finished"
        );

        Ok(SelectionOutcome {
            selection,
            score,
            demand_mw: used,
            status: SelectionStatus::Heuristic,
            evaluated: batch.len() as u64,
            feasible: admitted,
            elapsed_ms: started.elapsed().as_millis() as u64,
        })
    }
}
