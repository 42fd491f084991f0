//! Exhaustive enumeration over selection bitmasks.

use super::config::ExactConfig;
use crate::constraint::{CompiledValidator, ConstraintValidator, RegionalCoverage};
use crate::error::{check_supply, AllocError, Result};
use crate::score::ScoredBatch;
use crate::selection::{Selection, SelectionOutcome, SelectionStatus, Selector};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Masks evaluated between deadline and cancellation checks.
const CHUNK_SIZE: u64 = 1 << 12;

/// Exact maximum-score selector.
///
/// # Usage
///
/// ```
/// use u_gridalloc::exact::{ExactConfig, ExactSelector};
/// use u_gridalloc::facility::{Batch, FacilityRecord};
/// use u_gridalloc::score::ScoreModel;
/// use u_gridalloc::selection::Selector;
///
/// let batch = Batch::new(vec![
///     FacilityRecord::new("Gaza", "A", "Emergency Center", 10.0, 3, 0.2),
///     FacilityRecord::new("Gaza", "B", "Water Pump", 8.0, 3, 0.1),
///     FacilityRecord::new("Gaza", "C", "Residential", 5.0, 1, 0.5),
/// ]).unwrap();
/// let scored = ScoreModel::default().score_batch(&batch);
///
/// let selector = ExactSelector::new(ExactConfig::default()).unwrap();
/// let outcome = selector.select(&scored, 12.0).unwrap();
/// assert_eq!(outcome.selection.decisions(), &[true, false, false]);
/// assert!((outcome.score - 81.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct ExactSelector {
    config: ExactConfig,
    validator: ConstraintValidator,
}

impl ExactSelector {
    /// Creates a selector whose constraints follow the config flags.
    pub fn new(config: ExactConfig) -> Result<Self> {
        config.validate().map_err(AllocError::InvalidConfig)?;
        let mut validator =
            ConstraintValidator::from_flags(config.regions.clone(), false, config.enforce_pump_region);
        if config.enforce_fairness {
            validator = validator.with_fairness_rule(
                RegionalCoverage::fairness(config.regions.clone())
                    .with_types(config.fairness_types.clone()),
            );
        }
        Ok(Self { config, validator })
    }

    /// Replaces the constraint set.
    pub fn with_validator(mut self, validator: ConstraintValidator) -> Self {
        self.validator = validator;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ExactConfig {
        &self.config
    }

    /// The constraint set every candidate is checked against.
    pub fn validator(&self) -> &ConstraintValidator {
        &self.validator
    }

    /// Runs the search with an optional cancellation flag.
    ///
    /// If `cancel` is set to `true` while the search runs, it stops at the
    /// next chunk boundary and returns [`AllocError::Cancelled`].
    pub fn select_with_cancel(
        &self,
        batch: &ScoredBatch,
        supply_mw: f64,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SelectionOutcome> {
        check_supply(supply_mw)?;
        let n = batch.len();
        if n > self.config.max_batch_size {
            return Err(AllocError::BatchTooLarge {
                size: n,
                max: self.config.max_batch_size,
            });
        }

        let started = Instant::now();
        let enumeration = Enumeration {
            demands: (0..n).map(|i| batch.demand(i)).collect(),
            scores: batch.base_scores(),
            limit: supply_mw + self.config.epsilon,
            validator: self.validator.compile(batch),
        };
        let guard = Guard {
            started,
            time_limit_ms: self.config.time_limit_ms,
            cancel,
        };
        let total = 1u64 << n;

        let best = self.scan(&enumeration, total, &guard)?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        debug!(
            records = n,
            supply_mw,
            evaluated = total,
            feasible = best.feasible,
            active_rules = enumeration.validator.active_rules(),
            elapsed_ms,
            "exact enumeration finished"
        );

        let (selection, score, status) = match best.best {
            Some((score, mask)) => (
                Selection::from_mask(mask, n),
                score,
                SelectionStatus::Optimal,
            ),
            None => {
                warn!(
                    records = n,
                    supply_mw, "no candidate satisfied the constraints, falling back to empty selection"
                );
                (Selection::empty(n), 0.0, SelectionStatus::EmptyFallback)
            }
        };

        Ok(SelectionOutcome {
            demand_mw: selection.demand_mw(batch),
            selection,
            score,
            status,
            evaluated: total,
            feasible: best.feasible,
            elapsed_ms,
        })
    }

    fn scan(&self, enumeration: &Enumeration<'_>, total: u64, guard: &Guard) -> Result<ChunkBest> {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallel && total > CHUNK_SIZE {
                return scan_parallel(enumeration, total, guard);
            }
        }
        scan_sequential(enumeration, total, guard)
    }
}

impl Selector for ExactSelector {
    fn name(&self) -> &str {
        "exact"
    }

    fn select(&self, batch: &ScoredBatch, supply_mw: f64) -> Result<SelectionOutcome> {
        self.select_with_cancel(batch, supply_mw, None)
    }
}

/// Per-batch data for evaluating one mask.
struct Enumeration<'a> {
    demands: Vec<f64>,
    scores: &'a [f64],
    limit: f64,
    validator: CompiledValidator,
}

impl Enumeration<'_> {
    /// Score of `mask`, or `None` if it is infeasible.
    ///
    /// Demand is accumulated in ascending record order and the candidate is
    /// dropped as soon as it crosses the limit.
    #[inline]
    fn evaluate(&self, mask: u64) -> Option<f64> {
        let mut demand = 0.0;
        let mut score = 0.0;
        let mut rest = mask;
        while rest != 0 {
            let i = rest.trailing_zeros() as usize;
            demand += self.demands[i];
            if demand > self.limit {
                return None;
            }
            score += self.scores[i];
            rest &= rest - 1;
        }
        self.validator.allows(mask).then_some(score)
    }

    fn scan(&self, masks: Range<u64>) -> ChunkBest {
        let mut acc = ChunkBest::default();
        for mask in masks {
            if let Some(score) = self.evaluate(mask) {
                acc.offer(score, mask);
            }
        }
        acc
    }
}

/// Best candidate of a contiguous mask range.
#[derive(Debug, Clone, Copy, Default)]
struct ChunkBest {
    /// `(score, mask)` of the first maximum seen.
    best: Option<(f64, u64)>,
    feasible: u64,
}

impl ChunkBest {
    /// Masks must be offered in increasing order; only strict improvements
    /// replace the incumbent.
    fn offer(&mut self, score: f64, mask: u64) {
        self.feasible += 1;
        match self.best {
            Some((best, _)) if score <= best => {}
            _ => self.best = Some((score, mask)),
        }
    }

    /// Higher score wins; on equal scores the lower mask wins.
    fn merge(self, other: Self) -> Self {
        let best = match (self.best, other.best) {
            (Some(a), Some(b)) => {
                if b.0 > a.0 || (b.0 == a.0 && b.1 < a.1) {
                    Some(b)
                } else {
                    Some(a)
                }
            }
            (a, None) => a,
            (None, b) => b,
        };
        Self {
            best,
            feasible: self.feasible + other.feasible,
        }
    }
}

struct Guard {
    started: Instant,
    time_limit_ms: Option<u64>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Guard {
    /// Called before each chunk; `first_mask` is the chunk's first mask.
    fn check(&self, first_mask: u64) -> Result<()> {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(AllocError::Cancelled {
                    evaluated: first_mask,
                });
            }
        }
        if let Some(limit) = self.time_limit_ms {
            let elapsed_ms = self.started.elapsed().as_millis() as u64;
            if first_mask > 0 && elapsed_ms >= limit {
                return Err(AllocError::DeadlineExceeded {
                    elapsed_ms,
                    evaluated: first_mask,
                });
            }
        }
        Ok(())
    }
}

fn scan_sequential(enumeration: &Enumeration<'_>, total: u64, guard: &Guard) -> Result<ChunkBest> {
    let mut acc = ChunkBest::default();
    let mut start = 0u64;
    while start < total {
        guard.check(start)?;
        let end = (start + CHUNK_SIZE).min(total);
        acc = acc.merge(enumeration.scan(start..end));
        start = end;
    }
    Ok(acc)
}

#[cfg(feature = "parallel")]
fn scan_parallel(enumeration: &Enumeration<'_>, total: u64, guard: &Guard) -> Result<ChunkBest> {
    let chunks = total.div_ceil(CHUNK_SIZE);
    (0..chunks)
        .into_par_iter()
        .map(|c| {
            let start = c * CHUNK_SIZE;
            guard.check(start)?;
            let end = (start + CHUNK_SIZE).min(total);
            Ok(enumeration.scan(start..end))
        })
        .try_reduce(ChunkBest::default, |a, b| Ok(a.merge(b)))
}
