//! Level assignment over an ordered walk.

use super::config::{LevelingConfig, LevelingOrder, LEVELS};
use crate::error::{check_supply, AllocError, Result};
use crate::facility::FacilityRecord;
use crate::ranking::{priority_order, selection_order};
use crate::score::ScoredBatch;
use crate::selection::Selection;
use tracing::{debug, trace};

/// One record's graded allocation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocatedRecord {
    /// Position of the record in its batch.
    pub index: usize,
    pub record: FacilityRecord,
    pub base_score: f64,
    /// Whether the upstream selector included this record.
    pub decision_x: bool,
    /// One of [`LEVELS`].
    pub allocation_level: f64,
    pub allocated_mw: f64,
    pub unmet_mw: f64,
}

impl AllocatedRecord {
    /// Reported per-record score (the base score).
    pub fn score(&self) -> f64 {
        self.base_score
    }

    /// Whether any supply reached this record.
    pub fn is_served(&self) -> bool {
        self.allocated_mw > 0.0
    }
}

/// Leveled allocation of one batch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation {
    /// Records in the order they were leveled.
    pub records: Vec<AllocatedRecord>,
    pub supply_mw: f64,
    /// `Σ allocated_mw`.
    pub allocated_mw: f64,
    /// `Σ unmet_mw`.
    pub unmet_mw: f64,
    /// `Σ base_score × allocation_level`, a batch-wide aggregate.
    pub total_score: f64,
}

impl Allocation {
    /// Records that received any supply.
    pub fn served_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_served()).count()
    }

    /// Supply left over after leveling.
    pub fn remaining_supply_mw(&self) -> f64 {
        (self.supply_mw - self.allocated_mw).max(0.0)
    }

    /// The record at batch position `index`, if present.
    pub fn get(&self, index: usize) -> Option<&AllocatedRecord> {
        self.records.iter().find(|r| r.index == index)
    }
}

/// Assigns each record a level from [`LEVELS`] under a supply cap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialAllocationPolicy {
    config: LevelingConfig,
}

impl PartialAllocationPolicy {
    pub fn new(config: LevelingConfig) -> Result<Self> {
        config.validate().map_err(AllocError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LevelingConfig {
        &self.config
    }

    /// Levels `batch` in the configured order for `selection`.
    pub fn allocate(
        &self,
        batch: &ScoredBatch,
        selection: &Selection,
        supply_mw: f64,
    ) -> Result<Allocation> {
        let order = match self.config.order {
            LevelingOrder::SelectionFirst => selection_order(batch, selection),
            LevelingOrder::PriorityOnly => priority_order(batch),
        };
        self.allocate_in_order(batch, &order, selection, supply_mw)
    }

    /// Levels `batch` walking the record positions in `order`.
    ///
    /// `order` must be a permutation of `0..batch.len()`.
    pub fn allocate_in_order(
        &self,
        batch: &ScoredBatch,
        order: &[usize],
        selection: &Selection,
        supply_mw: f64,
    ) -> Result<Allocation> {
        check_supply(supply_mw)?;
        check_permutation(order, batch.len())?;

        let eps = self.config.epsilon;
        let (allocated_mw, records) = order.iter().fold(
            (0.0_f64, Vec::with_capacity(order.len())),
            |(used, mut out), &i| {
                let record = &batch.records()[i];
                let demand = record.predicted_demand_mw;
                let remaining = supply_mw - used;
                let level = LEVELS
                    .into_iter()
                    .find(|&l| l * demand <= remaining + eps)
                    .unwrap_or(0.0);
                let allocated = level * demand;
                trace!(record = i, demand, remaining, level, "leveled");
                out.push(AllocatedRecord {
                    index: i,
                    record: record.clone(),
                    base_score: batch.base_score(i),
                    decision_x: selection.contains(i),
                    allocation_level: level,
                    allocated_mw: allocated,
                    unmet_mw: demand - allocated,
                });
                (used + allocated, out)
            },
        );

        if allocated_mw > supply_mw + self.config.post_tolerance {
            return Err(AllocError::CapacityExceeded {
                allocated_mw,
                supply_mw,
            });
        }

        let total_score = records
            .iter()
            .map(|r| r.base_score * r.allocation_level)
            .sum();
        let unmet_mw = records.iter().map(|r| r.unmet_mw).sum();

        let allocation = Allocation {
            records,
            supply_mw,
            allocated_mw,
            unmet_mw,
            total_score,
        };
        debug!(
            records = allocation.records.len(),
            served = allocation.served_count(),
            supply_mw,
            allocated_mw,
            total_score,
            "leveling finished"
        );
        Ok(allocation)
    }
}

fn check_permutation(order: &[usize], len: usize) -> Result<()> {
    let mut seen = vec![false; len];
    let valid = order.len() == len
        && order
            .iter()
            .all(|&i| i < len && !std::mem::replace(&mut seen[i], true));
    if valid {
        Ok(())
    } else {
        Err(AllocError::InvalidConfig(format!(
            "leveling order must be a permutation of 0..{len}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::{Batch, FacilityRecord};
    use crate::score::ScoreModel;

    fn scored(records: Vec<FacilityRecord>) -> ScoredBatch {
        ScoreModel::default().score_batch(&Batch::new(records).unwrap())
    }

    fn scenario() -> ScoredBatch {
        scored(vec![
            FacilityRecord::new("Gaza", "A", "Emergency Center", 10.0, 3, 0.2),
            FacilityRecord::new("Gaza", "B", "Water Pump", 8.0, 3, 0.1),
            FacilityRecord::new("Gaza", "C", "Residential", 5.0, 1, 0.5),
        ])
    }

    #[test]
    fn test_scenario_levels() {
        let batch = scenario();
        let selection = Selection::from_decisions(vec![true, false, false]);
        let alloc = PartialAllocationPolicy::default()
            .allocate(&batch, &selection, 12.0)
            .unwrap();

        let order: Vec<usize> = alloc.records.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![0, 1, 2]);

        let a = alloc.get(0).unwrap();
        assert_eq!(a.allocation_level, 1.0);
        assert!((a.allocated_mw - 10.0).abs() < 1e-10);
        assert!(a.unmet_mw.abs() < 1e-10);
        assert!(a.decision_x);

        let b = alloc.get(1).unwrap();
        assert_eq!(b.allocation_level, 0.0);
        assert!((b.unmet_mw - 8.0).abs() < 1e-10);

        let c = alloc.get(2).unwrap();
        assert_eq!(c.allocation_level, 0.0);
        assert!((c.unmet_mw - 5.0).abs() < 1e-10);

        assert!((alloc.allocated_mw - 10.0).abs() < 1e-10);
        assert!((alloc.total_score - 81.0).abs() < 1e-10);
        assert_eq!(alloc.served_count(), 1);
        assert!((alloc.remaining_supply_mw() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_half_level() {
        let batch = scored(vec![
            FacilityRecord::new("Gaza", "A", "Emergency Center", 10.0, 3, 0.0),
            FacilityRecord::new("Gaza", "B", "Water Pump", 8.0, 3, 0.0),
        ]);
        let alloc = PartialAllocationPolicy::default()
            .allocate(&batch, &Selection::from_mask(0b11, 2), 14.0)
            .unwrap();
        let b = alloc.get(1).unwrap();
        assert_eq!(b.allocation_level, 0.5);
        assert!((b.allocated_mw - 4.0).abs() < 1e-10);
        assert!((b.unmet_mw - 4.0).abs() < 1e-10);
        // 90 × 1.0 + 48 × 0.5
        assert!((alloc.total_score - 114.0).abs() < 1e-10);
    }

    #[test]
    fn test_selection_first_order_serves_selected() {
        let batch = scenario();
        // Only C selected: it is leveled first and fully served.
        let selection = Selection::from_decisions(vec![false, false, true]);
        let policy = PartialAllocationPolicy::new(
            LevelingConfig::default().with_order(LevelingOrder::SelectionFirst),
        )
        .unwrap();
        let alloc = policy.allocate(&batch, &selection, 12.0).unwrap();
        let order: Vec<usize> = alloc.records.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![2, 0, 1]);
        assert_eq!(alloc.get(2).unwrap().allocation_level, 1.0);
        // A: 10 > 7, 5 <= 7 -> half.
        assert_eq!(alloc.get(0).unwrap().allocation_level, 0.5);
        // B: remaining 2, 4 > 2 -> none.
        assert_eq!(alloc.get(1).unwrap().allocation_level, 0.0);
    }

    #[test]
    fn test_default_order_ignores_selection() {
        let batch = scenario();
        let selection = Selection::from_decisions(vec![false, false, true]);
        let alloc = PartialAllocationPolicy::default()
            .allocate(&batch, &selection, 12.0)
            .unwrap();
        let order: Vec<usize> = alloc.records.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert!(alloc.get(2).unwrap().decision_x);
        assert_eq!(alloc.get(2).unwrap().allocation_level, 0.0);
    }

    #[test]
    fn test_zero_demand_always_full() {
        let batch = scored(vec![FacilityRecord::new(
            "Gaza", "Z", "Residential", 0.0, 1, 0.0,
        )]);
        let alloc = PartialAllocationPolicy::default()
            .allocate(&batch, &Selection::empty(1), 0.0)
            .unwrap();
        assert_eq!(alloc.records[0].allocation_level, 1.0);
        assert_eq!(alloc.served_count(), 0);
    }

    #[test]
    fn test_rejects_bad_order() {
        let batch = scenario();
        let policy = PartialAllocationPolicy::default();
        let sel = Selection::empty(3);
        assert!(policy.allocate_in_order(&batch, &[0, 1], &sel, 5.0).is_err());
        assert!(policy
            .allocate_in_order(&batch, &[0, 1, 1], &sel, 5.0)
            .is_err());
        assert!(policy
            .allocate_in_order(&batch, &[0, 1, 3], &sel, 5.0)
            .is_err());
        assert!(policy
            .allocate_in_order(&batch, &[2, 1, 0], &sel, 5.0)
            .is_ok());
    }
}
