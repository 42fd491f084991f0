//! Two-region coverage predicate.

use super::types::{RegionPair, SelectionConstraint};
use crate::facility::{FacilityRecord, FacilityType};
use crate::score::ScoredBatch;
use crate::selection::Selection;

/// Requires a selected qualifying record in each of two regions whenever
/// both regions have one to select.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionalCoverage {
    name: String,
    regions: RegionPair,
    types: Vec<FacilityType>,
    priority_level: u8,
}

impl RegionalCoverage {
    /// Creates a coverage rule over the given qualifying types and priority.
    pub fn new(
        name: impl Into<String>,
        regions: RegionPair,
        types: Vec<FacilityType>,
        priority_level: u8,
    ) -> Self {
        Self {
            name: name.into(),
            regions,
            types,
            priority_level,
        }
    }

    /// Fairness: priority-3 Emergency Centers and Water Pumps.
    pub fn fairness(regions: RegionPair) -> Self {
        Self::new(
            "fairness",
            regions,
            vec![FacilityType::EmergencyCenter, FacilityType::WaterPump],
            3,
        )
    }

    /// Pump-region: priority-3 Water Pumps only.
    pub fn pump_region(regions: RegionPair) -> Self {
        Self::new("pump_region", regions, vec![FacilityType::WaterPump], 3)
    }

    /// Replaces the qualifying type set.
    pub fn with_types(mut self, types: Vec<FacilityType>) -> Self {
        self.types = types;
        self
    }

    /// The regions this rule balances.
    pub fn regions(&self) -> &RegionPair {
        &self.regions
    }

    /// Whether `record` can satisfy this rule for its region.
    pub fn qualifies(&self, record: &FacilityRecord) -> bool {
        record.priority_level == self.priority_level && self.types.contains(&record.facility_type)
    }

    /// Qualifying records of `batch` per region, as bitmasks.
    ///
    /// The batch must have at most 64 records.
    pub fn compile(&self, batch: &ScoredBatch) -> CoverageMask {
        debug_assert!(batch.len() <= 64);
        let mut first = 0u64;
        let mut second = 0u64;
        for (i, record) in batch.records().iter().enumerate() {
            if !self.qualifies(record) {
                continue;
            }
            if record.region == self.regions.first {
                first |= 1 << i;
            } else if record.region == self.regions.second {
                second |= 1 << i;
            }
        }
        CoverageMask { first, second }
    }

    /// Whether both regions contain at least one qualifying record.
    pub fn is_active(&self, batch: &ScoredBatch) -> bool {
        let in_region = |region: &str| {
            batch
                .records()
                .iter()
                .any(|r| r.region == region && self.qualifies(r))
        };
        in_region(&self.regions.first) && in_region(&self.regions.second)
    }
}

impl SelectionConstraint for RegionalCoverage {
    fn name(&self) -> &str {
        &self.name
    }

    /// A selection sized for a different batch never satisfies the rule.
    fn is_satisfied(&self, batch: &ScoredBatch, selection: &Selection) -> bool {
        if selection.len() != batch.len() {
            return false;
        }
        if !self.is_active(batch) {
            return true;
        }
        let covered = |region: &str| {
            selection.indices().any(|i| {
                let r = &batch.records()[i];
                r.region == region && self.qualifies(r)
            })
        };
        covered(&self.regions.first) && covered(&self.regions.second)
    }
}

/// Bitmask form of a [`RegionalCoverage`] bound to one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageMask {
    /// Qualifying records in the first region.
    pub first: u64,
    /// Qualifying records in the second region.
    pub second: u64,
}

impl CoverageMask {
    /// Whether the rule constrains anything on this batch.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.first != 0 && self.second != 0
    }

    /// Whether the selection `mask` satisfies the rule.
    #[inline]
    pub fn allows(&self, mask: u64) -> bool {
        !self.is_active() || (mask & self.first != 0 && mask & self.second != 0)
    }
}
