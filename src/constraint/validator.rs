//! Bundled fairness and pump-region checks.

use super::coverage::{CoverageMask, RegionalCoverage};
use super::types::{RegionPair, SelectionConstraint};
use crate::score::ScoredBatch;
use crate::selection::Selection;

/// Evaluates the enabled regional constraints against a selection.
///
/// # Examples
///
/// ```
/// use u_gridalloc::constraint::{ConstraintValidator, RegionPair};
///
/// let validator = ConstraintValidator::new(RegionPair::default())
///     .with_pump_region(true);
/// assert_eq!(validator.active_names(), vec!["fairness", "pump_region"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintValidator {
    fairness: Option<RegionalCoverage>,
    pump_region: Option<RegionalCoverage>,
}

impl ConstraintValidator {
    /// Fairness enabled, pump-region disabled.
    pub fn new(regions: RegionPair) -> Self {
        Self {
            fairness: Some(RegionalCoverage::fairness(regions)),
            pump_region: None,
        }
    }

    /// No constraints at all.
    pub fn unconstrained() -> Self {
        Self {
            fairness: None,
            pump_region: None,
        }
    }

    /// Builds a validator from on/off flags over one region pair.
    pub fn from_flags(regions: RegionPair, fairness: bool, pump_region: bool) -> Self {
        Self {
            pump_region: pump_region.then(|| RegionalCoverage::pump_region(regions.clone())),
            fairness: fairness.then(|| RegionalCoverage::fairness(regions)),
        }
    }

    /// Enables or disables the fairness rule.
    pub fn with_fairness(mut self, enabled: bool, regions: RegionPair) -> Self {
        self.fairness = enabled.then(|| RegionalCoverage::fairness(regions));
        self
    }

    /// Enables or disables the pump-region rule over the fairness regions
    /// (or the default pair when fairness is off).
    pub fn with_pump_region(mut self, enabled: bool) -> Self {
        let regions = self
            .fairness
            .as_ref()
            .map(|f| f.regions().clone())
            .unwrap_or_default();
        self.pump_region = enabled.then(|| RegionalCoverage::pump_region(regions));
        self
    }

    /// Replaces the fairness rule with a custom one.
    pub fn with_fairness_rule(mut self, rule: RegionalCoverage) -> Self {
        self.fairness = Some(rule);
        self
    }

    /// Names of the enabled rules, fairness first.
    pub fn active_names(&self) -> Vec<&str> {
        self.rules().map(|r| r.name()).collect()
    }

    fn rules(&self) -> impl Iterator<Item = &RegionalCoverage> {
        self.fairness.iter().chain(self.pump_region.iter())
    }

    /// Fairness predicate; `true` when disabled.
    pub fn fairness_ok(&self, batch: &ScoredBatch, selection: &Selection) -> bool {
        self.fairness
            .as_ref()
            .map_or(true, |rule| rule.is_satisfied(batch, selection))
    }

    /// Pump-region predicate; `true` when disabled.
    pub fn pump_region_ok(&self, batch: &ScoredBatch, selection: &Selection) -> bool {
        self.pump_region
            .as_ref()
            .map_or(true, |rule| rule.is_satisfied(batch, selection))
    }

    /// Whether every enabled rule holds.
    pub fn is_feasible(&self, batch: &ScoredBatch, selection: &Selection) -> bool {
        self.fairness_ok(batch, selection) && self.pump_region_ok(batch, selection)
    }

    /// Binds the enabled rules to `batch` as bitmask checks.
    ///
    /// Rules that are vacuous on this batch are dropped.
    pub fn compile(&self, batch: &ScoredBatch) -> CompiledValidator {
        let masks = self
            .rules()
            .map(|rule| rule.compile(batch))
            .filter(CoverageMask::is_active)
            .collect();
        CompiledValidator { masks }
    }
}

impl Default for ConstraintValidator {
    fn default() -> Self {
        Self::new(RegionPair::default())
    }
}

/// A [`ConstraintValidator`] bound to one batch, checking raw bitmasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledValidator {
    masks: Vec<CoverageMask>,
}

impl CompiledValidator {
    /// Whether the selection `mask` satisfies every bound rule.
    #[inline]
    pub fn allows(&self, mask: u64) -> bool {
        self.masks.iter().all(|m| m.allows(mask))
    }

    /// Number of rules that actually constrain this batch.
    pub fn active_rules(&self) -> usize {
        self.masks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::{Batch, FacilityRecord};
    use crate::score::ScoreModel;

    fn batch() -> ScoredBatch {
        ScoreModel::default().score_batch(
            &Batch::new(vec![
                FacilityRecord::new("Gaza", "G1", "Water Pump", 5.0, 3, 0.1),
                FacilityRecord::new("West Bank", "W1", "Water Pump", 4.0, 3, 0.2),
                FacilityRecord::new("Gaza", "G2", "Emergency Center", 3.0, 3, 0.0),
                FacilityRecord::new("West Bank", "W2", "Emergency Center", 6.0, 3, 0.0),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_default_enables_fairness_only() {
        let v = ConstraintValidator::default();
        assert_eq!(v.active_names(), vec!["fairness"]);
        let b = batch();
        // Emergency centers in both regions satisfy fairness.
        let sel = Selection::from_mask(0b1100, 4);
        assert!(v.fairness_ok(&b, &sel));
        assert!(v.pump_region_ok(&b, &sel));
        assert!(v.is_feasible(&b, &sel));
    }

    #[test]
    fn test_pump_region_narrower_than_fairness() {
        let v = ConstraintValidator::default().with_pump_region(true);
        let b = batch();
        let centers_only = Selection::from_mask(0b1100, 4);
        assert!(v.fairness_ok(&b, &centers_only));
        assert!(!v.pump_region_ok(&b, &centers_only));
        assert!(!v.is_feasible(&b, &centers_only));
        assert!(v.is_feasible(&b, &Selection::from_mask(0b0011, 4)));
    }

    #[test]
    fn test_with_fairness_toggles_rule() {
        let b = batch();
        let pumps_only = Selection::from_mask(0b0010, 4);

        let off = ConstraintValidator::default().with_fairness(false, RegionPair::default());
        assert!(off.active_names().is_empty());
        assert!(off.fairness_ok(&b, &pumps_only));

        let on = off.with_fairness(true, RegionPair::default());
        assert_eq!(on.active_names(), vec!["fairness"]);
        assert!(!on.fairness_ok(&b, &pumps_only));

        let elsewhere = ConstraintValidator::unconstrained()
            .with_fairness(true, RegionPair::new("North", "South"));
        assert_eq!(elsewhere.compile(&b).active_rules(), 0);
        assert!(elsewhere.fairness_ok(&b, &pumps_only));
    }

    #[test]
    fn test_mismatched_selection_is_infeasible() {
        let v = ConstraintValidator::default();
        assert!(!v.is_feasible(&batch(), &Selection::from_mask(0b1100, 6)));
    }

    #[test]
    fn test_unconstrained_accepts_everything() {
        let v = ConstraintValidator::unconstrained();
        let b = batch();
        assert!(v.active_names().is_empty());
        assert!(v.is_feasible(&b, &Selection::empty(4)));
        assert_eq!(v.compile(&b).active_rules(), 0);
    }

    #[test]
    fn test_compiled_agrees_with_predicates() {
        let v = ConstraintValidator::default().with_pump_region(true);
        let b = batch();
        let compiled = v.compile(&b);
        assert_eq!(compiled.active_rules(), 2);
        for mask in 0..16u64 {
            assert_eq!(
                compiled.allows(mask),
                v.is_feasible(&b, &Selection::from_mask(mask, 4)),
                "mask {mask:04b}"
            );
        }
    }
}
