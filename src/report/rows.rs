use crate::facility::FacilityType;
use crate::leveling::{AllocatedRecord, Allocation};
use std::cmp::Ordering;

/// One output row of a leveled batch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportRow {
    pub region: String,
    pub zone: String,
    pub facility_type: FacilityType,
    pub predicted_demand_mw: f64,
    pub priority_level: u8,
    pub outage_risk: f64,
    pub base_score: f64,
    pub decision_x: bool,
    pub allocation_level: f64,
    pub allocated_mw: f64,
    pub unmet_mw: f64,
    pub score: f64,
    /// Batch-wide aggregate, identical on every row of a batch.
    pub total_score: f64,
}

impl ReportRow {
    /// Flattens `record`, stamping the batch's `total_score`.
    pub fn new(record: &AllocatedRecord, total_score: f64) -> Self {
        let r = &record.record;
        Self {
            region: r.region.clone(),
            zone: r.zone.clone(),
            facility_type: r.facility_type.clone(),
            predicted_demand_mw: r.predicted_demand_mw,
            priority_level: r.priority_level,
            outage_risk: r.outage_risk,
            base_score: record.base_score,
            decision_x: record.decision_x,
            allocation_level: record.allocation_level,
            allocated_mw: record.allocated_mw,
            unmet_mw: record.unmet_mw,
            score: record.score(),
            total_score,
        }
    }
}

/// Rows of `allocation` in leveling order.
pub fn rows(allocation: &Allocation) -> Vec<ReportRow> {
    allocation
        .records
        .iter()
        .map(|r| ReportRow::new(r, allocation.total_score))
        .collect()
}

/// Stable sort by priority desc, then score desc.
pub fn sort_for_display(rows: &mut [ReportRow]) {
    rows.sort_by(|a, b| match b.priority_level.cmp(&a.priority_level) {
        Ordering::Equal => (b.score + 0.0).total_cmp(&(a.score + 0.0)),
        other => other,
    });
}
