use crate::facility::FacilityType;
use crate::leveling::Allocation;
use std::fmt;

/// Service line for one facility.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FacilityLine {
    pub region: String,
    pub facility_type: FacilityType,
    /// `allocation_level` as a whole percentage.
    pub percent: u32,
    pub allocated_mw: f64,
}

impl fmt::Display for FacilityLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} – {}: {}% ({:.2} MW)",
            self.region, self.facility_type, self.percent, self.allocated_mw
        )
    }
}

/// Totals and per-facility lines of a leveled batch.
///
/// ```
/// use u_gridalloc::facility::{Batch, FacilityRecord};
/// use u_gridalloc::leveling::PartialAllocationPolicy;
/// use u_gridalloc::report::AllocationSummary;
/// use u_gridalloc::score::ScoreModel;
/// use u_gridalloc::selection::Selection;
///
/// let batch = ScoreModel::default().score_batch(
///     &Batch::new(vec![FacilityRecord::new("Gaza", "A", "Water Pump", 8.0, 3, 0.0)]).unwrap(),
/// );
/// let alloc = PartialAllocationPolicy::default()
///     .allocate(&batch, &Selection::empty(1), 4.0)
///     .unwrap();
/// let summary = AllocationSummary::new(&alloc);
/// assert_eq!(summary.lines[0].to_string(), "Gaza – Water Pump: 50% (4.00 MW)");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationSummary {
    pub total_demand_mw: f64,
    pub allocated_mw: f64,
    /// Demand left unserved after leveling.
    pub unmet_mw: f64,
    pub lines: Vec<FacilityLine>,
}

impl AllocationSummary {
    pub fn new(allocation: &Allocation) -> Self {
        let total_demand_mw = allocation
            .records
            .iter()
            .map(|r| r.record.predicted_demand_mw)
            .sum::<f64>();
        let lines = allocation
            .records
            .iter()
            .map(|r| FacilityLine {
                region: r.record.region.clone(),
                facility_type: r.record.facility_type.clone(),
                percent: (r.allocation_level * 100.0) as u32,
                allocated_mw: r.allocated_mw,
            })
            .collect();
        Self {
            total_demand_mw,
            allocated_mw: allocation.allocated_mw,
            unmet_mw: total_demand_mw - allocation.allocated_mw,
            lines,
        }
    }

    /// One-sentence totals line.
    pub fn totals_line(&self) -> String {
        format!(
            "Allocated electricity is {:.2} MW. Remaining unmet demand is {:.2} MW.",
            self.allocated_mw, self.unmet_mw
        )
    }
}

impl fmt::Display for AllocationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.totals_line())?;
        for line in &self.lines {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::{Batch, FacilityRecord};
    use crate::leveling::PartialAllocationPolicy;
    use crate::score::ScoreModel;
    use crate::selection::Selection;

    #[test]
    fn test_scenario_summary() {
        let batch = ScoreModel::default().score_batch(
            &Batch::new(vec![
                FacilityRecord::new("Gaza", "A", "Emergency Center", 10.0, 3, 0.2),
                FacilityRecord::new("Gaza", "B", "Water Pump", 8.0, 3, 0.1),
                FacilityRecord::new("West Bank", "C", "Residential", 5.0, 1, 0.5),
            ])
            .unwrap(),
        );
        let alloc = PartialAllocationPolicy::default()
            .allocate(&batch, &Selection::from_decisions(vec![true, false, false]), 12.0)
            .unwrap();
        let summary = AllocationSummary::new(&alloc);

        assert!((summary.total_demand_mw - 23.0).abs() < 1e-10);
        assert!((summary.allocated_mw - 10.0).abs() < 1e-10);
        assert!((summary.unmet_mw - 13.0).abs() < 1e-10);
        assert_eq!(
            summary.totals_line(),
            "Allocated electricity is 10.00 MW. Remaining unmet demand is 13.00 MW."
        );
        let lines: Vec<String> = summary.lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "Gaza – Emergency Center: 100% (10.00 MW)",
                "Gaza – Water Pump: 0% (0.00 MW)",
                "West Bank – Residential: 0% (0.00 MW)",
            ]
        );
        assert_eq!(summary.to_string().lines().count(), 4);
    }
}
