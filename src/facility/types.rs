//! Facility record and batch types.

use crate::error::{AllocError, Result};
use std::fmt;
use std::str::FromStr;

/// Category of a facility.
///
/// The three known categories carry their own weights in the score model.
/// Anything else is kept verbatim as [`FacilityType::Other`] and scored
/// with the default weight.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum FacilityType {
    EmergencyCenter,
    WaterPump,
    Residential,
    Other(String),
}

impl FacilityType {
    /// The label used in input and report tables.
    pub fn label(&self) -> &str {
        match self {
            FacilityType::EmergencyCenter => "Emergency Center",
            FacilityType::WaterPump => "Water Pump",
            FacilityType::Residential => "Residential",
            FacilityType::Other(name) => name,
        }
    }
}

impl fmt::Display for FacilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for FacilityType {
    fn from(s: &str) -> Self {
        match s.trim() {
            "Emergency Center" => FacilityType::EmergencyCenter,
            "Water Pump" => FacilityType::WaterPump,
            "Residential" => FacilityType::Residential,
            other => FacilityType::Other(other.to_string()),
        }
    }
}

impl From<String> for FacilityType {
    fn from(s: String) -> Self {
        FacilityType::from(s.as_str())
    }
}

impl From<FacilityType> for String {
    fn from(t: FacilityType) -> Self {
        t.label().to_string()
    }
}

impl FromStr for FacilityType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(FacilityType::from(s))
    }
}

/// One facility's request for supply in a time slot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FacilityRecord {
    /// Slot identifier (hour). Only used to pick a batch; never scored.
    #[cfg_attr(feature = "serde", serde(rename = "hour", default))]
    pub slot: u32,
    pub region: String,
    /// Carried through to reports, not used in scoring.
    pub zone: String,
    pub facility_type: FacilityType,
    /// Requested megawatts, `>= 0`.
    pub predicted_demand_mw: f64,
    /// 1, 2 or 3; 3 is the highest priority.
    pub priority_level: u8,
    /// Probability-like risk in `[0, 1]`.
    pub outage_risk: f64,
}

impl FacilityRecord {
    /// Creates a record in slot 0.
    pub fn new(
        region: impl Into<String>,
        zone: impl Into<String>,
        facility_type: impl Into<FacilityType>,
        predicted_demand_mw: f64,
        priority_level: u8,
        outage_risk: f64,
    ) -> Self {
        Self {
            slot: 0,
            region: region.into(),
            zone: zone.into(),
            facility_type: facility_type.into(),
            predicted_demand_mw,
            priority_level,
            outage_risk,
        }
    }

    /// Sets the slot identifier.
    pub fn with_slot(mut self, slot: u32) -> Self {
        self.slot = slot;
        self
    }

    /// Checks the per-record domain invariants.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(1..=3).contains(&self.priority_level) {
            return Err(format!(
                "priority_level {} not in {{1, 2, 3}}",
                self.priority_level
            ));
        }
        if !(0.0..=1.0).contains(&self.outage_risk) {
            return Err(format!("outage_risk {} not in [0, 1]", self.outage_risk));
        }
        if !self.predicted_demand_mw.is_finite() || self.predicted_demand_mw < 0.0 {
            return Err(format!(
                "predicted_demand_mw {} must be finite and non-negative",
                self.predicted_demand_mw
            ));
        }
        Ok(())
    }
}

/// A validated, non-empty set of records for one time slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    records: Vec<FacilityRecord>,
}

impl Batch {
    /// Validates every record and wraps them into a batch.
    ///
    /// Fails on the first offending record; values are never clamped.
    pub fn new(records: Vec<FacilityRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(AllocError::EmptyBatch);
        }
        for (index, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|reason| AllocError::InvalidRecord { index, reason })?;
        }
        Ok(Self { records })
    }

    /// The records, in input order.
    pub fn records(&self) -> &[FacilityRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`; batches are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of predicted demand over the batch.
    pub fn total_demand_mw(&self) -> f64 {
        self.records.iter().map(|r| r.predicted_demand_mw).sum()
    }

    /// Consumes the batch, returning its records.
    pub fn into_records(self) -> Vec<FacilityRecord> {
        self.records
    }
}
