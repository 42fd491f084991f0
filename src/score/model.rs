//! Score model and scored batches.

use super::config::WeightTable;
use crate::error::{AllocError, Result};
use crate::facility::{Batch, FacilityRecord};

/// Confidence multiplier for an outage risk in `[0, 1]`.
///
/// Maps risk 0 to 1.0 and risk 1 to 0.5, decreasing linearly.
#[inline]
pub fn risk_factor(outage_risk: f64) -> f64 {
    0.5 + 0.5 * (1.0 - outage_risk)
}

/// Pure scoring function parameterized by a [`WeightTable`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreModel {
    weights: WeightTable,
}

impl ScoreModel {
    /// Creates a model with the given weights.
    pub fn new(weights: WeightTable) -> Result<Self> {
        weights.validate().map_err(AllocError::InvalidConfig)?;
        Ok(Self { weights })
    }

    /// The injected weight table.
    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Priority-weighted, risk-adjusted demand score of one record.
    pub fn base_score(&self, record: &FacilityRecord) -> f64 {
        f64::from(record.priority_level)
            * self.weights.weight(&record.facility_type)
            * record.predicted_demand_mw
            * risk_factor(record.outage_risk)
    }

    /// Attaches a base score to every record of `batch`.
    pub fn score_batch(&self, batch: &Batch) -> ScoredBatch {
        let base_scores = batch
            .records()
            .iter()
            .map(|r| self.base_score(r))
            .collect();
        ScoredBatch {
            batch: batch.clone(),
            base_scores,
        }
    }
}

/// A batch together with the base score of each record.
///
/// `base_scores[i]` belongs to `records()[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredBatch {
    batch: Batch,
    base_scores: Vec<f64>,
}

impl ScoredBatch {
    /// The underlying batch.
    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    /// The records, in input order.
    pub fn records(&self) -> &[FacilityRecord] {
        self.batch.records()
    }

    /// Base scores, parallel to [`records`](Self::records).
    pub fn base_scores(&self) -> &[f64] {
        &self.base_scores
    }

    /// Base score of record `index`.
    pub fn base_score(&self, index: usize) -> f64 {
        self.base_scores[index]
    }

    /// Demand of record `index`.
    pub fn demand(&self, index: usize) -> f64 {
        self.batch.records()[index].predicted_demand_mw
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.batch.len()
    }

    /// Always `false`; see [`Batch::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::FacilityType;

    fn scenario() -> Batch {
        Batch::new(vec![
            FacilityRecord::new("Gaza", "A", "Emergency Center", 10.0, 3, 0.2),
            FacilityRecord::new("Gaza", "B", "Water Pump", 8.0, 3, 0.1),
            FacilityRecord::new("Gaza", "C", "Residential", 5.0, 1, 0.5),
        ])
        .unwrap()
    }

    #[test]
    fn test_risk_factor_bounds() {
        assert!((risk_factor(0.0) - 1.0).abs() < 1e-12);
        assert!((risk_factor(1.0) - 0.5).abs() < 1e-12);
        assert!((risk_factor(0.5) - 0.75).abs() < 1e-12);
        assert!(risk_factor(0.3) > risk_factor(0.4));
    }

    #[test]
    fn test_scenario_scores() {
        let scored = ScoreModel::default().score_batch(&scenario());
        assert!((scored.base_score(0) - 81.0).abs() < 1e-10);
        assert!((scored.base_score(1) - 45.6).abs() < 1e-10);
        assert!((scored.base_score(2) - 3.75).abs() < 1e-10);
    }

    #[test]
    fn test_unknown_type_uses_default_weight() {
        let model = ScoreModel::default();
        let record = FacilityRecord::new("X", "Z", "Bakery", 4.0, 2, 0.0);
        assert!((model.base_score(&record) - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let model = ScoreModel::default();
        let record = FacilityRecord::new("Gaza", "Z", "Water Pump", 7.3, 2, 0.37);
        assert_eq!(
            model.base_score(&record).to_bits(),
            model.base_score(&record).to_bits()
        );
    }

    #[test]
    fn test_injected_weights() {
        let weights = WeightTable::default().with_weight(FacilityType::Residential, 4.0);
        let model = ScoreModel::new(weights).unwrap();
        let scored = model.score_batch(&scenario());
        assert!((scored.base_score(2) - 15.0).abs() < 1e-10);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let weights = WeightTable::default().with_default_weight(-2.0);
        assert!(matches!(
            ScoreModel::new(weights),
            Err(AllocError::InvalidConfig(_))
        ));
    }
}
