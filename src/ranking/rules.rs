//! Built-in rules over facility records of a scored batch.

use super::engine::Ranker;
use super::types::RankRule;
use crate::score::ScoredBatch;
use crate::selection::Selection;

/// Context for ranking record indices of one batch.
pub struct RankContext<'a> {
    pub batch: &'a ScoredBatch,
    pub selection: Option<&'a Selection>,
}

/// `priority_level` descending.
pub struct HigherPriority;

impl RankRule<RankContext<'_>> for HigherPriority {
    fn name(&self) -> &str {
        "HigherPriority"
    }

    fn key(&self, index: usize, ctx: &RankContext<'_>) -> f64 {
        -f64::from(ctx.batch.records()[index].priority_level)
    }
}

/// `base_score` descending.
pub struct HigherScore;

impl RankRule<RankContext<'_>> for HigherScore {
    fn name(&self) -> &str {
        "HigherScore"
    }

    fn key(&self, index: usize, ctx: &RankContext<'_>) -> f64 {
        -ctx.batch.base_score(index)
    }
}

/// Selected records before unselected ones. Without a selection every
/// record ties.
pub struct SelectedFirst;

impl RankRule<RankContext<'_>> for SelectedFirst {
    fn name(&self) -> &str {
        "SelectedFirst"
    }

    fn key(&self, index: usize, ctx: &RankContext<'_>) -> f64 {
        match ctx.selection {
            Some(sel) if sel.contains(index) => 0.0,
            Some(_) => 1.0,
            None => 0.0,
        }
    }
}

/// Record indices by priority desc, then base score desc; stable.
pub fn priority_order(batch: &ScoredBatch) -> Vec<usize> {
    let ctx = RankContext {
        batch,
        selection: None,
    };
    Ranker::new()
        .then(HigherPriority)
        .then(HigherScore)
        .rank(batch.len(), &ctx)
}

/// Record indices with selected records first, then priority order; stable.
pub fn selection_order(batch: &ScoredBatch, selection: &Selection) -> Vec<usize> {
    let ctx = RankContext {
        batch,
        selection: Some(selection),
    };
    Ranker::new()
        .then(SelectedFirst)
        .then(HigherPriority)
        .then(HigherScore)
        .rank(batch.len(), &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::{Batch, FacilityRecord};
    use crate::score::ScoreModel;

    fn batch() -> ScoredBatch {
        ScoreModel::default().score_batch(
            &Batch::new(vec![
                FacilityRecord::new("Gaza", "a", "Residential", 5.0, 1, 0.5),
                FacilityRecord::new("Gaza", "b", "Water Pump", 8.0, 3, 0.1),
                FacilityRecord::new("Gaza", "c", "Emergency Center", 10.0, 3, 0.2),
                FacilityRecord::new("Gaza", "d", "Residential", 20.0, 2, 0.0),
                FacilityRecord::new("Gaza", "e", "Residential", 5.0, 1, 0.5),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_priority_order() {
        // c (81.0) and b (45.6) at priority 3, then d, then the tied a/e.
        assert_eq!(priority_order(&batch()), vec![2, 1, 3, 0, 4]);
    }

    #[test]
    fn test_zero_demand_sign_does_not_reorder() {
        // A demand of -0.0 scores -0.0; it must still tie with a plain zero.
        let b = ScoreModel::default().score_batch(
            &Batch::new(vec![
                FacilityRecord::new("Gaza", "a", "Residential", -0.0, 2, 0.0),
                FacilityRecord::new("Gaza", "b", "Residential", 0.0, 2, 0.0),
            ])
            .unwrap(),
        );
        assert!(b.base_score(0).is_sign_negative());
        assert_eq!(priority_order(&b), vec![0, 1]);
    }

    #[test]
    fn test_selection_order_puts_selected_first() {
        let sel = Selection::from_decisions(vec![true, false, false, false, true]);
        assert_eq!(selection_order(&batch(), &sel), vec![0, 4, 2, 1, 3]);
    }

    #[test]
    fn test_selection_order_with_empty_selection_is_priority_order() {
        let b = batch();
        assert_eq!(
            selection_order(&b, &Selection::empty(b.len())),
            priority_order(&b)
        );
    }
}
