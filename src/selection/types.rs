//! Decision vectors and the selector contract.

use crate::error::Result;
use crate::score::ScoredBatch;

/// A decision vector: one include/exclude bit per record of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    decisions: Vec<bool>,
}

impl Selection {
    /// The selection that includes nothing.
    pub fn empty(len: usize) -> Self {
        Self {
            decisions: vec![false; len],
        }
    }

    /// Builds a selection from a decision vector.
    pub fn from_decisions(decisions: Vec<bool>) -> Self {
        Self { decisions }
    }

    /// Builds a selection from a bitmask; bit `i` is record `i`.
    ///
    /// `len` must not exceed 64.
    pub fn from_mask(mask: u64, len: usize) -> Self {
        debug_assert!(len <= 64);
        Self {
            decisions: (0..len).map(|i| (mask >> i) & 1 == 1).collect(),
        }
    }

    /// The bitmask form, if the selection fits in 64 bits.
    pub fn to_mask(&self) -> Option<u64> {
        if self.decisions.len() > 64 {
            return None;
        }
        Some(
            self.decisions
                .iter()
                .enumerate()
                .filter(|(_, d)| **d)
                .fold(0u64, |mask, (i, _)| mask | (1u64 << i)),
        )
    }

    /// Whether record `index` is included.
    pub fn contains(&self, index: usize) -> bool {
        self.decisions.get(index).copied().unwrap_or(false)
    }

    /// Includes record `index`.
    pub fn insert(&mut self, index: usize) {
        self.decisions[index] = true;
    }

    /// The decision vector.
    pub fn decisions(&self) -> &[bool] {
        &self.decisions
    }

    /// Indices of included records, ascending.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.decisions
            .iter()
            .enumerate()
            .filter_map(|(i, &d)| d.then_some(i))
    }

    /// Number of records covered (included or not).
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    /// Whether the selection covers no records at all.
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Number of included records.
    pub fn count(&self) -> usize {
        self.decisions.iter().filter(|&&d| d).count()
    }

    /// Total demand of included records.
    pub fn demand_mw(&self, batch: &ScoredBatch) -> f64 {
        self.indices().map(|i| batch.demand(i)).sum()
    }

    /// Total base score of included records.
    pub fn score(&self, batch: &ScoredBatch) -> f64 {
        self.indices().map(|i| batch.base_score(i)).sum()
    }
}

/// How a selector arrived at its selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionStatus {
    /// Proven best feasible selection (exhaustive search).
    Optimal,
    /// Feasible by capacity, with no optimality or fairness guarantee.
    Heuristic,
    /// No candidate passed the constraints; the empty selection is returned.
    EmptyFallback,
}

/// Result of running a [`Selector`] on a batch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionOutcome {
    /// The chosen decision vector.
    pub selection: Selection,

    /// Sum of base scores over selected records.
    pub score: f64,

    /// Total demand of selected records.
    pub demand_mw: f64,

    /// How the selection was obtained.
    pub status: SelectionStatus,

    /// Candidate selections examined (records considered, for greedy).
    pub evaluated: u64,

    /// Candidates that passed capacity and constraint checks (records
    /// admitted, for greedy).
    pub feasible: u64,

    /// Wall-clock time spent selecting, in milliseconds.
    pub elapsed_ms: u64,
}

impl SelectionOutcome {
    /// Whether the selector fell back to the empty selection.
    pub fn is_fallback(&self) -> bool {
        self.status == SelectionStatus::EmptyFallback
    }
}

/// Picks a binary selection of records under a supply cap.
///
/// Implementors are pure with respect to their inputs: the same batch and
/// supply always produce the same outcome (timing fields aside).
pub trait Selector {
    /// Returns the name of this selector.
    fn name(&self) -> &str;

    /// Selects records of `batch` whose total demand fits in `supply_mw`.
    fn select(&self, batch: &ScoredBatch, supply_mw: f64) -> Result<SelectionOutcome>;
}
