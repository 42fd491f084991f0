//! Region pairs and the constraint trait.

use crate::score::ScoredBatch;
use crate::selection::Selection;

/// The two regions a coverage rule balances.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionPair {
    pub first: String,
    pub second: String,
}

impl RegionPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Validates the pair.
    pub fn validate(&self) -> Result<(), String> {
        if self.first.trim().is_empty() || self.second.trim().is_empty() {
            return Err("region names must not be empty".into());
        }
        if self.first == self.second {
            return Err(format!("region pair must name two regions, got {:?} twice", self.first));
        }
        Ok(())
    }
}

impl Default for RegionPair {
    fn default() -> Self {
        Self::new("Gaza", "West Bank")
    }
}

/// A feasibility predicate over (batch, selection).
///
/// Implementations must be pure: the same batch and selection always give
/// the same answer.
pub trait SelectionConstraint: Send + Sync {
    /// Returns the name of this constraint.
    fn name(&self) -> &str;

    /// Whether `selection` satisfies the constraint on `batch`.
    fn is_satisfied(&self, batch: &ScoredBatch, selection: &Selection) -> bool;
}
