//! Error taxonomy for the allocation core.
//!
//! Invalid input and empty batches are surfaced to the caller. A batch
//! whose constraints rule out every non-empty selection is *not* an error:
//! the empty selection is returned instead.

use thiserror::Error;

/// Errors produced by the allocation core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocError {
    /// A record violates the domain invariants (priority, risk, demand).
    #[error("invalid facility record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// The batch contains no records.
    #[error("batch contains no facility records")]
    EmptyBatch,

    /// No records exist for the requested slot.
    #[error("no facility records for slot {slot}")]
    EmptySlot { slot: u32 },

    /// The supply cap is negative or not finite.
    #[error("supply must be a finite, non-negative number of MW, got {0}")]
    InvalidSupply(f64),

    /// A configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The batch is too large for exhaustive enumeration.
    #[error("batch of {size} records exceeds the exact selector limit of {max}")]
    BatchTooLarge { size: usize, max: usize },

    /// The exact selector ran past its configured deadline.
    #[error("exact selection exceeded its deadline after {elapsed_ms} ms ({evaluated} candidates evaluated)")]
    DeadlineExceeded { elapsed_ms: u64, evaluated: u64 },

    /// The exact selector was cancelled through its cancellation flag.
    #[error("exact selection cancelled after {evaluated} candidates")]
    Cancelled { evaluated: u64 },

    /// Leveling allocated more than the supply cap.
    #[error("allocated {allocated_mw} MW exceeds supply of {supply_mw} MW")]
    CapacityExceeded { allocated_mw: f64, supply_mw: f64 },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AllocError>;

/// Rejects supply caps the core cannot reason about.
pub(crate) fn check_supply(supply_mw: f64) -> Result<()> {
    if supply_mw.is_finite() && supply_mw >= 0.0 {
        Ok(())
    } else {
        Err(AllocError::InvalidSupply(supply_mw))
    }
}
