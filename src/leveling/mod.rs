//! Partial allocation leveling.
//!
//! Converts a binary selection into graded service levels. Records are
//! walked in a fixed order; each gets the largest level in
//! [`LEVELS`] (`1.0`, `0.5`, `0.0`) whose share of its demand still fits in
//! the remaining supply (with `ε` slack). Level `0.0` always fits, so every
//! record gets a level.
//!
//! ```text
//! allocated_mw = level × demand
//! unmet_mw     = demand − allocated_mw
//! total_score  = Σ base_score × level
//! ```
//!
//! The walk is a fold carrying `(used_mw, emitted_records)`. By default
//! the walk follows priority order and does not consult the selection;
//! [`LevelingOrder::SelectionFirst`] moves selected records to the front.

mod config;
mod policy;

pub use config::{LevelingConfig, LevelingOrder, LEVELS};
pub use policy::{AllocatedRecord, Allocation, PartialAllocationPolicy};
