//! Reporting views over a leveled [`Allocation`](crate::leveling::Allocation).
//!
//! - [`ReportRow`]: one flat row per record with the full output field set.
//! - [`AllocationSummary`]: allocated and unmet totals plus a per-facility
//!   service line.
//!
//! Both are plain data; rendering to JSON or CSV is left to the caller
//! (enable the `serde` feature for derives).

mod rows;
mod summary;

pub use rows::{rows, sort_for_display, ReportRow};
pub use summary::{AllocationSummary, FacilityLine};
