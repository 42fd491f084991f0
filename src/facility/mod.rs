//! Facility records and validated batches.
//!
//! A [`Batch`] is the set of facility records competing for supply in one
//! time slot. It is validated once on construction and is immutable
//! afterwards; every later stage produces a derived view instead of
//! mutating it.

mod types;

pub use types::{Batch, FacilityRecord, FacilityType};
