//! Exhaustive (exact) selection.
//!
//! Enumerates every one of the 2ⁿ include/exclude decisions of an n-record
//! batch as a bitmask `0..2ⁿ` (bit `i` = record `i`), rejects candidates
//! whose demand exceeds `supply_mw + ε` or that fail an enabled regional
//! constraint, and keeps the highest-scoring survivor. The first mask in
//! enumeration order wins ties.
//!
//! Cost is O(2ⁿ · n), so batch size is capped (default 24). The selector
//! never approximates: oversize batches, deadlines, and cancellations are
//! reported as errors instead of returning a non-optimal answer.
//!
//! With the `parallel` feature the mask range is split into contiguous
//! chunks evaluated on the rayon pool and reduced by `(score, -mask)`,
//! which yields exactly the sequential result.

mod config;
mod runner;

pub use config::ExactConfig;
pub use runner::ExactSelector;
