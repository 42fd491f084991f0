//! Greedy baseline selector.
//!
//! Walks records in priority order (priority desc, base score desc, input
//! order on exact ties) and admits each one whose demand still fits under
//! `supply_mw + ε`. Skipped records are never revisited and no regional
//! constraint is checked.
//!
//! This exists to measure the score gap against
//! [`ExactSelector`](crate::exact::ExactSelector); it is not a production
//! allocation policy.

mod runner;

pub use runner::GreedySelector;
