//! Binary selections and the [`Selector`] trait.
//!
//! A [`Selection`] is the decision vector produced by a selector: one
//! include/exclude bit per record of a batch. Two selectors implement the
//! trait: the exhaustive [`ExactSelector`](crate::exact::ExactSelector) and
//! the [`GreedySelector`](crate::greedy::GreedySelector) baseline.

mod types;

pub use types::{Selection, SelectionOutcome, SelectionStatus, Selector};
