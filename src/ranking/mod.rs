//! Deterministic orderings of the records in a batch.
//!
//! A [`Ranker`] chains [`RankRule`]s: the first rule decides, later rules
//! only break exact ties, and positions tied on every rule keep their input
//! order. Two chains drive the allocation pipeline:
//!
//! - [`priority_order`]: `priority_level` desc, then `base_score` desc.
//!   The greedy baseline admits records in this order, and leveling walks
//!   it by default.
//! - [`selection_order`]: selected records first, then priority order.
//!   Used by `LevelingOrder::SelectionFirst`.

mod engine;
mod rules;
mod types;

pub use engine::Ranker;
pub use rules::{
    priority_order, selection_order, HigherPriority, HigherScore, RankContext, SelectedFirst,
};
pub use types::RankRule;
