//! Priority score model.
//!
//! ```text
//! base_score = priority_level × weight(facility_type) × demand_mw × risk_factor(risk)
//! risk_factor(r) = 0.5 + 0.5 × (1 − r)        ∈ [0.5, 1.0]
//! ```
//!
//! The weight table is injected configuration, not global state, so tests
//! and callers can override individual weights.

mod config;
mod model;

pub use config::WeightTable;
pub use model::{risk_factor, ScoreModel, ScoredBatch};
