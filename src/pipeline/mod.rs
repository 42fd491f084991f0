//! Per-slot allocation pipeline.
//!
//! ```text
//! records ─► slot filter ─► down-sample ─► Batch ─► ScoreModel
//!                                                     │
//!                        ┌────────────────────────────┴──────────┐
//!                  ExactSelector                          GreedySelector
//!                        │                                       │
//!            PartialAllocationPolicy                 PartialAllocationPolicy
//!                        └──────────────► SlotReport ◄───────────┘
//! ```
//!
//! `supply_mw = supply_ratio × Σ demand` of the (sampled) batch. Each slot
//! is solved independently; nothing is carried between calls.

mod config;
mod runner;

pub use config::PipelineConfig;
pub use runner::{PathReport, SlotPipeline, SlotReport};
