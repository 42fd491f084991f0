//! Priority-aware allocation of scarce electricity supply across facilities.
//!
//! Given a batch of facilities for one time slot and a supply cap in MW,
//! the crate decides which facilities to power and at what service level:
//!
//! - **Scoring** ([`score`]): `priority × type weight × demand × risk factor`.
//! - **Exact selection** ([`exact`]): exhaustive 0/1 search maximizing the
//!   selected score under the cap, with regional fairness and
//!   pump-coverage rules ([`constraint`]).
//! - **Greedy baseline** ([`greedy`]): priority-ordered admission, kept
//!   for comparison.
//! - **Leveling** ([`leveling`]): walks a ranked list ([`ranking`]) and
//!   grants each facility full, half, or no supply.
//! - **Pipeline and reports** ([`pipeline`], [`report`]): per-slot
//!   orchestration and flat output views.
//!
//! # Quick start
//!
//! ```
//! use u_gridalloc::exact::{ExactConfig, ExactSelector};
//! use u_gridalloc::facility::{Batch, FacilityRecord};
//! use u_gridalloc::leveling::PartialAllocationPolicy;
//! use u_gridalloc::score::ScoreModel;
//! use u_gridalloc::selection::Selector;
//!
//! let batch = Batch::new(vec![
//!     FacilityRecord::new("Gaza", "A", "Emergency Center", 10.0, 3, 0.2),
//!     FacilityRecord::new("Gaza", "B", "Water Pump", 8.0, 3, 0.1),
//!     FacilityRecord::new("Gaza", "C", "Residential", 5.0, 1, 0.5),
//! ])?;
//! let scored = ScoreModel::default().score_batch(&batch);
//!
//! let outcome = ExactSelector::new(ExactConfig::default())?.select(&scored, 12.0)?;
//! assert_eq!(outcome.selection.decisions(), &[true, false, false]);
//!
//! let allocation = PartialAllocationPolicy::default().allocate(&scored, &outcome.selection, 12.0)?;
//! assert!((allocation.total_score - 81.0).abs() < 1e-10);
//! # Ok::<(), u_gridalloc::AllocError>(())
//! ```
//!
//! # Features
//!
//! - `parallel`: split exact enumeration across threads with `rayon`.
//!   Results are identical to the sequential scan.
//! - `serde`: `Serialize`/`Deserialize` on records, configs, and reports.

pub mod constraint;
pub mod error;
pub mod exact;
pub mod facility;
pub mod greedy;
pub mod leveling;
pub mod pipeline;
pub mod ranking;
pub mod report;
pub mod score;
pub mod selection;

pub use error::{AllocError, Result};
