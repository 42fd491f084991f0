//! Regional feasibility constraints on a selection.
//!
//! Two predicates share one shape, [`RegionalCoverage`]: when both named
//! regions contain a *qualifying* record, a selection must include at least
//! one qualifying record from each region. When either region has none, the
//! predicate holds vacuously.
//!
//! - **Fairness**: qualifying = priority 3 and a critical type
//!   (Emergency Center, Water Pump).
//! - **Pump-region**: qualifying = priority 3 and Water Pump.
//!
//! [`ConstraintValidator`] bundles them and can compile them into bitmask
//! checks for the exhaustive selector's inner loop.

mod coverage;
mod types;
mod validator;

pub use coverage::{CoverageMask, RegionalCoverage};
pub use types::{RegionPair, SelectionConstraint};
pub use validator::{CompiledValidator, ConstraintValidator};
