//! Pipeline configuration.

use crate::exact::ExactConfig;
use crate::leveling::LevelingConfig;
use crate::score::WeightTable;

/// Configuration for a [`SlotPipeline`](super::SlotPipeline).
///
/// # Defaults
///
/// ```
/// use u_gridalloc::pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.sample_size, Some(10));
/// assert_eq!(config.seed, 42);
/// assert!((config.supply_ratio - 0.35).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipelineConfig {
    /// Fraction of the batch's total demand available as supply.
    pub supply_ratio: f64,

    /// Down-sample slots larger than this. `None` keeps every record.
    pub sample_size: Option<usize>,

    /// Seed for down-sampling.
    pub seed: u64,

    /// Facility-type weights for scoring.
    pub weights: WeightTable,

    /// Exact selector settings, including the fairness regions.
    pub exact: ExactConfig,

    /// Leveling settings, shared by both paths.
    pub leveling: LevelingConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            supply_ratio: 0.35,
            sample_size: Some(10),
            seed: 42,
            weights: WeightTable::default(),
            exact: ExactConfig::default(),
            leveling: LevelingConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn with_supply_ratio(mut self, ratio: f64) -> Self {
        self.supply_ratio = ratio;
        self
    }

    pub fn with_sample_size(mut self, n: Option<usize>) -> Self {
        self.sample_size = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_weights(mut self, weights: WeightTable) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_exact(mut self, exact: ExactConfig) -> Self {
        self.exact = exact;
        self
    }

    pub fn with_leveling(mut self, leveling: LevelingConfig) -> Self {
        self.leveling = leveling;
        self
    }

    /// Validates this configuration and every nested one.
    pub fn validate(&self) -> Result<(), String> {
        if !self.supply_ratio.is_finite() || self.supply_ratio < 0.0 {
            return Err(format!(
                "supply_ratio must be finite and non-negative, got {}",
                self.supply_ratio
            ));
        }
        match self.sample_size {
            Some(0) => return Err("sample_size must be positive".into()),
            Some(n) if n > self.exact.max_batch_size => {
                return Err(format!(
                    "sample_size {n} exceeds exact max_batch_size {}",
                    self.exact.max_batch_size
                ));
            }
            _ => {}
        }
        self.weights.validate()?;
        self.exact.validate()?;
        self.leveling.validate()
    }
}
