//! Exact selector configuration.

use crate::constraint::RegionPair;
use crate::facility::FacilityType;

/// Largest batch a 64-bit selection mask can enumerate.
pub const MASK_BITS_LIMIT: usize = 63;

/// Configuration for the [`ExactSelector`](super::ExactSelector).
///
/// # Examples
///
/// ```
/// use u_gridalloc::exact::ExactConfig;
///
/// let config = ExactConfig::default()
///     .with_pump_region(true)
///     .with_max_batch_size(20)
///     .with_time_limit_ms(500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExactConfig {
    /// Slack added to the supply cap in capacity checks.
    pub epsilon: f64,

    /// Enforce the two-region fairness rule.
    pub enforce_fairness: bool,

    /// Enforce the pump-region rule.
    pub enforce_pump_region: bool,

    /// Regions balanced by both rules.
    pub regions: RegionPair,

    /// Priority-3 facility types that count toward fairness coverage.
    pub fairness_types: Vec<FacilityType>,

    /// Largest batch accepted. At most 63.
    pub max_batch_size: usize,

    /// Evaluate chunks on the rayon pool. Only effective with the
    /// `parallel` feature.
    pub parallel: bool,

    /// Optional wall-clock limit in milliseconds.
    ///
    /// Checked between chunks of candidates. When exceeded the selector
    /// returns [`AllocError::DeadlineExceeded`](crate::AllocError::DeadlineExceeded).
    pub time_limit_ms: Option<u64>,
}

impl Default for ExactConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-9,
            enforce_fairness: true,
            enforce_pump_region: false,
            regions: RegionPair::default(),
            fairness_types: vec![FacilityType::EmergencyCenter, FacilityType::WaterPump],
            max_batch_size: 24,
            parallel: true,
            time_limit_ms: None,
        }
    }
}

impl ExactConfig {
    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.epsilon = eps;
        self
    }

    pub fn with_fairness(mut self, enabled: bool) -> Self {
        self.enforce_fairness = enabled;
        self
    }

    pub fn with_pump_region(mut self, enabled: bool) -> Self {
        self.enforce_pump_region = enabled;
        self
    }

    pub fn with_regions(mut self, regions: RegionPair) -> Self {
        self.regions = regions;
        self
    }

    pub fn with_fairness_types(mut self, types: Vec<FacilityType>) -> Self {
        self.fairness_types = types;
        self
    }

    pub fn with_max_batch_size(mut self, n: usize) -> Self {
        self.max_batch_size = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            ));
        }
        if self.max_batch_size == 0 || self.max_batch_size > MASK_BITS_LIMIT {
            return Err(format!(
                "max_batch_size must be in 1..={MASK_BITS_LIMIT}, got {}",
                self.max_batch_size
            ));
        }
        if self.enforce_fairness && self.fairness_types.is_empty() {
            return Err("fairness_types must not be empty while fairness is enforced".into());
        }
        self.regions.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExactConfig::default();
        assert!((config.epsilon - 1e-9).abs() < 1e-15);
        assert!(config.enforce_fairness);
        assert!(!config.enforce_pump_region);
        assert_eq!(config.max_batch_size, 24);
        assert_eq!(config.regions, RegionPair::new("Gaza", "West Bank"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_batch_limit() {
        assert!(ExactConfig::default()
            .with_max_batch_size(0)
            .validate()
            .is_err());
        assert!(ExactConfig::default()
            .with_max_batch_size(64)
            .validate()
            .is_err());
        assert!(ExactConfig::default()
            .with_max_batch_size(63)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_epsilon() {
        assert!(ExactConfig::default().with_epsilon(-1e-9).validate().is_err());
        assert!(ExactConfig::default()
            .with_epsilon(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_fairness_types() {
        assert_eq!(
            ExactConfig::default().fairness_types,
            vec![FacilityType::EmergencyCenter, FacilityType::WaterPump]
        );
        assert!(ExactConfig::default()
            .with_fairness_types(vec![])
            .validate()
            .is_err());
        assert!(ExactConfig::default()
            .with_fairness(false)
            .with_fairness_types(vec![])
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_regions() {
        let config = ExactConfig::default().with_regions(RegionPair::new("A", "A"));
        assert!(config.validate().is_err());
    }
}
