//! Leveling configuration.

/// Service levels tried for each record, largest first.
pub const LEVELS: [f64; 3] = [1.0, 0.5, 0.0];

/// Order in which records are leveled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelingOrder {
    /// Priority desc, then base score desc. The selection is only carried
    /// as the `decision_x` report column.
    #[default]
    PriorityOnly,

    /// Selected records first, then priority desc, then base score desc.
    SelectionFirst,
}

/// Configuration for the [`PartialAllocationPolicy`](super::PartialAllocationPolicy).
///
/// # Examples
///
/// ```
/// use u_gridalloc::leveling::{LevelingConfig, LevelingOrder};
///
/// let config = LevelingConfig::default().with_order(LevelingOrder::SelectionFirst);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelingConfig {
    /// Slack added to the remaining supply when testing a level.
    pub epsilon: f64,

    /// Slack allowed on the final `Σ allocated_mw ≤ supply_mw` check.
    pub post_tolerance: f64,

    /// Walk order.
    pub order: LevelingOrder,
}

impl Default for LevelingConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-9,
            post_tolerance: 1e-6,
            order: LevelingOrder::default(),
        }
    }
}

impl LevelingConfig {
    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.epsilon = eps;
        self
    }

    pub fn with_post_tolerance(mut self, tol: f64) -> Self {
        self.post_tolerance = tol;
        self
    }

    pub fn with_order(mut self, order: LevelingOrder) -> Self {
        self.order = order;
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
        if !self.post_tolerance.is_finite() || self.post_tolerance < self.epsilon {
            return Err(format!(
                "post_tolerance must be finite and at least epsilon, got {}",
                self.post_tolerance
            ));
        }
        Ok(())
    }
}
