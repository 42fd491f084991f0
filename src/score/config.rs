//! Facility-type weight table.

use crate::facility::FacilityType;
use std::collections::HashMap;

/// Weight lookup by facility type.
///
/// # Defaults
///
/// ```
/// use u_gridalloc::facility::FacilityType;
/// use u_gridalloc::score::WeightTable;
///
/// let weights = WeightTable::default();
/// assert_eq!(weights.weight(&FacilityType::EmergencyCenter), 3.0);
/// assert_eq!(weights.weight(&FacilityType::WaterPump), 2.0);
/// assert_eq!(weights.weight(&FacilityType::Residential), 1.0);
/// assert_eq!(weights.weight(&FacilityType::Other("Bakery".into())), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightTable {
    weights: HashMap<FacilityType, f64>,

    /// Weight of any type missing from the table.
    pub default_weight: f64,
}

impl Default for WeightTable {
    fn default() -> Self {
        let weights = HashMap::from([
            (FacilityType::EmergencyCenter, 3.0),
            (FacilityType::WaterPump, 2.0),
            (FacilityType::Residential, 1.0),
        ]);
        Self {
            weights,
            default_weight: 1.0,
        }
    }
}

impl WeightTable {
    /// Sets (or overrides) the weight of one facility type.
    pub fn with_weight(mut self, facility_type: FacilityType, weight: f64) -> Self {
        self.weights.insert(facility_type, weight);
        self
    }

    /// Sets the fallback weight for unknown types.
    pub fn with_default_weight(mut self, weight: f64) -> Self {
        self.default_weight = weight;
        self
    }

    /// Weight of `facility_type`, or the default weight.
    pub fn weight(&self, facility_type: &FacilityType) -> f64 {
        self.weights
            .get(facility_type)
            .copied()
            .unwrap_or(self.default_weight)
    }

    /// Validates the table.
    pub fn validate(&self) -> Result<(), String> {
        if !self.default_weight.is_finite() || self.default_weight < 0.0 {
            return Err(format!(
                "default_weight must be finite and non-negative, got {}",
                self.default_weight
            ));
        }
        for (facility_type, w) in &self.weights {
            if !w.is_finite() || *w < 0.0 {
                return Err(format!(
                    "weight for {facility_type} must be finite and non-negative, got {w}"
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_weight() {
        let table = WeightTable::default().with_weight(FacilityType::Residential, 1.5);
        assert!((table.weight(&FacilityType::Residential) - 1.5).abs() < 1e-10);
        assert!((table.weight(&FacilityType::WaterPump) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_custom_type_weight() {
        let clinic = FacilityType::Other("Clinic".into());
        let table = WeightTable::default()
            .with_weight(clinic.clone(), 2.5)
            .with_default_weight(0.5);
        assert!((table.weight(&clinic) - 2.5).abs() < 1e-10);
        assert!((table.weight(&FacilityType::Other("Shop".into())) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_validate() {
        assert!(WeightTable::default().validate().is_ok());
        assert!(WeightTable::default()
            .with_default_weight(-1.0)
            .validate()
            .is_err());
        assert!(WeightTable::default()
            .with_weight(FacilityType::WaterPump, f64::NAN)
            .validate()
            .is_err());
    }
}
