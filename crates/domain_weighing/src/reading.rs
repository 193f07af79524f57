//! Weight readings taken at the weighbridge

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::validation::require_id;
use core_kernel::{ValidationError, Weight, WeightReadingId};

/// Kind of measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightType {
    /// Loaded vehicle
    Gross,
    /// Empty vehicle
    Tare,
}

/// One gross or tare measurement
///
/// Readings are immutable once taken. They carry no reference to their
/// weighing order; the order owns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightReading {
    id: WeightReadingId,
    weight_type: WeightType,
    weight: Weight,
    captured_at: DateTime<Utc>,
}

impl WeightReading {
    /// Creates a reading, rejecting a nil id or a non-positive weight
    pub fn new(
        id: WeightReadingId,
        weight_type: WeightType,
        kilograms: Decimal,
        captured_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: require_id("reading_id", id)?,
            weight_type,
            weight: Weight::positive("weight", kilograms)?,
            captured_at,
        })
    }

    /// Takes a reading now with a fresh identifier
    pub fn capture(weight_type: WeightType, kilograms: Decimal) -> Result<Self, ValidationError> {
        Self::new(WeightReadingId::new_v7(), weight_type, kilograms, Utc::now())
    }

    pub fn id(&self) -> WeightReadingId {
        self.id
    }

    pub fn weight_type(&self) -> WeightType {
        self.weight_type
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_capture_gross() {
        let reading = WeightReading::capture(WeightType::Gross, dec!(15000)).unwrap();
        assert_eq!(reading.weight_type(), WeightType::Gross);
        assert_eq!(reading.weight().kilograms(), dec!(15000));
    }

    #[test]
    fn test_rejects_non_positive_weight() {
        let err = WeightReading::capture(WeightType::Tare, dec!(0)).unwrap_err();
        assert_eq!(err.field, "weight");
    }

    #[test]
    fn test_rejects_nil_id() {
        let id = WeightReadingId::nil();
        let result = WeightReading::new(id, WeightType::Gross, dec!(10), Utc::now());
        assert!(result.is_err());
    }
}
