//! Weight measured in kilograms
//!
//! Weights use rust_decimal so that gross minus tare, sums of documentary
//! weights and the 10% tolerance are exact. A [`Weight`] is always strictly
//! positive; signed quantities such as a reconciliation difference stay plain
//! `Decimal`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation::{require_positive, ValidationError};

/// A strictly positive weight in kilograms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight {
    kilograms: Decimal,
}

impl Weight {
    /// Creates a weight, rejecting zero and negative values
    ///
    /// # Arguments
    ///
    /// * `field` - Argument name reported on failure
    /// * `kilograms` - The weight in kilograms
    pub fn positive(field: &'static str, kilograms: Decimal) -> Result<Self, ValidationError> {
        Ok(Self {
            kilograms: require_positive(field, kilograms)?,
        })
    }

    /// Returns the weight in kilograms
    pub fn kilograms(&self) -> Decimal {
        self.kilograms
    }

    /// Subtracts another weight, returning `None` unless the result stays positive
    pub fn checked_sub(&self, other: &Weight) -> Option<Weight> {
        let remainder = self.kilograms - other.kilograms;
        if remainder > Decimal::ZERO {
            Some(Self { kilograms: remainder })
        } else {
            None
        }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kg", self.kilograms.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_weight() {
        let w = Weight::positive("gross", dec!(1250.5)).unwrap();
        assert_eq!(w.kilograms(), dec!(1250.5));
        assert_eq!(w.to_string(), "1250.5 kg");
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert!(Weight::positive("gross", Decimal::ZERO).is_err());
        assert!(Weight::positive("gross", dec!(-0.01)).is_err());
    }

    #[test]
    fn test_checked_sub() {
        let gross = Weight::positive("gross", dec!(100)).unwrap();
        let tare = Weight::positive("tare", dec!(30)).unwrap();
        assert_eq!(gross.checked_sub(&tare).unwrap().kilograms(), dec!(70));
        assert!(tare.checked_sub(&gross).is_none());
        assert!(gross.checked_sub(&gross).is_none());
    }
}
