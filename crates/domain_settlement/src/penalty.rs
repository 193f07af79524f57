//! Driver penalty for a weight shortfall beyond tolerance

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::validation::require_id;
use core_kernel::{Money, PenaltyId, UnitPrice, Weight};

use crate::error::SettlementError;

/// Penalty charged to the driver of a trip
///
/// The total is always `missing_weight x applied_max_price`; it is computed
/// on construction and never set directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverPenalty {
    id: PenaltyId,
    missing_weight: Weight,
    applied_max_price: UnitPrice,
    total_amount: Money,
}

impl DriverPenalty {
    /// Creates a penalty from raw figures
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if the id is nil or either figure is not
    /// positive, and `Overflow` if the total is out of range
    pub fn new(
        id: PenaltyId,
        missing_weight: Decimal,
        applied_max_price: Decimal,
    ) -> Result<Self, SettlementError> {
        Self::from_parts(
            require_id("penalty_id", id)?,
            Weight::positive("missing_weight", missing_weight)?,
            UnitPrice::positive("applied_max_price", applied_max_price)?,
        )
    }

    /// Assesses a penalty with a fresh identifier
    pub fn assess(
        missing_weight: Weight,
        applied_max_price: UnitPrice,
    ) -> Result<Self, SettlementError> {
        Self::from_parts(PenaltyId::new_v7(), missing_weight, applied_max_price)
    }

    fn from_parts(
        id: PenaltyId,
        missing_weight: Weight,
        applied_max_price: UnitPrice,
    ) -> Result<Self, SettlementError> {
        Ok(Self {
            id,
            missing_weight,
            applied_max_price,
            total_amount: applied_max_price.charge_for(missing_weight)?,
        })
    }

    pub fn id(&self) -> PenaltyId {
        self.id
    }

    /// Weight missing beyond the tolerance
    pub fn missing_weight(&self) -> Weight {
        self.missing_weight
    }

    /// Highest unit price among the trip's loads
    pub fn applied_max_price(&self) -> UnitPrice {
        self.applied_max_price
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ErrorKind;
    use rust_decimal_macros::dec;

    fn penalty(missing: Decimal, price: Decimal) -> Result<DriverPenalty, SettlementError> {
        DriverPenalty::new(PenaltyId::new_v7(), missing, price)
    }

    #[test]
    fn test_total_is_weight_times_price() {
        let penalty = penalty(dec!(10), dec!(5)).unwrap();
        assert_eq!(penalty.total_amount().amount(), dec!(50));
    }

    #[test]
    fn test_rejects_non_positive_figures() {
        assert!(penalty(dec!(0), dec!(5)).is_err());
        assert!(penalty(dec!(10), dec!(0)).is_err());
        assert!(DriverPenalty::new(PenaltyId::nil(), dec!(10), dec!(5)).is_err());
    }

    #[test]
    fn test_total_out_of_range() {
        let err = penalty(Decimal::MAX, dec!(2)).unwrap_err();
        assert_eq!(err, SettlementError::Overflow("penalty total"));
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
    }
}
