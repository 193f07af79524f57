//! Weight reconciliation
//!
//! Compares the physical net weight of a trip with the documentary weights of
//! its provider loads. Only missing weight is penalised; surplus weight is
//! accepted as is.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Rate, UnitPrice, Weight};

use crate::error::SettlementError;
use crate::penalty::DriverPenalty;
use crate::provider_load::ProviderLoad;

/// Share of the documentary total that may be missing without penalty
pub const SHORTFALL_TOLERANCE: Rate = Rate::new(dec!(0.10));

/// How the physical weight compares with the documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReconciliationOutcome {
    /// Physical weight is at least the documentary total
    Balanced,
    /// Some weight is missing, but no more than the tolerance
    WithinTolerance,
    /// Missing weight exceeds the tolerance
    Shortfall,
}

/// The figures of one reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Measured net weight
    pub physical_weight: Decimal,
    /// Sum of documentary weights
    pub total_documentary_weight: Decimal,
    /// Physical minus documentary; negative when weight is missing
    pub difference: Decimal,
    /// Missing weight, zero when nothing is missing
    pub missing_weight: Decimal,
    /// Allowed missing weight
    pub tolerance: Decimal,
    /// Missing weight beyond the tolerance, zero unless `Shortfall`
    pub excess_weight: Decimal,
    /// Highest unit price among the loads
    pub max_unit_price: UnitPrice,
    pub outcome: ReconciliationOutcome,
    /// Present only for `Shortfall`
    pub penalty: Option<DriverPenalty>,
}

impl Reconciliation {
    /// Returns true if the driver owes a penalty
    pub fn has_penalty(&self) -> bool {
        self.penalty.is_some()
    }
}

/// Reconciles a physical net weight against provider loads
///
/// Does not mutate anything; every call with the same input yields the same
/// figures and penalty amount (penalty identifiers are fresh on each call).
///
/// # Errors
///
/// Returns `EmptyAggregate` when `loads` is empty and `Overflow` when the
/// documentary total or the penalty leaves the decimal range
///
/// # Example
///
/// ```rust,ignore
/// // physical 80 kg against one load of 100 kg at 5/kg
/// // missing 20, tolerance 10, excess 10, penalty 50
/// let result = reconcile(physical, &loads)?;
/// assert_eq!(result.penalty.unwrap().total_amount().amount(), dec!(50));
/// ```
pub fn reconcile(
    physical_weight: Weight,
    loads: &[ProviderLoad],
) -> Result<Reconciliation, SettlementError> {
    let max_unit_price = loads
        .iter()
        .map(ProviderLoad::unit_price)
        .max()
        .ok_or_else(|| SettlementError::empty("at least one provider load is required"))?;

    let total = documentary_total(loads)?;
    let physical = physical_weight.kilograms();
    let difference = physical - total;
    let tolerance = SHORTFALL_TOLERANCE.apply(total);

    let mut reconciliation = Reconciliation {
        physical_weight: physical,
        total_documentary_weight: total,
        difference,
        missing_weight: Decimal::ZERO,
        tolerance,
        excess_weight: Decimal::ZERO,
        max_unit_price,
        outcome: ReconciliationOutcome::Balanced,
        penalty: None,
    };

    if difference >= Decimal::ZERO {
        return Ok(reconciliation);
    }

    let missing = difference.abs();
    reconciliation.missing_weight = missing;
    if missing <= tolerance {
        reconciliation.outcome = ReconciliationOutcome::WithinTolerance;
        return Ok(reconciliation);
    }

    let excess = missing - tolerance;
    reconciliation.excess_weight = excess;
    reconciliation.outcome = ReconciliationOutcome::Shortfall;
    reconciliation.penalty = Some(DriverPenalty::assess(
        Weight::positive("excess_weight", excess)?,
        max_unit_price,
    )?);
    Ok(reconciliation)
}

/// Sum of documentary weights in kilograms, zero for no loads
///
/// # Errors
///
/// Returns `Overflow` if the sum leaves the decimal range
pub fn documentary_total(loads: &[ProviderLoad]) -> Result<Decimal, SettlementError> {
    loads
        .iter()
        .try_fold(Decimal::ZERO, |total, load| {
            total.checked_add(load.documentary_weight().kilograms())
        })
        .ok_or(SettlementError::Overflow("documentary weight total"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ProviderLoadId;

    fn load(kg: Decimal, price: Decimal) -> ProviderLoad {
        ProviderLoad::new(ProviderLoadId::new_v7(), "PRV", "PRD", kg, price).unwrap()
    }

    fn kg(value: Decimal) -> Weight {
        Weight::positive("physical", value).unwrap()
    }

    #[test]
    fn test_empty_loads() {
        let err = reconcile(kg(dec!(80)), &[]).unwrap_err();
        assert!(matches!(err, SettlementError::EmptyAggregate(_)));
    }

    #[test]
    fn test_balanced() {
        let result = reconcile(kg(dec!(105)), &[load(dec!(100), dec!(5))]).unwrap();
        assert_eq!(result.outcome, ReconciliationOutcome::Balanced);
        assert_eq!(result.difference, dec!(5));
        assert_eq!(result.missing_weight, Decimal::ZERO);
        assert!(result.penalty.is_none());
    }

    #[test]
    fn test_within_tolerance() {
        let result = reconcile(kg(dec!(95)), &[load(dec!(100), dec!(5))]).unwrap();
        assert_eq!(result.outcome, ReconciliationOutcome::WithinTolerance);
        assert_eq!(result.missing_weight, dec!(5));
        assert_eq!(result.tolerance, dec!(10));
        assert!(!result.has_penalty());
    }

    #[test]
    fn test_exactly_at_tolerance_is_not_penalised() {
        let result = reconcile(kg(dec!(90)), &[load(dec!(100), dec!(5))]).unwrap();
        assert_eq!(result.outcome, ReconciliationOutcome::WithinTolerance);
    }

    #[test]
    fn test_single_load_shortfall() {
        let result = reconcile(kg(dec!(80)), &[load(dec!(100), dec!(5))]).unwrap();
        assert_eq!(result.outcome, ReconciliationOutcome::Shortfall);
        assert_eq!(result.excess_weight, dec!(10));

        let penalty = result.penalty.unwrap();
        assert_eq!(penalty.missing_weight().kilograms(), dec!(10));
        assert_eq!(penalty.applied_max_price().amount(), dec!(5));
        assert_eq!(penalty.total_amount().amount(), dec!(50));
    }

    #[test]
    fn test_highest_price_applies() {
        let loads = [load(dec!(60), dec!(5)), load(dec!(40), dec!(8))];
        let result = reconcile(kg(dec!(80)), &loads).unwrap();
        assert_eq!(result.total_documentary_weight, dec!(100));
        assert_eq!(result.max_unit_price.amount(), dec!(8));
        assert_eq!(result.penalty.unwrap().total_amount().amount(), dec!(80));
    }

    #[test]
    fn test_documentary_total_out_of_range() {
        let loads = [load(Decimal::MAX, dec!(1)), load(Decimal::MAX, dec!(1))];
        let err = reconcile(kg(dec!(1)), &loads).unwrap_err();
        assert_eq!(err, SettlementError::Overflow("documentary weight total"));
    }

    #[test]
    fn test_penalty_out_of_range() {
        let huge = dec!(100000000000000000000);
        let err = reconcile(kg(dec!(1)), &[load(huge, huge)]).unwrap_err();
        assert_eq!(err, SettlementError::Overflow("penalty total"));
    }
}
