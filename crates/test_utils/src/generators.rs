//! Property-Based Test Generators
//!
//! Proptest strategies producing values that pass domain validation.

use proptest::collection::vec;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Positive weights between 0.01 kg and 100 t, two decimal places
pub fn weight_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Positive whole figures between 2^64 and `Decimal::MAX`
///
/// Sums and products of these leave the decimal range.
pub fn extreme_decimal_strategy() -> impl Strategy<Value = Decimal> {
    (any::<u32>(), any::<u32>(), 1u32..=u32::MAX)
        .prop_map(|(lo, mid, hi)| Decimal::from_parts(lo, mid, hi, false, 0))
}

/// Positive unit prices between 0.01 and 1000.00
pub fn unit_price_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// A (gross, tare) pair with tare strictly below gross
pub fn gross_tare_strategy() -> impl Strategy<Value = (Decimal, Decimal)> {
    (weight_strategy(), weight_strategy()).prop_map(|(tare, extra)| (tare + extra, tare))
}

/// Between one and eight (documentary weight, unit price) loads
pub fn loads_strategy() -> impl Strategy<Value = Vec<(Decimal, Decimal)>> {
    vec((weight_strategy(), unit_price_strategy()), 1..8)
}

/// Between one and four loads with figures near the decimal limit
pub fn extreme_loads_strategy() -> impl Strategy<Value = Vec<(Decimal, Decimal)>> {
    vec((extreme_decimal_strategy(), extreme_decimal_strategy()), 1..4)
}

/// Non-blank provider or product codes
pub fn code_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{3}-[0-9]{1,4}"
}
