//! Custom Test Assertions
//!
//! Assertion helpers for settlement results that print the reconciliation
//! figures on failure.

use core_kernel::ErrorKind;
use domain_settlement::{DriverPenalty, TripSettlement};
use rust_decimal::Decimal;

/// Asserts that a penalty exists and totals `expected`
pub fn assert_penalty_amount(penalty: Option<&DriverPenalty>, expected: Decimal) {
    match penalty {
        Some(p) => assert_eq!(
            p.total_amount().amount(),
            expected,
            "Penalty mismatch: missing={}, max price={}, total={}, expected={}",
            p.missing_weight(),
            p.applied_max_price(),
            p.total_amount(),
            expected
        ),
        None => panic!("Expected a penalty of {}, got none", expected),
    }
}

/// Asserts that the settlement's current calculation found no penalty
pub fn assert_no_penalty(settlement: &TripSettlement) {
    match settlement.settled_penalty() {
        Ok(None) => {}
        Ok(Some(p)) => panic!(
            "Expected no penalty, got {} for {} missing",
            p.total_amount(),
            p.missing_weight()
        ),
        Err(e) => panic!("Expected a current calculation, got error: {}", e),
    }
}

/// Asserts the kind of a failed operation
pub fn assert_error_kind<T, E>(
    result: Result<T, E>,
    expected: ErrorKind,
    kind: impl Fn(&E) -> ErrorKind,
) where
    E: std::fmt::Display,
{
    match result {
        Ok(_) => panic!("Expected {} error, operation succeeded", expected),
        Err(e) => assert_eq!(kind(&e), expected, "Unexpected error: {}", e),
    }
}

/// Asserts that two weights agree to the gram
pub fn assert_weight_eq(actual: Decimal, expected: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff < Decimal::new(1, 3),
        "Weights differ: actual={} kg, expected={} kg",
        actual,
        expected
    );
}
