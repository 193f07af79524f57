//! Prices and monetary amounts with precise decimal arithmetic
//!
//! The settlement domain is single-currency, so amounts carry no currency
//! code. [`UnitPrice`] is a price per kilogram, [`Money`] a non-negative
//! amount such as a penalty total and [`Rate`] a proportion such as the
//! shortfall tolerance.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::error::ErrorKind;
use crate::validation::{require_positive, ValidationError};
use crate::weight::Weight;

/// Errors that can occur in monetary calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("Overflow during calculation")]
    Overflow,
}

impl MoneyError {
    /// Returns the taxonomy kind of this error
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvariantViolation
    }
}

/// Price per kilogram, always strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitPrice {
    per_kilogram: Decimal,
}

impl UnitPrice {
    /// Creates a unit price, rejecting zero and negative values
    pub fn positive(field: &'static str, per_kilogram: Decimal) -> Result<Self, ValidationError> {
        Ok(Self {
            per_kilogram: require_positive(field, per_kilogram)?,
        })
    }

    /// Returns the price per kilogram
    pub fn amount(&self) -> Decimal {
        self.per_kilogram
    }

    /// Prices a weight at this rate
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the product exceeds the decimal range
    pub fn charge_for(&self, weight: Weight) -> Result<Money, MoneyError> {
        weight
            .kilograms()
            .checked_mul(self.per_kilogram)
            .map(Money::from_decimal)
            .ok_or(MoneyError::Overflow)
    }
}

impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/kg", self.per_kilogram.normalize())
    }
}

/// A non-negative monetary amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    amount: Decimal,
}

impl Money {
    fn from_decimal(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Checked addition that returns an error on overflow
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.amount
            .checked_add(other.amount)
            .map(Self::from_decimal)
            .ok_or(MoneyError::Overflow)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.amount)
    }
}

/// Represents a proportion (e.g. a tolerance)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a decimal (e.g. 0.10 for 10%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal value (e.g. 0.10 for 10%)
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates a rate from a percentage (e.g. 10 for 10%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// Applies this rate to a quantity
    pub fn apply(&self, quantity: Decimal) -> Decimal {
        quantity * self.value
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}
