//! Settlement domain errors

use thiserror::Error;

use core_kernel::{ErrorKind, MoneyError, ValidationError};

/// Errors that can occur in the settlement domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// An argument failed validation
    #[error(transparent)]
    InvalidValue(#[from] ValidationError),

    /// The settlement has nothing to reconcile
    #[error("Empty settlement: {0}")]
    EmptyAggregate(String),

    /// Provider loads changed after the last calculation
    #[error("Settlement changed since it was last calculated")]
    StaleCalculation,

    /// The settlement has never been calculated
    #[error("Settlement has not been calculated")]
    NotCalculated,

    /// A figure left the representable decimal range
    #[error("Overflow computing {0}")]
    Overflow(&'static str),
}

impl SettlementError {
    /// Creates an empty aggregate error
    pub fn empty(message: impl Into<String>) -> Self {
        SettlementError::EmptyAggregate(message.into())
    }

    /// Returns the taxonomy kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SettlementError::InvalidValue(_) => ErrorKind::InvalidValue,
            SettlementError::EmptyAggregate(_) => ErrorKind::EmptyAggregate,
            SettlementError::StaleCalculation | SettlementError::NotCalculated => {
                ErrorKind::InvalidState
            }
            SettlementError::Overflow(_) => ErrorKind::InvariantViolation,
        }
    }
}

impl From<MoneyError> for SettlementError {
    fn from(_: MoneyError) -> Self {
        SettlementError::Overflow("penalty total")
    }
}
