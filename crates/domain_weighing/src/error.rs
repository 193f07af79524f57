//! Weighing domain errors

use thiserror::Error;

use core_kernel::{DischargeId, ErrorKind, ValidationError};

use crate::aggregate::WeighingStatus;

/// Errors that can occur in the weighing domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeighingError {
    /// An argument failed validation
    #[error(transparent)]
    InvalidValue(#[from] ValidationError),

    /// The operation is not allowed in the current status
    #[error("Cannot {operation} while {current}, requires {expected}")]
    InvalidState {
        operation: &'static str,
        current: WeighingStatus,
        expected: WeighingStatus,
    },

    /// The readings would break the gross/tare invariant
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// No discharge with this id belongs to the order
    #[error("Discharge not found: {0}")]
    DischargeNotFound(DischargeId),

    /// The discharge already has an end time
    #[error("Discharge already completed: {0}")]
    DischargeAlreadyCompleted(DischargeId),
}

impl WeighingError {
    /// Creates an invariant violation error
    pub fn invariant(message: impl Into<String>) -> Self {
        WeighingError::InvariantViolation(message.into())
    }

    /// Returns the taxonomy kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeighingError::InvalidValue(_) => ErrorKind::InvalidValue,
            WeighingError::InvalidState { .. } => ErrorKind::InvalidState,
            WeighingError::InvariantViolation(_) => ErrorKind::InvariantViolation,
            WeighingError::DischargeNotFound(_) => ErrorKind::NotFound,
            WeighingError::DischargeAlreadyCompleted(_) => ErrorKind::InvalidState,
        }
    }
}
