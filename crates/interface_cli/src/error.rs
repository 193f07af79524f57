//! Runner errors

use thiserror::Error;

use core_kernel::{ErrorKind, PortError};
use domain_settlement::SettlementServiceError;
use domain_weighing::WeighingError;

/// Errors raised while running a scenario
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The weighing order rejected a reading or discharge
    #[error("Weighing failed: {0}")]
    Weighing(#[from] WeighingError),

    /// The settlement service rejected an operation
    #[error("Settlement failed: {0}")]
    Settlement(#[from] SettlementServiceError),

    /// Storage failed
    #[error("Storage failed: {0}")]
    Port(#[from] PortError),
}

impl RunnerError {
    /// Returns the taxonomy kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RunnerError::Weighing(e) => e.kind(),
            RunnerError::Settlement(e) => e.kind(),
            RunnerError::Port(e) => e.kind(),
        }
    }
}
