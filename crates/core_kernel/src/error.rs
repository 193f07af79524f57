//! Error taxonomy shared across the workspace
//!
//! Each crate defines its own `thiserror` enum; every one of them reports an
//! [`ErrorKind`] so the orchestration layer can map failures to responses
//! without matching on messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// An argument failed a domain constraint
    InvalidValue,
    /// The aggregate is not in the state the operation requires
    InvalidState,
    /// Individually valid values would break a structural invariant
    InvariantViolation,
    /// The operation needs at least one child element
    EmptyAggregate,
    /// The referenced aggregate does not exist
    NotFound,
    /// A concurrent writer saved the aggregate first
    Conflict,
    /// The storage collaborator failed
    Infrastructure,
}

impl ErrorKind {
    /// Returns the snake_case name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidValue => "invalid_value",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::InvariantViolation => "invariant_violation",
            ErrorKind::EmptyAggregate => "empty_aggregate",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Infrastructure => "infrastructure",
        }
    }

    /// Deterministic kinds fail identically when retried with the same input
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, ErrorKind::Conflict | ErrorKind::Infrastructure)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
