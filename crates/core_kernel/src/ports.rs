//! Ports and Adapters Infrastructure
//!
//! Each domain crate defines repository port traits for loading and saving its
//! aggregates. This module holds what those ports share: the marker trait and
//! the error type every adapter must return.
//!
//! ```text
//!   SettlementService ──► WeighingOrderRepository / TripSettlementRepository
//!                                   ▲
//!                                   │
//!                      in-memory adapter (or a database adapter)
//! ```

use std::fmt;
use thiserror::Error;

use crate::error::ErrorKind;

/// Error type for port operations
///
/// Provides a unified error type that all port implementations must use,
/// so callers handle storage failures the same way whatever the adapter.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested aggregate was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// A concurrent writer saved the aggregate first
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// Connection to the underlying store failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. } | PortError::Timeout { .. }
        )
    }

    /// Returns true if this error indicates the aggregate was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    /// Returns the taxonomy kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PortError::NotFound { .. } => ErrorKind::NotFound,
            PortError::Conflict { .. } => ErrorKind::Conflict,
            _ => ErrorKind::Infrastructure,
        }
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker so they can be shared across tasks.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("TripSettlement", "STL-123");
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert!(error.to_string().contains("TripSettlement"));
        assert!(error.to_string().contains("STL-123"));
    }

    #[test]
    fn test_port_error_transient() {
        let timeout = PortError::Timeout {
            operation: "get_settlement".to_string(),
            duration_ms: 5000,
        };
        assert!(timeout.is_transient());
        assert_eq!(timeout.kind(), ErrorKind::Infrastructure);

        let conflict = PortError::conflict("version 3 already stored");
        assert!(!conflict.is_transient());
        assert_eq!(conflict.kind(), ErrorKind::Conflict);
    }
}
