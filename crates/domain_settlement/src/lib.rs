//! Trip Settlement Domain
//!
//! This crate reconciles the physically measured net weight of a collection
//! trip against the documentary weights declared by each provider, and
//! assesses a driver penalty when the shortfall exceeds the tolerance.
//!
//! # Reconciliation
//!
//! ```text
//! total       = sum of documentary weights
//! difference  = physical - total
//! difference >= 0                 -> no penalty (balanced)
//! missing <= 10% of total         -> no penalty (within tolerance)
//! otherwise excess = missing - tolerance
//!           penalty = excess x highest unit price among loads
//! ```
//!
//! The [`services::SettlementService`] is the only place that touches both
//! aggregates: it reads the net weight of a weighed order and opens the
//! settlement from it.

pub mod provider_load;
pub mod penalty;
pub mod reconciliation;
pub mod aggregate;
pub mod events;
pub mod error;
pub mod ports;
pub mod services;

pub use provider_load::ProviderLoad;
pub use penalty::DriverPenalty;
pub use reconciliation::{
    documentary_total, reconcile, Reconciliation, ReconciliationOutcome, SHORTFALL_TOLERANCE,
};
pub use aggregate::{CalculationState, TripSettlement};
pub use events::SettlementEvent;
pub use error::SettlementError;
pub use ports::{TripSettlementRepository, TripSettlementRepositoryExt};
pub use services::{ProviderLoadRequest, SettlementService, SettlementServiceError};
