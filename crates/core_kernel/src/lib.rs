//! Core Kernel - Foundational types shared by the weighing and settlement domains
//!
//! This crate provides the building blocks used across all domain modules:
//! - Weight, unit price and money types with precise decimal arithmetic
//! - Strongly-typed identifiers
//! - Validation helpers used by every constructor
//! - The error taxonomy and the port error returned by repositories

pub mod weight;
pub mod money;
pub mod identifiers;
pub mod validation;
pub mod error;
pub mod ports;

pub use weight::Weight;
pub use money::{Money, MoneyError, Rate, UnitPrice};
pub use identifiers::{
    EntityId, CollectionTripId, WeighingOrderId, WeightReadingId, DischargeId,
    SettlementId, ProviderLoadId, PenaltyId,
};
pub use validation::ValidationError;
pub use error::ErrorKind;
pub use ports::{DomainPort, PortError};
