//! Trip settlement runner
//!
//! Reads a trip scenario (weighbridge readings, hopper discharges and
//! provider documents), drives it through the weighing and settlement
//! domains over in-memory storage, and reports the outcome.

pub mod config;
pub mod error;
pub mod scenario;

pub use config::RunnerConfig;
pub use error::RunnerError;
pub use scenario::{ScenarioRunner, SettlementReport, TripScenario};
