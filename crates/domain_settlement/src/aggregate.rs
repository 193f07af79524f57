//! Trip Settlement Aggregate Root
//!
//! The TripSettlement collects the provider loads declared for one trip and
//! holds the penalty produced by the most recent reconciliation.
//!
//! # Invariants
//!
//! - The physical net weight is positive and fixed at creation
//! - Provider loads are append-only
//! - Calculation requires at least one load
//! - A stored penalty reflects only the latest calculation; adding a load
//!   afterwards marks it stale

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use core_kernel::validation::require_id;
use core_kernel::{ProviderLoadId, SettlementId, UnitPrice, WeighingOrderId, Weight};

use crate::error::SettlementError;
use crate::events::SettlementEvent;
use crate::penalty::DriverPenalty;
use crate::provider_load::ProviderLoad;
use crate::reconciliation::{documentary_total, reconcile, Reconciliation};

/// Freshness of the stored calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationState {
    /// No calculation has run yet
    NotCalculated,
    /// The stored result matches the current loads
    Current,
    /// Loads were added after the last calculation
    Stale,
}

/// The TripSettlement aggregate root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSettlement {
    /// Unique settlement identifier
    id: SettlementId,
    /// Weighing order that produced the physical weight (reference only)
    weighing_order_id: WeighingOrderId,
    /// Measured net weight of the trip
    physical_net_weight: Weight,
    /// Declared loads in the order they were added
    provider_loads: Vec<ProviderLoad>,
    /// Result of the last calculation, `None` when no penalty was due
    penalty: Option<DriverPenalty>,
    /// Whether `penalty` can be trusted
    calculation: CalculationState,
    /// Domain events to be published
    #[serde(skip)]
    events: Vec<SettlementEvent>,
    /// Version for optimistic concurrency
    version: u32,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl TripSettlement {
    /// Creates a settlement with no loads
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if an identifier is nil or the physical weight
    /// is not positive
    pub fn new(
        id: SettlementId,
        weighing_order_id: WeighingOrderId,
        physical_net_weight: Decimal,
    ) -> Result<Self, SettlementError> {
        let id = require_id("settlement_id", id)?;
        let weighing_order_id = require_id("weighing_order_id", weighing_order_id)?;
        let physical_net_weight = Weight::positive("physical_net_weight", physical_net_weight)?;
        let now = Utc::now();

        debug!(
            settlement_id = %id,
            %weighing_order_id,
            physical = %physical_net_weight,
            "settlement opened"
        );

        Ok(Self {
            id,
            weighing_order_id,
            physical_net_weight,
            provider_loads: Vec::new(),
            penalty: None,
            calculation: CalculationState::NotCalculated,
            events: vec![SettlementEvent::SettlementOpened {
                settlement_id: id,
                weighing_order_id,
                physical_net_weight: physical_net_weight.kilograms(),
                timestamp: now,
            }],
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Opens a settlement for a weighed order with a fresh identifier
    pub fn open(
        weighing_order_id: WeighingOrderId,
        physical_net_weight: Weight,
    ) -> Result<Self, SettlementError> {
        Self::new(
            SettlementId::new_v7(),
            weighing_order_id,
            physical_net_weight.kilograms(),
        )
    }

    pub fn id(&self) -> SettlementId {
        self.id
    }

    pub fn weighing_order_id(&self) -> WeighingOrderId {
        self.weighing_order_id
    }

    pub fn physical_net_weight(&self) -> Weight {
        self.physical_net_weight
    }

    /// Returns the loads in the order they were added
    pub fn provider_loads(&self) -> &[ProviderLoad] {
        &self.provider_loads
    }

    /// Returns the penalty from the last calculation, stale or not
    ///
    /// Prefer [`settled_penalty`](Self::settled_penalty), which refuses a
    /// result that no longer matches the loads.
    pub fn penalty(&self) -> Option<&DriverPenalty> {
        self.penalty.as_ref()
    }

    pub fn calculation_state(&self) -> CalculationState {
        self.calculation
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Sum of documentary weights in kilograms, zero with no loads
    pub fn total_documentary_weight(&self) -> Result<Decimal, SettlementError> {
        documentary_total(&self.provider_loads)
    }

    /// Highest unit price among the loads
    pub fn max_unit_price(&self) -> Option<UnitPrice> {
        self.provider_loads.iter().map(ProviderLoad::unit_price).max()
    }

    /// Returns true unless the stored result matches the current loads
    pub fn needs_recalculation(&self) -> bool {
        self.calculation != CalculationState::Current
    }

    /// Returns accumulated domain events and clears them
    pub fn take_events(&mut self) -> Vec<SettlementEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advances the version after a successful save
    ///
    /// Called by repositories only.
    pub fn increment_version(&mut self) {
        self.version += 1;
    }

    /// Attaches a provider load and returns its id
    ///
    /// A previous calculation becomes stale.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if a code is blank or a figure is not positive,
    /// and `Overflow` if the documentary total would leave the decimal range
    pub fn add_provider_load(
        &mut self,
        provider_code: &str,
        product_code: &str,
        documentary_weight: Decimal,
        unit_price: Decimal,
    ) -> Result<ProviderLoadId, SettlementError> {
        let load = ProviderLoad::new(
            ProviderLoadId::new_v7(),
            provider_code,
            product_code,
            documentary_weight,
            unit_price,
        )?;
        self.total_documentary_weight()?
            .checked_add(load.documentary_weight().kilograms())
            .ok_or(SettlementError::Overflow("documentary weight total"))?;
        let load_id = load.id();
        let now = Utc::now();

        self.events.push(SettlementEvent::ProviderLoadAdded {
            settlement_id: self.id,
            load_id,
            provider_code: load.provider_code().to_string(),
            documentary_weight: load.documentary_weight().kilograms(),
            timestamp: now,
        });
        debug!(
            settlement_id = %self.id,
            %load_id,
            provider = load.provider_code(),
            "provider load added"
        );

        self.provider_loads.push(load);
        if self.calculation == CalculationState::Current {
            self.calculation = CalculationState::Stale;
        }
        self.updated_at = now;
        Ok(load_id)
    }

    /// Reconciles the current loads without changing the settlement
    pub fn reconcile(&self) -> Result<Reconciliation, SettlementError> {
        reconcile(self.physical_net_weight, &self.provider_loads)
    }

    /// Runs reconciliation and stores its penalty, replacing any earlier one
    ///
    /// # Errors
    ///
    /// Returns `EmptyAggregate` when there are no loads and `Overflow` when
    /// the penalty total is out of range; the stored result is left untouched
    /// in both cases
    pub fn calculate_settlement(&mut self) -> Result<Option<&DriverPenalty>, SettlementError> {
        let reconciliation = self.reconcile()?;
        let now = Utc::now();

        self.events.push(SettlementEvent::SettlementCalculated {
            settlement_id: self.id,
            outcome: reconciliation.outcome,
            total_documentary_weight: reconciliation.total_documentary_weight,
            timestamp: now,
        });

        if let Some(penalty) = &reconciliation.penalty {
            info!(
                settlement_id = %self.id,
                missing = %penalty.missing_weight(),
                max_price = %penalty.applied_max_price(),
                total = %penalty.total_amount(),
                "driver penalty assessed"
            );
            self.events.push(SettlementEvent::PenaltyAssessed {
                settlement_id: self.id,
                penalty_id: penalty.id(),
                missing_weight: penalty.missing_weight().kilograms(),
                applied_max_price: penalty.applied_max_price().amount(),
                total_amount: penalty.total_amount().amount(),
                timestamp: now,
            });
        } else {
            debug!(settlement_id = %self.id, outcome = ?reconciliation.outcome, "no penalty due");
        }

        self.penalty = reconciliation.penalty;
        self.calculation = CalculationState::Current;
        self.updated_at = now;
        Ok(self.penalty.as_ref())
    }

    /// Returns the penalty of a current calculation
    ///
    /// # Errors
    ///
    /// Returns `NotCalculated` before the first calculation and
    /// `StaleCalculation` once loads changed after it
    pub fn settled_penalty(&self) -> Result<Option<&DriverPenalty>, SettlementError> {
        match self.calculation {
            CalculationState::Current => Ok(self.penalty.as_ref()),
            CalculationState::Stale => Err(SettlementError::StaleCalculation),
            CalculationState::NotCalculated => Err(SettlementError::NotCalculated),
        }
    }
}
