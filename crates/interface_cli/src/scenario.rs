//! Trip scenarios and their settlement report
//!
//! A scenario is the JSON description of one collection trip:
//!
//! ```json
//! {
//!   "gross_weight": "18400",
//!   "tare_weight": "9150",
//!   "hoppers": [{ "hopper_id": "HOPPER-1", "discharge_minutes": 25 }],
//!   "loads": [
//!     { "provider_code": "PRV-001", "product_code": "CARDBOARD",
//!       "documentary_weight": "6000", "unit_price": "0.12" }
//!   ]
//! }
//! ```

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use core_kernel::{CollectionTripId, SettlementId, ValidationError, WeighingOrderId};
use domain_settlement::ports::memory::InMemoryTripSettlementRepository;
use domain_settlement::{
    DriverPenalty, ProviderLoadRequest, Reconciliation, SettlementService, SettlementServiceError,
};
use domain_weighing::ports::memory::InMemoryWeighingOrderRepository;
use domain_weighing::{WeighingError, WeighingOrder, WeighingOrderRepository, WeighingStatus};

use crate::error::RunnerError;

/// A hopper discharged during the trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopperScenario {
    pub hopper_id: String,
    /// Minutes until the discharge completes; left open when absent
    #[serde(default)]
    pub discharge_minutes: Option<i64>,
}

/// One collection trip to weigh and settle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripScenario {
    /// Trip reference; generated when absent
    #[serde(default)]
    pub trip_id: Option<CollectionTripId>,
    pub gross_weight: Decimal,
    pub tare_weight: Decimal,
    #[serde(default)]
    pub hoppers: Vec<HopperScenario>,
    pub loads: Vec<ProviderLoadRequest>,
}

/// Outcome of a scenario run
#[derive(Debug, Clone, Serialize)]
pub struct SettlementReport {
    pub collection_trip_id: CollectionTripId,
    pub weighing_order_id: WeighingOrderId,
    pub settlement_id: SettlementId,
    pub weighing_status: WeighingStatus,
    pub net_weight: Decimal,
    pub open_discharges: usize,
    /// Figures behind the result
    pub reconciliation: Reconciliation,
    /// Penalty of the stored calculation
    pub penalty: Option<DriverPenalty>,
}

/// Runs scenarios over in-memory storage
pub struct ScenarioRunner {
    orders: Arc<InMemoryWeighingOrderRepository>,
    service: SettlementService,
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioRunner {
    /// Creates a runner with empty repositories
    pub fn new() -> Self {
        let orders = Arc::new(InMemoryWeighingOrderRepository::new());
        let settlements = Arc::new(InMemoryTripSettlementRepository::new());
        let service = SettlementService::new(orders.clone(), settlements);
        Self { orders, service }
    }

    /// Weighs the trip, opens its settlement, attaches the loads and calculates
    ///
    /// # Errors
    ///
    /// Returns the first domain or storage failure; nothing is retried
    #[instrument(skip(self, scenario), fields(loads = scenario.loads.len()))]
    pub async fn run(&self, scenario: &TripScenario) -> Result<SettlementReport, RunnerError> {
        let trip_id = scenario.trip_id.unwrap_or_else(CollectionTripId::new_v7);
        let order = weigh_trip(trip_id, scenario)?;
        let order = self.orders.save(order).await?;
        info!(
            order_id = %order.id(),
            net = ?order.net_weight().map(|w| w.kilograms()),
            "trip weighed"
        );

        let settlement_id = self.service.open_settlement(order.id()).await?;
        for load in &scenario.loads {
            self.service.add_provider_load(settlement_id, load.clone()).await?;
        }
        self.service.calculate(settlement_id).await?;

        let settlement = self.service.settlement(settlement_id).await?;
        let reconciliation = settlement
            .reconcile()
            .map_err(SettlementServiceError::from)?;
        let penalty = settlement
            .settled_penalty()
            .map_err(SettlementServiceError::from)?
            .cloned();

        Ok(SettlementReport {
            collection_trip_id: trip_id,
            weighing_order_id: order.id(),
            settlement_id,
            weighing_status: order.status(),
            net_weight: settlement.physical_net_weight().kilograms(),
            open_discharges: order.open_discharges().count(),
            reconciliation,
            penalty,
        })
    }
}

/// Drives a weighing order through the scenario's readings and discharges
fn weigh_trip(
    trip_id: CollectionTripId,
    scenario: &TripScenario,
) -> Result<WeighingOrder, RunnerError> {
    let mut order = WeighingOrder::open(trip_id)?;
    order.record_gross_weight(scenario.gross_weight)?;

    let mut completions = Vec::new();
    for hopper in &scenario.hoppers {
        let discharge_id = order.start_hopper_discharge(&hopper.hopper_id)?;
        if let Some(minutes) = hopper.discharge_minutes {
            completions.push((discharge_id, minutes));
        }
    }

    order.record_tare_weight(scenario.tare_weight)?;

    for (discharge_id, minutes) in completions {
        let started_at = order
            .discharges()
            .iter()
            .find(|d| d.id() == discharge_id)
            .map(|d| d.started_at())
            .ok_or(WeighingError::DischargeNotFound(discharge_id))?;
        let ended_at = discharge_end(started_at, minutes).ok_or_else(|| {
            WeighingError::from(ValidationError::new(
                "discharge_minutes",
                format!("{minutes} minutes is outside the supported time range"),
            ))
        })?;
        order.complete_hopper_discharge(discharge_id, ended_at)?;
    }
    Ok(order)
}

fn discharge_end(started_at: DateTime<Utc>, minutes: i64) -> Option<DateTime<Utc>> {
    started_at.checked_add_signed(TimeDelta::try_minutes(minutes)?)
}
