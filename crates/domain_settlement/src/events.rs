//! Domain events for the trip settlement aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{PenaltyId, ProviderLoadId, SettlementId, WeighingOrderId};

use crate::reconciliation::ReconciliationOutcome;

/// Domain events emitted by the TripSettlement aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettlementEvent {
    /// A settlement was opened from a weighed order
    SettlementOpened {
        settlement_id: SettlementId,
        weighing_order_id: WeighingOrderId,
        physical_net_weight: Decimal,
        timestamp: DateTime<Utc>,
    },

    /// A provider load was attached
    ProviderLoadAdded {
        settlement_id: SettlementId,
        load_id: ProviderLoadId,
        provider_code: String,
        documentary_weight: Decimal,
        timestamp: DateTime<Utc>,
    },

    /// A reconciliation pass completed
    SettlementCalculated {
        settlement_id: SettlementId,
        outcome: ReconciliationOutcome,
        total_documentary_weight: Decimal,
        timestamp: DateTime<Utc>,
    },

    /// The driver was charged for missing weight
    PenaltyAssessed {
        settlement_id: SettlementId,
        penalty_id: PenaltyId,
        missing_weight: Decimal,
        applied_max_price: Decimal,
        total_amount: Decimal,
        timestamp: DateTime<Utc>,
    },
}

impl SettlementEvent {
    /// Returns the settlement ID associated with this event
    pub fn settlement_id(&self) -> SettlementId {
        match self {
            SettlementEvent::SettlementOpened { settlement_id, .. } => *settlement_id,
            SettlementEvent::ProviderLoadAdded { settlement_id, .. } => *settlement_id,
            SettlementEvent::SettlementCalculated { settlement_id, .. } => *settlement_id,
            SettlementEvent::PenaltyAssessed { settlement_id, .. } => *settlement_id,
        }
    }

    /// Returns the timestamp of this event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            SettlementEvent::SettlementOpened { timestamp, .. } => *timestamp,
            SettlementEvent::ProviderLoadAdded { timestamp, .. } => *timestamp,
            SettlementEvent::SettlementCalculated { timestamp, .. } => *timestamp,
            SettlementEvent::PenaltyAssessed { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            SettlementEvent::SettlementOpened { .. } => "SettlementOpened",
            SettlementEvent::ProviderLoadAdded { .. } => "ProviderLoadAdded",
            SettlementEvent::SettlementCalculated { .. } => "SettlementCalculated",
            SettlementEvent::PenaltyAssessed { .. } => "PenaltyAssessed",
        }
    }
}
