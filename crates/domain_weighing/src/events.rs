//! Domain events for the weighing order aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CollectionTripId, DischargeId, WeighingOrderId, WeightReadingId};

/// Domain events emitted by the WeighingOrder aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WeighingEvent {
    /// A weighing order was opened for a trip
    WeighingOrderOpened {
        order_id: WeighingOrderId,
        collection_trip_id: CollectionTripId,
        timestamp: DateTime<Utc>,
    },

    /// The loaded vehicle was weighed
    GrossWeightRecorded {
        order_id: WeighingOrderId,
        reading_id: WeightReadingId,
        kilograms: Decimal,
        timestamp: DateTime<Utc>,
    },

    /// The empty vehicle was weighed and the net weight derived
    TareWeightRecorded {
        order_id: WeighingOrderId,
        reading_id: WeightReadingId,
        kilograms: Decimal,
        net_kilograms: Decimal,
        timestamp: DateTime<Utc>,
    },

    /// A hopper started discharging
    HopperDischargeStarted {
        order_id: WeighingOrderId,
        discharge_id: DischargeId,
        hopper_id: String,
        timestamp: DateTime<Utc>,
    },

    /// A hopper discharge was completed
    HopperDischargeCompleted {
        order_id: WeighingOrderId,
        discharge_id: DischargeId,
        ended_at: DateTime<Utc>,
        timestamp: DateTime<Utc>,
    },
}

impl WeighingEvent {
    /// Returns the weighing order ID associated with this event
    pub fn order_id(&self) -> WeighingOrderId {
        match self {
            WeighingEvent::WeighingOrderOpened { order_id, .. } => *order_id,
            WeighingEvent::GrossWeightRecorded { order_id, .. } => *order_id,
            WeighingEvent::TareWeightRecorded { order_id, .. } => *order_id,
            WeighingEvent::HopperDischargeStarted { order_id, .. } => *order_id,
            WeighingEvent::HopperDischargeCompleted { order_id, .. } => *order_id,
        }
    }

    /// Returns the timestamp of this event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            WeighingEvent::WeighingOrderOpened { timestamp, .. } => *timestamp,
            WeighingEvent::GrossWeightRecorded { timestamp, .. } => *timestamp,
            WeighingEvent::TareWeightRecorded { timestamp, .. } => *timestamp,
            WeighingEvent::HopperDischargeStarted { timestamp, .. } => *timestamp,
            WeighingEvent::HopperDischargeCompleted { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            WeighingEvent::WeighingOrderOpened { .. } => "WeighingOrderOpened",
            WeighingEvent::GrossWeightRecorded { .. } => "GrossWeightRecorded",
            WeighingEvent::TareWeightRecorded { .. } => "TareWeightRecorded",
            WeighingEvent::HopperDischargeStarted { .. } => "HopperDischargeStarted",
            WeighingEvent::HopperDischargeCompleted { .. } => "HopperDischargeCompleted",
        }
    }
}
