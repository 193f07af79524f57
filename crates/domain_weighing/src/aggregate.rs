//! Weighing Order Aggregate Root
//!
//! The WeighingOrder is the consistency boundary for weighing one collection
//! trip. Readings must be captured in order and the derived net weight is
//! never stored without the readings that produced it.
//!
//! # Invariants
//!
//! - At most one gross and one tare reading
//! - Tare is strictly below gross, so the net weight is positive
//! - A net weight exists exactly when the status is at least `TareWeightCaptured`
//! - Readings and discharges are append-only and the status never moves back

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use core_kernel::validation::require_id;
use core_kernel::{CollectionTripId, DischargeId, WeighingOrderId, Weight};

use crate::discharge::HopperDischarge;
use crate::error::WeighingError;
use crate::events::WeighingEvent;
use crate::reading::{WeightReading, WeightType};

/// Weighing lifecycle states
///
/// Ordered so that "at least tare captured" is a plain comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeighingStatus {
    /// Opened, nothing weighed yet
    Pending,
    /// Loaded vehicle weighed
    GrossWeightCaptured,
    /// Empty vehicle weighed, net weight known
    TareWeightCaptured,
    /// Reserved for a completed unloading; no operation assigns it today
    Discharged,
}

impl fmt::Display for WeighingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeighingStatus::Pending => "Pending",
            WeighingStatus::GrossWeightCaptured => "GrossWeightCaptured",
            WeighingStatus::TareWeightCaptured => "TareWeightCaptured",
            WeighingStatus::Discharged => "Discharged",
        };
        f.write_str(name)
    }
}

/// The WeighingOrder aggregate root
///
/// # State Machine
///
/// - Pending -> GrossWeightCaptured (via record_gross_weight)
/// - GrossWeightCaptured -> TareWeightCaptured (via record_tare_weight)
///
/// Discharges start only while `GrossWeightCaptured` and do not move the
/// status. Completing a discharge is allowed in any status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeighingOrder {
    /// Unique order identifier
    id: WeighingOrderId,
    /// Trip being weighed (reference only)
    collection_trip_id: CollectionTripId,
    /// Current lifecycle state
    status: WeighingStatus,
    /// Gross minus tare, once both are captured
    net_weight: Option<Weight>,
    /// Captured readings in capture order
    readings: Vec<WeightReading>,
    /// Hopper discharges in start order
    discharges: Vec<HopperDischarge>,
    /// Domain events to be published
    #[serde(skip)]
    events: Vec<WeighingEvent>,
    /// Version for optimistic concurrency
    version: u32,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl WeighingOrder {
    /// Creates a pending weighing order
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if either identifier is nil
    pub fn new(
        id: WeighingOrderId,
        collection_trip_id: CollectionTripId,
    ) -> Result<Self, WeighingError> {
        let id = require_id("weighing_order_id", id)?;
        let collection_trip_id = require_id("collection_trip_id", collection_trip_id)?;
        let now = Utc::now();

        debug!(order_id = %id, trip_id = %collection_trip_id, "weighing order opened");

        Ok(Self {
            id,
            collection_trip_id,
            status: WeighingStatus::Pending,
            net_weight: None,
            readings: Vec::new(),
            discharges: Vec::new(),
            events: vec![WeighingEvent::WeighingOrderOpened {
                order_id: id,
                collection_trip_id,
                timestamp: now,
            }],
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Opens a weighing order for a trip with a fresh identifier
    pub fn open(collection_trip_id: CollectionTripId) -> Result<Self, WeighingError> {
        Self::new(WeighingOrderId::new_v7(), collection_trip_id)
    }

    /// Returns the order ID
    pub fn id(&self) -> WeighingOrderId {
        self.id
    }

    /// Returns the collection trip ID
    pub fn collection_trip_id(&self) -> CollectionTripId {
        self.collection_trip_id
    }

    /// Returns the current status
    pub fn status(&self) -> WeighingStatus {
        self.status
    }

    /// Returns the net weight once tare has been captured
    pub fn net_weight(&self) -> Option<Weight> {
        self.net_weight
    }

    /// Returns the readings in capture order
    pub fn readings(&self) -> &[WeightReading] {
        &self.readings
    }

    /// Returns the discharges in start order
    pub fn discharges(&self) -> &[HopperDischarge] {
        &self.discharges
    }

    /// Returns the optimistic concurrency version
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the gross reading if captured
    pub fn gross_reading(&self) -> Option<&WeightReading> {
        self.reading_of(WeightType::Gross)
    }

    /// Returns the tare reading if captured
    pub fn tare_reading(&self) -> Option<&WeightReading> {
        self.reading_of(WeightType::Tare)
    }

    /// Returns discharges that have not been completed
    pub fn open_discharges(&self) -> impl Iterator<Item = &HopperDischarge> {
        self.discharges.iter().filter(|d| !d.is_completed())
    }

    /// Checks if both weights are captured and the net weight is known
    pub fn is_weighed(&self) -> bool {
        self.status >= WeighingStatus::TareWeightCaptured && self.net_weight.is_some()
    }

    /// Returns accumulated domain events and clears them
    pub fn take_events(&mut self) -> Vec<WeighingEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advances the version after a successful save
    ///
    /// Called by repositories only.
    pub fn increment_version(&mut self) {
        self.version += 1;
    }

    /// Records the loaded vehicle's weight
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the order is `Pending`, and
    /// `InvalidValue` if the weight is not positive.
    pub fn record_gross_weight(&mut self, kilograms: Decimal) -> Result<(), WeighingError> {
        self.require_status("record gross weight", WeighingStatus::Pending)?;
        let reading = WeightReading::capture(WeightType::Gross, kilograms)?;
        let now = Utc::now();

        self.events.push(WeighingEvent::GrossWeightRecorded {
            order_id: self.id,
            reading_id: reading.id(),
            kilograms: reading.weight().kilograms(),
            timestamp: now,
        });
        debug!(order_id = %self.id, gross = %reading.weight(), "gross weight captured");

        self.readings.push(reading);
        self.status = WeighingStatus::GrossWeightCaptured;
        self.updated_at = now;
        Ok(())
    }

    /// Records the empty vehicle's weight and derives the net weight
    ///
    /// # Errors
    ///
    /// Checked in this order: `InvalidState` unless `GrossWeightCaptured`,
    /// `InvalidValue` if the weight is not positive, `InvariantViolation` if
    /// there is no gross reading or tare is not strictly below gross.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// order.record_gross_weight(dec!(100))?;
    /// order.record_tare_weight(dec!(30))?;
    /// assert_eq!(order.net_weight().unwrap().kilograms(), dec!(70));
    /// ```
    pub fn record_tare_weight(&mut self, kilograms: Decimal) -> Result<(), WeighingError> {
        self.require_status("record tare weight", WeighingStatus::GrossWeightCaptured)?;
        let reading = WeightReading::capture(WeightType::Tare, kilograms)?;

        let gross = self
            .gross_reading()
            .map(|r| r.weight())
            .ok_or_else(|| WeighingError::invariant("no gross reading captured"))?;
        let net = gross.checked_sub(&reading.weight()).ok_or_else(|| {
            WeighingError::invariant(format!(
                "tare {} must be less than gross {}",
                reading.weight(),
                gross
            ))
        })?;
        let now = Utc::now();

        self.events.push(WeighingEvent::TareWeightRecorded {
            order_id: self.id,
            reading_id: reading.id(),
            kilograms: reading.weight().kilograms(),
            net_kilograms: net.kilograms(),
            timestamp: now,
        });
        debug!(order_id = %self.id, tare = %reading.weight(), net = %net, "tare weight captured");

        self.readings.push(reading);
        self.net_weight = Some(net);
        self.status = WeighingStatus::TareWeightCaptured;
        self.updated_at = now;
        Ok(())
    }

    /// Starts discharging a hopper and returns the new discharge's id
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless `GrossWeightCaptured`, and
    /// `InvalidValue` if the hopper id is blank.
    pub fn start_hopper_discharge(
        &mut self,
        hopper_id: &str,
    ) -> Result<DischargeId, WeighingError> {
        self.require_status("start hopper discharge", WeighingStatus::GrossWeightCaptured)?;
        let now = Utc::now();
        let discharge = HopperDischarge::start(DischargeId::new_v7(), hopper_id, now)?;
        let discharge_id = discharge.id();

        self.events.push(WeighingEvent::HopperDischargeStarted {
            order_id: self.id,
            discharge_id,
            hopper_id: discharge.hopper_id().to_string(),
            timestamp: now,
        });
        debug!(
            order_id = %self.id,
            %discharge_id,
            hopper_id = discharge.hopper_id(),
            "hopper discharge started"
        );

        self.discharges.push(discharge);
        self.updated_at = now;
        Ok(discharge_id)
    }

    /// Completes an open discharge
    ///
    /// # Errors
    ///
    /// Returns `DischargeNotFound` for an unknown id,
    /// `DischargeAlreadyCompleted` on a second completion and `InvalidValue`
    /// if `end_time` precedes the discharge start.
    pub fn complete_hopper_discharge(
        &mut self,
        discharge_id: DischargeId,
        end_time: DateTime<Utc>,
    ) -> Result<(), WeighingError> {
        let discharge = self
            .discharges
            .iter_mut()
            .find(|d| d.id() == discharge_id)
            .ok_or(WeighingError::DischargeNotFound(discharge_id))?;
        discharge.complete(end_time)?;

        let now = Utc::now();
        self.events.push(WeighingEvent::HopperDischargeCompleted {
            order_id: self.id,
            discharge_id,
            ended_at: end_time,
            timestamp: now,
        });
        debug!(order_id = %self.id, %discharge_id, "hopper discharge completed");

        self.updated_at = now;
        Ok(())
    }

    fn reading_of(&self, weight_type: WeightType) -> Option<&WeightReading> {
        self.readings.iter().find(|r| r.weight_type() == weight_type)
    }

    fn require_status(
        &self,
        operation: &'static str,
        expected: WeighingStatus,
    ) -> Result<(), WeighingError> {
        if self.status != expected {
            return Err(WeighingError::InvalidState {
                operation,
                current: self.status,
                expected,
            });
        }
        Ok(())
    }
}
