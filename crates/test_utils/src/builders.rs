//! Test Data Builders
//!
//! Builders drive the aggregates through their real transition methods, so
//! anything they build satisfies the same invariants as production data.
//! They panic on invalid input since they only run inside tests.

use core_kernel::{CollectionTripId, SettlementId, WeighingOrderId};
use domain_settlement::TripSettlement;
use domain_weighing::WeighingOrder;
use rust_decimal::Decimal;

use crate::fixtures::{CodeFixtures, IdFixtures, PriceFixtures};

/// Builder for weighing orders in any capture state
pub struct WeighingOrderBuilder {
    id: WeighingOrderId,
    trip_id: CollectionTripId,
    gross: Option<Decimal>,
    tare: Option<Decimal>,
    hoppers: Vec<String>,
}

impl Default for WeighingOrderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WeighingOrderBuilder {
    /// Creates a builder for a pending order
    pub fn new() -> Self {
        Self {
            id: IdFixtures::weighing_order_id(),
            trip_id: IdFixtures::trip_id(),
            gross: None,
            tare: None,
            hoppers: Vec::new(),
        }
    }

    /// Sets the order ID
    pub fn with_id(mut self, id: WeighingOrderId) -> Self {
        self.id = id;
        self
    }

    /// Sets the trip ID
    pub fn with_trip_id(mut self, trip_id: CollectionTripId) -> Self {
        self.trip_id = trip_id;
        self
    }

    /// Captures a gross weight
    pub fn with_gross(mut self, kilograms: Decimal) -> Self {
        self.gross = Some(kilograms);
        self
    }

    /// Captures a tare weight after the gross weight
    pub fn with_tare(mut self, kilograms: Decimal) -> Self {
        self.tare = Some(kilograms);
        self
    }

    /// Starts a discharge on a hopper between gross and tare
    pub fn with_discharge(mut self, hopper_id: impl Into<String>) -> Self {
        self.hoppers.push(hopper_id.into());
        self
    }

    /// Shorthand for a fully weighed order with the given net weight
    pub fn weighed(net: Decimal) -> WeighingOrder {
        Self::new().with_gross(net * Decimal::TWO).with_tare(net).build()
    }

    /// Builds the order
    ///
    /// # Panics
    ///
    /// Panics if the figures are rejected by the aggregate
    pub fn build(self) -> WeighingOrder {
        let mut order = WeighingOrder::new(self.id, self.trip_id).expect("valid order ids");
        if let Some(gross) = self.gross {
            order.record_gross_weight(gross).expect("valid gross weight");
        }
        for hopper in &self.hoppers {
            order.start_hopper_discharge(hopper).expect("discharge after gross");
        }
        if let Some(tare) = self.tare {
            order.record_tare_weight(tare).expect("valid tare weight");
        }
        order
    }
}

struct LoadSpec {
    provider_code: String,
    product_code: String,
    documentary_weight: Decimal,
    unit_price: Decimal,
}

/// Builder for trip settlements with loads attached
pub struct TripSettlementBuilder {
    id: SettlementId,
    weighing_order_id: WeighingOrderId,
    physical_net_weight: Decimal,
    loads: Vec<LoadSpec>,
    calculated: bool,
}

impl TripSettlementBuilder {
    /// Creates a builder for a settlement with the given physical weight
    pub fn new(physical_net_weight: Decimal) -> Self {
        Self {
            id: SettlementId::new_v7(),
            weighing_order_id: IdFixtures::weighing_order_id(),
            physical_net_weight,
            loads: Vec::new(),
            calculated: false,
        }
    }

    /// Sets the weighing order reference
    pub fn with_weighing_order_id(mut self, id: WeighingOrderId) -> Self {
        self.weighing_order_id = id;
        self
    }

    /// Adds a load from the default provider and product
    pub fn with_load(self, documentary_weight: Decimal, unit_price: Decimal) -> Self {
        self.with_provider_load(
            CodeFixtures::provider(),
            CodeFixtures::product(),
            documentary_weight,
            unit_price,
        )
    }

    /// Adds a load at the default cardboard price
    pub fn with_cardboard_load(self, documentary_weight: Decimal) -> Self {
        self.with_load(documentary_weight, PriceFixtures::cardboard())
    }

    /// Adds a fully specified load
    pub fn with_provider_load(
        mut self,
        provider_code: &str,
        product_code: &str,
        documentary_weight: Decimal,
        unit_price: Decimal,
    ) -> Self {
        self.loads.push(LoadSpec {
            provider_code: provider_code.to_string(),
            product_code: product_code.to_string(),
            documentary_weight,
            unit_price,
        });
        self
    }

    /// Runs the calculation once the loads are attached
    pub fn calculated(mut self) -> Self {
        self.calculated = true;
        self
    }

    /// Builds the settlement
    ///
    /// # Panics
    ///
    /// Panics if the figures are rejected by the aggregate
    pub fn build(self) -> TripSettlement {
        let mut settlement =
            TripSettlement::new(self.id, self.weighing_order_id, self.physical_net_weight)
                .expect("valid settlement");
        for load in &self.loads {
            settlement
                .add_provider_load(
                    &load.provider_code,
                    &load.product_code,
                    load.documentary_weight,
                    load.unit_price,
                )
                .expect("valid provider load");
        }
        if self.calculated {
            settlement.calculate_settlement().expect("settlement with loads");
        }
        settlement
    }
}
