//! Pre-built Test Fixtures
//!
//! Ready-to-use figures for a typical recycling collection trip. The numbers
//! are chosen so that the standard scenarios land on round penalties.

use core_kernel::{CollectionTripId, WeighingOrderId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for weights in kilograms
pub struct WeightFixtures;

impl WeightFixtures {
    /// Gross weight of a loaded collection truck
    pub fn truck_gross() -> Decimal {
        dec!(18400)
    }

    /// Tare weight of the same truck empty
    pub fn truck_tare() -> Decimal {
        dec!(9150)
    }

    /// Net weight of the truck scenario
    pub fn truck_net() -> Decimal {
        dec!(9250)
    }

    /// A documentary weight of 100 kg, handy for the tolerance scenarios
    pub fn hundred() -> Decimal {
        dec!(100)
    }
}

/// Fixture for unit prices per kilogram
pub struct PriceFixtures;

impl PriceFixtures {
    /// Price of a low value material
    pub fn cardboard() -> Decimal {
        dec!(5)
    }

    /// Price of a higher value material
    pub fn aluminium() -> Decimal {
        dec!(8)
    }
}

/// Fixture for provider and product codes
pub struct CodeFixtures;

impl CodeFixtures {
    pub fn provider() -> &'static str {
        "PRV-001"
    }

    pub fn other_provider() -> &'static str {
        "PRV-002"
    }

    pub fn product() -> &'static str {
        "CARDBOARD"
    }

    pub fn hopper() -> &'static str {
        "HOPPER-1"
    }
}

/// Fixture for generating identifiers
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a new trip ID
    pub fn trip_id() -> CollectionTripId {
        CollectionTripId::new_v7()
    }

    /// Creates a new weighing order ID
    pub fn weighing_order_id() -> WeighingOrderId {
        WeighingOrderId::new_v7()
    }
}
