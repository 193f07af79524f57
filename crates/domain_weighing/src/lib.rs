//! Weighing Process Domain
//!
//! This crate models the weighing of a collection trip at the plant: the
//! loaded vehicle is weighed (gross), unloaded, then weighed empty (tare).
//! The difference is the net weight that later feeds trip settlement.
//! Hopper discharges are tracked alongside, independently of weight capture.
//!
//! # Weighing Lifecycle
//!
//! ```text
//! Pending -> GrossWeightCaptured -> TareWeightCaptured
//!                   \-> hopper discharges may start here
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_weighing::WeighingOrder;
//!
//! let mut order = WeighingOrder::open(trip_id)?;
//! order.record_gross_weight(dec!(18_400))?;
//! let discharge = order.start_hopper_discharge("HOPPER-2")?;
//! order.record_tare_weight(dec!(9_150))?;
//! assert_eq!(order.net_weight().map(|w| w.kilograms()), Some(dec!(9_250)));
//! ```

pub mod aggregate;
pub mod reading;
pub mod discharge;
pub mod events;
pub mod error;
pub mod ports;

pub use aggregate::{WeighingOrder, WeighingStatus};
pub use reading::{WeightReading, WeightType};
pub use discharge::HopperDischarge;
pub use events::WeighingEvent;
pub use error::WeighingError;
pub use ports::{WeighingOrderRepository, WeighingOrderRepositoryExt};
