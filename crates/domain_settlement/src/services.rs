//! Settlement application service
//!
//! Orchestrates the hand-off from weighing to settlement. The aggregates never
//! reference each other; this service reads the net weight of a weighed order
//! and opens a settlement from it, then drives the settlement through its
//! repository.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

use core_kernel::{ErrorKind, PortError, ProviderLoadId, SettlementId, WeighingOrderId};
use domain_weighing::{WeighingOrderRepository, WeighingOrderRepositoryExt, WeighingStatus};

use crate::aggregate::TripSettlement;
use crate::error::SettlementError;
use crate::penalty::DriverPenalty;
use crate::ports::{TripSettlementRepository, TripSettlementRepositoryExt};

/// Errors returned by the settlement service
#[derive(Debug, Error)]
pub enum SettlementServiceError {
    /// The settlement rejected the operation
    #[error(transparent)]
    Settlement(#[from] SettlementError),

    /// Storage failed or the aggregate was not found
    #[error(transparent)]
    Port(#[from] PortError),

    /// The weighing order has no net weight yet
    #[error("Weighing order {order_id} is not weighed (status {status})")]
    WeighingIncomplete {
        order_id: WeighingOrderId,
        status: WeighingStatus,
    },
}

impl SettlementServiceError {
    /// Returns the taxonomy kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SettlementServiceError::Settlement(e) => e.kind(),
            SettlementServiceError::Port(e) => e.kind(),
            SettlementServiceError::WeighingIncomplete { .. } => ErrorKind::InvalidState,
        }
    }
}

/// A provider load as submitted by a caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderLoadRequest {
    pub provider_code: String,
    pub product_code: String,
    pub documentary_weight: Decimal,
    pub unit_price: Decimal,
}

/// Service for opening and calculating trip settlements
///
/// Every mutating call loads the aggregate, applies one change and saves it.
/// A concurrent save of the same aggregate surfaces as `PortError::Conflict`;
/// the service does not retry.
pub struct SettlementService {
    weighing_orders: Arc<dyn WeighingOrderRepository>,
    settlements: Arc<dyn TripSettlementRepository>,
}

impl SettlementService {
    /// Creates a new settlement service
    pub fn new(
        weighing_orders: Arc<dyn WeighingOrderRepository>,
        settlements: Arc<dyn TripSettlementRepository>,
    ) -> Self {
        Self {
            weighing_orders,
            settlements,
        }
    }

    /// Opens a settlement for a weighed order
    ///
    /// # Errors
    ///
    /// Returns `Port(NotFound)` for an unknown order and `WeighingIncomplete`
    /// unless its tare weight has been captured
    #[instrument(skip(self), fields(weighing_order_id = %weighing_order_id))]
    pub async fn open_settlement(
        &self,
        weighing_order_id: WeighingOrderId,
    ) -> Result<SettlementId, SettlementServiceError> {
        let order = self.weighing_orders.get_required(weighing_order_id).await?;
        let net_weight = match order.net_weight() {
            Some(net) if order.status() >= WeighingStatus::TareWeightCaptured => net,
            _ => {
                return Err(SettlementServiceError::WeighingIncomplete {
                    order_id: weighing_order_id,
                    status: order.status(),
                })
            }
        };

        let settlement = TripSettlement::open(weighing_order_id, net_weight)?;
        let saved = self.persist(settlement).await?;
        info!(settlement_id = %saved.id(), physical = %net_weight, "trip settlement opened");
        Ok(saved.id())
    }

    /// Adds a provider load to a settlement
    #[instrument(
        skip(self, request),
        fields(settlement_id = %settlement_id, provider = %request.provider_code)
    )]
    pub async fn add_provider_load(
        &self,
        settlement_id: SettlementId,
        request: ProviderLoadRequest,
    ) -> Result<ProviderLoadId, SettlementServiceError> {
        let mut settlement = self.settlements.get_required(settlement_id).await?;
        let load_id = settlement.add_provider_load(
            &request.provider_code,
            &request.product_code,
            request.documentary_weight,
            request.unit_price,
        )?;
        self.persist(settlement).await?;
        Ok(load_id)
    }

    /// Calculates a settlement and returns the penalty, if any
    #[instrument(skip(self), fields(settlement_id = %settlement_id))]
    pub async fn calculate(
        &self,
        settlement_id: SettlementId,
    ) -> Result<Option<DriverPenalty>, SettlementServiceError> {
        let mut settlement = self.settlements.get_required(settlement_id).await?;
        let penalty = settlement.calculate_settlement()?.cloned();
        self.persist(settlement).await?;
        Ok(penalty)
    }

    /// Loads a settlement
    #[instrument(skip(self), fields(settlement_id = %settlement_id))]
    pub async fn settlement(
        &self,
        settlement_id: SettlementId,
    ) -> Result<TripSettlement, SettlementServiceError> {
        Ok(self.settlements.get_required(settlement_id).await?)
    }

    async fn persist(
        &self,
        mut settlement: TripSettlement,
    ) -> Result<TripSettlement, SettlementServiceError> {
        for event in settlement.take_events() {
            debug!(
                settlement_id = %event.settlement_id(),
                event_type = event.event_type(),
                "settlement event"
            );
        }
        Ok(self.settlements.save(settlement).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::memory::InMemoryTripSettlementRepository;
    use core_kernel::CollectionTripId;
    use domain_weighing::ports::memory::InMemoryWeighingOrderRepository;
    use domain_weighing::WeighingOrder;
    use rust_decimal_macros::dec;

    async fn service_with_order(order: WeighingOrder) -> SettlementService {
        let orders = InMemoryWeighingOrderRepository::new();
        orders.save(order).await.unwrap();
        SettlementService::new(
            Arc::new(orders),
            Arc::new(InMemoryTripSettlementRepository::new()),
        )
    }

    fn load(kg: Decimal, price: Decimal) -> ProviderLoadRequest {
        ProviderLoadRequest {
            provider_code: "PRV-1".to_string(),
            product_code: "PET".to_string(),
            documentary_weight: kg,
            unit_price: price,
        }
    }

    #[tokio::test]
    async fn test_open_requires_weighed_order() {
        let mut order = WeighingOrder::open(CollectionTripId::new_v7()).unwrap();
        order.record_gross_weight(dec!(100)).unwrap();
        let order_id = order.id();
        let service = service_with_order(order).await;

        let err = service.open_settlement(order_id).await.unwrap_err();
        assert!(matches!(
            err,
            SettlementServiceError::WeighingIncomplete {
                status: WeighingStatus::GrossWeightCaptured,
                ..
            }
        ));
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[tokio::test]
    async fn test_unknown_order_is_not_found() {
        let service = SettlementService::new(
            Arc::new(InMemoryWeighingOrderRepository::new()),
            Arc::new(InMemoryTripSettlementRepository::new()),
        );
        let err = service.open_settlement(WeighingOrderId::new_v7()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_open_add_calculate() {
        let mut order = WeighingOrder::open(CollectionTripId::new_v7()).unwrap();
        order.record_gross_weight(dec!(110)).unwrap();
        order.record_tare_weight(dec!(30)).unwrap();
        let order_id = order.id();
        let service = service_with_order(order).await;

        let settlement_id = service.open_settlement(order_id).await.unwrap();
        service.add_provider_load(settlement_id, load(dec!(100), dec!(5))).await.unwrap();
        let penalty = service.calculate(settlement_id).await.unwrap().unwrap();
        assert_eq!(penalty.total_amount().amount(), dec!(50));

        let settlement = service.settlement(settlement_id).await.unwrap();
        assert_eq!(settlement.weighing_order_id(), order_id);
        assert_eq!(settlement.physical_net_weight().kilograms(), dec!(80));
        assert_eq!(settlement.version(), 3);
    }

    #[tokio::test]
    async fn test_invalid_load_is_not_saved() {
        let mut order = WeighingOrder::open(CollectionTripId::new_v7()).unwrap();
        order.record_gross_weight(dec!(110)).unwrap();
        order.record_tare_weight(dec!(30)).unwrap();
        let order_id = order.id();
        let service = service_with_order(order).await;

        let settlement_id = service.open_settlement(order_id).await.unwrap();
        let err = service
            .add_provider_load(settlement_id, load(dec!(0), dec!(5)))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);

        let settlement = service.settlement(settlement_id).await.unwrap();
        assert!(settlement.provider_loads().is_empty());
        assert_eq!(settlement.version(), 1);
    }
}
