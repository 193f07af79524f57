//! Weighing Domain Ports
//!
//! The `WeighingOrderRepository` trait is what the settlement orchestration
//! needs from storage: load an order by id and save its full state, readings
//! and discharges included, atomically.
//!
//! Saves use optimistic concurrency. A save succeeds only when the stored
//! version matches the version the caller loaded, and the saved copy comes
//! back with the version advanced.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_weighing::ports::{WeighingOrderRepository, WeighingOrderRepositoryExt};
//!
//! let mut order = repository.get_required(order_id).await?;
//! order.record_tare_weight(dec!(9_150))?;
//! let order = repository.save(order).await?;
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError, WeighingOrderId};

use crate::aggregate::WeighingOrder;

/// Storage port for weighing orders
#[async_trait]
pub trait WeighingOrderRepository: DomainPort {
    /// Loads an order by id
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no order has this id
    async fn get(&self, id: WeighingOrderId) -> Result<Option<WeighingOrder>, PortError>;

    /// Saves the full state of an order
    ///
    /// # Returns
    ///
    /// The stored order with its version advanced, or `PortError::Conflict`
    /// if another writer saved it first
    async fn save(&self, order: WeighingOrder) -> Result<WeighingOrder, PortError>;
}

/// Extension trait for WeighingOrderRepository with convenience methods
#[async_trait]
pub trait WeighingOrderRepositoryExt: WeighingOrderRepository {
    /// Loads an order or returns NotFound error
    async fn get_required(&self, id: WeighingOrderId) -> Result<WeighingOrder, PortError> {
        self.get(id)
            .await?
            .ok_or_else(|| PortError::not_found("WeighingOrder", id))
    }

    /// Checks if an order exists
    async fn exists(&self, id: WeighingOrderId) -> Result<bool, PortError> {
        Ok(self.get(id).await?.is_some())
    }
}

// Blanket implementation for all WeighingOrderRepository implementors
impl<T: WeighingOrderRepository + ?Sized> WeighingOrderRepositoryExt for T {}

/// In-memory implementation of WeighingOrderRepository
///
/// Used by the runner binary and by tests. Stores cloned aggregates, so
/// pending domain events are not persisted.
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use tracing::{debug, warn};

    /// In-memory weighing order store
    #[derive(Debug, Default, Clone)]
    pub struct InMemoryWeighingOrderRepository {
        orders: Arc<RwLock<HashMap<WeighingOrderId, WeighingOrder>>>,
    }

    impl InMemoryWeighingOrderRepository {
        /// Creates an empty repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns the number of stored orders
        pub async fn len(&self) -> usize {
            self.orders.read().await.len()
        }

        /// Returns true if no order is stored
        pub async fn is_empty(&self) -> bool {
            self.orders.read().await.is_empty()
        }
    }

    impl DomainPort for InMemoryWeighingOrderRepository {}

    #[async_trait]
    impl WeighingOrderRepository for InMemoryWeighingOrderRepository {
        async fn get(&self, id: WeighingOrderId) -> Result<Option<WeighingOrder>, PortError> {
            debug!(order_id = %id, "loading weighing order");
            Ok(self.orders.read().await.get(&id).cloned())
        }

        async fn save(&self, mut order: WeighingOrder) -> Result<WeighingOrder, PortError> {
            let mut orders = self.orders.write().await;
            let stored_version = orders.get(&order.id()).map(|o| o.version());

            match stored_version {
                Some(stored) if stored != order.version() => {
                    warn!(
                        order_id = %order.id(),
                        stored,
                        incoming = order.version(),
                        "weighing order version conflict"
                    );
                    return Err(PortError::conflict(format!(
                        "weighing order {} is at version {}, save was based on {}",
                        order.id(),
                        stored,
                        order.version()
                    )));
                }
                None if order.version() != 0 => {
                    return Err(PortError::conflict(format!(
                        "weighing order {} no longer exists",
                        order.id()
                    )));
                }
                _ => {}
            }

            order.take_events();
            order.increment_version();
            debug!(order_id = %order.id(), version = order.version(), "weighing order saved");
            orders.insert(order.id(), order.clone());
            Ok(order)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::InMemoryWeighingOrderRepository;
    use super::*;
    use core_kernel::CollectionTripId;
    use rust_decimal_macros::dec;

    fn new_order() -> WeighingOrder {
        WeighingOrder::open(CollectionTripId::new_v7()).unwrap()
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let repo = InMemoryWeighingOrderRepository::new();
        let order = new_order();
        let id = order.id();

        let saved = repo.save(order).await.unwrap();
        assert_eq!(saved.version(), 1);

        let loaded = repo.get_required(id).await.unwrap();
        assert_eq!(loaded.id(), id);
        assert_eq!(loaded.version(), 1);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let repo = InMemoryWeighingOrderRepository::new();
        let id = core_kernel::WeighingOrderId::new_v7();
        assert!(repo.get(id).await.unwrap().is_none());
        assert!(!repo.exists(id).await.unwrap());
        assert!(repo.get_required(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_saved_state_round_trips() {
        let repo = InMemoryWeighingOrderRepository::new();
        let mut order = new_order();
        order.record_gross_weight(dec!(18400)).unwrap();
        order.start_hopper_discharge("H-3").unwrap();
        order.record_tare_weight(dec!(9150)).unwrap();
        let id = order.id();
        repo.save(order).await.unwrap();

        let loaded = repo.get_required(id).await.unwrap();
        assert_eq!(loaded.readings().len(), 2);
        assert_eq!(loaded.discharges().len(), 1);
        assert_eq!(loaded.net_weight().unwrap().kilograms(), dec!(9250));
    }

    #[tokio::test]
    async fn test_stale_save_conflicts() {
        let repo = InMemoryWeighingOrderRepository::new();
        let order = new_order();
        let id = order.id();
        repo.save(order).await.unwrap();

        let mut first = repo.get_required(id).await.unwrap();
        let mut second = repo.get_required(id).await.unwrap();

        first.record_gross_weight(dec!(100)).unwrap();
        repo.save(first).await.unwrap();

        second.record_gross_weight(dec!(200)).unwrap();
        let err = repo.save(second).await.unwrap_err();
        assert_eq!(err.kind(), core_kernel::ErrorKind::Conflict);

        let stored = repo.get_required(id).await.unwrap();
        assert_eq!(stored.gross_reading().unwrap().weight().kilograms(), dec!(100));
    }
}
