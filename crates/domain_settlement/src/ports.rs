//! Settlement Domain Ports
//!
//! Storage port for trip settlements. A save persists the settlement together
//! with its provider loads and penalty as one unit, under the same optimistic
//! version check as the weighing order port.

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError, SettlementId};

use crate::aggregate::TripSettlement;

/// Storage port for trip settlements
#[async_trait]
pub trait TripSettlementRepository: DomainPort {
    /// Loads a settlement by id, `Ok(None)` when absent
    async fn get(&self, id: SettlementId) -> Result<Option<TripSettlement>, PortError>;

    /// Saves the full state of a settlement
    ///
    /// # Returns
    ///
    /// The stored settlement with its version advanced, or
    /// `PortError::Conflict` if another writer saved it first
    async fn save(&self, settlement: TripSettlement) -> Result<TripSettlement, PortError>;
}

/// Extension trait for TripSettlementRepository with convenience methods
#[async_trait]
pub trait TripSettlementRepositoryExt: TripSettlementRepository {
    /// Loads a settlement or returns NotFound error
    async fn get_required(&self, id: SettlementId) -> Result<TripSettlement, PortError> {
        self.get(id)
            .await?
            .ok_or_else(|| PortError::not_found("TripSettlement", id))
    }
}

// Blanket implementation for all TripSettlementRepository implementors
impl<T: TripSettlementRepository + ?Sized> TripSettlementRepositoryExt for T {}

/// In-memory implementation of TripSettlementRepository
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use tracing::{debug, warn};

    /// In-memory trip settlement store
    #[derive(Debug, Default, Clone)]
    pub struct InMemoryTripSettlementRepository {
        settlements: Arc<RwLock<HashMap<SettlementId, TripSettlement>>>,
    }

    impl InMemoryTripSettlementRepository {
        /// Creates an empty repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns the number of stored settlements
        pub async fn len(&self) -> usize {
            self.settlements.read().await.len()
        }

        /// Returns true if no settlement is stored
        pub async fn is_empty(&self) -> bool {
            self.settlements.read().await.is_empty()
        }
    }

    impl DomainPort for InMemoryTripSettlementRepository {}

    #[async_trait]
    impl TripSettlementRepository for InMemoryTripSettlementRepository {
        async fn get(&self, id: SettlementId) -> Result<Option<TripSettlement>, PortError> {
            debug!(settlement_id = %id, "loading trip settlement");
            Ok(self.settlements.read().await.get(&id).cloned())
        }

        async fn save(&self, mut settlement: TripSettlement) -> Result<TripSettlement, PortError> {
            let mut settlements = self.settlements.write().await;
            let stored_version = settlements.get(&settlement.id()).map(|s| s.version());

            match stored_version {
                Some(stored) if stored != settlement.version() => {
                    warn!(
                        settlement_id = %settlement.id(),
                        stored,
                        incoming = settlement.version(),
                        "trip settlement version conflict"
                    );
                    return Err(PortError::conflict(format!(
                        "trip settlement {} is at version {}, save was based on {}",
                        settlement.id(),
                        stored,
                        settlement.version()
                    )));
                }
                None if settlement.version() != 0 => {
                    return Err(PortError::conflict(format!(
                        "trip settlement {} no longer exists",
                        settlement.id()
                    )));
                }
                _ => {}
            }

            settlement.take_events();
            settlement.increment_version();
            debug!(
                settlement_id = %settlement.id(),
                version = settlement.version(),
                "trip settlement saved"
            );
            settlements.insert(settlement.id(), settlement.clone());
            Ok(settlement)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::InMemoryTripSettlementRepository;
    use super::*;
    use core_kernel::{ErrorKind, WeighingOrderId};
    use rust_decimal_macros::dec;

    fn new_settlement() -> TripSettlement {
        TripSettlement::new(SettlementId::new_v7(), WeighingOrderId::new_v7(), dec!(80)).unwrap()
    }

    #[tokio::test]
    async fn test_save_persists_loads_and_penalty() {
        let repo = InMemoryTripSettlementRepository::new();
        let mut settlement = new_settlement();
        settlement.add_provider_load("PRV-1", "PET", dec!(100), dec!(5)).unwrap();
        settlement.calculate_settlement().unwrap();
        let id = settlement.id();

        let saved = repo.save(settlement).await.unwrap();
        assert_eq!(saved.version(), 1);

        let loaded = repo.get_required(id).await.unwrap();
        assert_eq!(loaded.provider_loads().len(), 1);
        assert_eq!(loaded.settled_penalty().unwrap().unwrap().total_amount().amount(), dec!(50));
    }

    #[tokio::test]
    async fn test_missing_settlement() {
        let repo = InMemoryTripSettlementRepository::new();
        let err = repo.get_required(SettlementId::new_v7()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_writers_conflict() {
        let repo = InMemoryTripSettlementRepository::new();
        let settlement = new_settlement();
        let id = settlement.id();
        repo.save(settlement).await.unwrap();

        let mut first = repo.get_required(id).await.unwrap();
        let mut second = repo.get_required(id).await.unwrap();
        first.add_provider_load("PRV-1", "PET", dec!(10), dec!(1)).unwrap();
        second.add_provider_load("PRV-2", "PET", dec!(10), dec!(1)).unwrap();

        repo.save(first).await.unwrap();
        assert_eq!(repo.save(second).await.unwrap_err().kind(), ErrorKind::Conflict);
        assert_eq!(repo.get_required(id).await.unwrap().provider_loads().len(), 1);
    }

    #[tokio::test]
    async fn test_versioned_settlement_missing_from_store_conflicts() {
        let repo = InMemoryTripSettlementRepository::new();
        let mut settlement = new_settlement();
        settlement.increment_version();
        assert!(repo.save(settlement).await.is_err());
    }
}
