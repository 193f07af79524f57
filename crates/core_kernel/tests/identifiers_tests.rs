//! Unit tests for the identifier types
//!
//! Tests cover creation, parsing, conversion and display formatting.

use core_kernel::{
    CollectionTripId, DischargeId, EntityId, PenaltyId, ProviderLoadId, SettlementId,
    WeighingOrderId, WeightReadingId,
};
use uuid::Uuid;

mod weighing_order_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        assert_ne!(WeighingOrderId::new(), WeighingOrderId::new());
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = WeighingOrderId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = WeighingOrderId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = WeighingOrderId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_from_str_with_and_without_prefix() {
        let original = WeighingOrderId::new();
        let with_prefix: WeighingOrderId = original.to_string().parse().unwrap();
        let bare: WeighingOrderId = original.as_uuid().to_string().parse().unwrap();
        assert_eq!(original, with_prefix);
        assert_eq!(original, bare);
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("WGH-not-a-uuid".parse::<WeighingOrderId>().is_err());
    }
}

#[test]
fn test_prefixes() {
    assert_eq!(CollectionTripId::prefix(), "TRIP");
    assert_eq!(WeighingOrderId::prefix(), "WGH");
    assert_eq!(WeightReadingId::prefix(), "WRD");
    assert_eq!(DischargeId::prefix(), "DSC");
    assert_eq!(SettlementId::prefix(), "STL");
    assert_eq!(ProviderLoadId::prefix(), "PLD");
    assert_eq!(PenaltyId::prefix(), "PEN");
}

#[test]
fn test_nil_is_detected() {
    assert!(CollectionTripId::nil().is_nil());
    assert!(!CollectionTripId::new().is_nil());
    assert!(CollectionTripId::from_uuid(Uuid::nil()).is_nil());
}

#[test]
fn test_serde_is_transparent() {
    let id = SettlementId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    let back: SettlementId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}
