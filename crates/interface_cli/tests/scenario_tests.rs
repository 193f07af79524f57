//! Tests for running trip scenarios end to end

use rust_decimal_macros::dec;

use core_kernel::ErrorKind;
use domain_settlement::ReconciliationOutcome;
use domain_weighing::WeighingStatus;
use interface_cli::{ScenarioRunner, TripScenario};

fn scenario(json: &str) -> TripScenario {
    serde_json::from_str(json).unwrap()
}

#[tokio::test]
async fn test_bundled_truck_scenario() {
    let scenario = scenario(include_str!("../scenarios/truck_trip.json"));
    let report = ScenarioRunner::new().run(&scenario).await.unwrap();

    assert_eq!(report.weighing_status, WeighingStatus::TareWeightCaptured);
    assert_eq!(report.net_weight, dec!(9250));
    assert_eq!(report.open_discharges, 1);
    assert_eq!(report.reconciliation.outcome, ReconciliationOutcome::Shortfall);
    assert_eq!(report.reconciliation.total_documentary_weight, dec!(10500));

    let penalty = report.penalty.unwrap();
    assert_eq!(penalty.missing_weight().kilograms(), dec!(200));
    assert_eq!(penalty.total_amount().amount(), dec!(60));
}

#[tokio::test]
async fn test_numeric_weights_and_balanced_trip() {
    let scenario = scenario(
        r#"{
            "gross_weight": 300,
            "tare_weight": 100,
            "loads": [
                { "provider_code": "P1", "product_code": "PET",
                  "documentary_weight": 190, "unit_price": 2 }
            ]
        }"#,
    );
    let report = ScenarioRunner::new().run(&scenario).await.unwrap();

    assert_eq!(report.reconciliation.outcome, ReconciliationOutcome::Balanced);
    assert_eq!(report.reconciliation.difference, dec!(10));
    assert!(report.penalty.is_none());
}

#[tokio::test]
async fn test_tare_above_gross_fails() {
    let scenario = scenario(
        r#"{ "gross_weight": "100", "tare_weight": "100.01", "loads": [] }"#,
    );
    let err = ScenarioRunner::new().run(&scenario).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvariantViolation);
}

#[tokio::test]
async fn test_scenario_without_loads_fails() {
    let scenario = scenario(r#"{ "gross_weight": "100", "tare_weight": "20", "loads": [] }"#);
    let err = ScenarioRunner::new().run(&scenario).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyAggregate);
}

#[tokio::test]
async fn test_report_serializes() {
    let scenario = scenario(include_str!("../scenarios/truck_trip.json"));
    let report = ScenarioRunner::new().run(&scenario).await.unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["weighing_status"], "TareWeightCaptured");
    assert_eq!(json["reconciliation"]["outcome"], "Shortfall");
    assert!(json["penalty"]["total_amount"].is_string());
}

#[tokio::test]
async fn test_discharge_minutes_out_of_range() {
    for minutes in [i64::MAX, i64::MIN, 10_000_000_000_000] {
        let scenario = scenario(&format!(
            r#"{{
                "gross_weight": "100",
                "tare_weight": "20",
                "hoppers": [{{ "hopper_id": "H-1", "discharge_minutes": {minutes} }}],
                "loads": [
                    {{ "provider_code": "P1", "product_code": "PET",
                       "documentary_weight": "80", "unit_price": "1" }}
                ]
            }}"#
        ));
        let err = ScenarioRunner::new().run(&scenario).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(err.to_string().contains("discharge_minutes"));
    }
}

#[tokio::test]
async fn test_huge_loads_fail_with_typed_error() {
    let scenario = scenario(
        r#"{
            "gross_weight": "100",
            "tare_weight": "99",
            "loads": [
                { "provider_code": "P1", "product_code": "PET",
                  "documentary_weight": "100000000000000000000",
                  "unit_price": "100000000000000000000" }
            ]
        }"#,
    );
    let err = ScenarioRunner::new().run(&scenario).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvariantViolation);
}
