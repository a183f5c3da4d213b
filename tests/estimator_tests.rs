mod common;

use carbonlens::api::EstimationError;
use carbonlens::models::{Provenance, REGIONS};
use carbonlens::services::{estimate, Estimate};
use httpmock::prelude::*;
use serde_json::json;

use common::{client_for, unreachable_client, TEST_KEY};

#[tokio::test]
async fn test_api_result_uses_response_breakdown() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/estimate")
                .header("Authorization", format!("Bearer {}", TEST_KEY))
                .json_body_partial(r#"{"emission_factor":{"region":"DE","data_version":"^27"},"parameters":{"energy_unit":"kWh"}}"#);
            then.status(200).json_body(json!({
                "co2e": 38.25,
                "constituent_gases": { "co2": 37.9, "ch4": 0.0123456, "n2o": 0.0021 },
                "emission_factor": { "year": 2022, "source": "UBA" }
            }));
        })
        .await;

    let est = estimate(&client_for(&server), "DE", 100.0).await;

    mock.assert_async().await;
    assert_eq!(est.provenance(), Provenance::Api);
    let r = est.result();
    assert_eq!(r.region_code, "DE");
    assert_eq!(r.total_kg_co2e, 38.25);
    assert_eq!(r.co2_kg, 37.9);
    assert_eq!(r.ch4_kg, 0.01235);
    assert_eq!(r.n2o_kg, 0.0021);
    assert_eq!(r.year, "2022");
    assert_eq!(r.source, "UBA");
}

#[tokio::test]
async fn test_api_result_without_breakdown_is_approximated() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/estimate");
            then.status(200).json_body(json!({ "co2e": 50.0 }));
        })
        .await;

    let est = estimate(&client_for(&server), "FR", 10.0).await;

    let r = est.result();
    assert!(!est.is_fallback());
    assert_eq!(r.co2_kg, 49.0);
    assert_eq!(r.ch4_kg, 0.05);
    assert_eq!(r.n2o_kg, 0.025);
    assert_eq!(r.year, "2023");
    assert_eq!(r.source, "Climatiq");
}

#[tokio::test]
async fn test_server_error_falls_back_to_regional_average() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/estimate");
            then.status(500).body("upstream down");
        })
        .await;

    let est = estimate(&client_for(&server), "DE", 100.0).await;

    mock.assert_hits_async(1).await;
    match est {
        Estimate::Fallback { result, reason } => {
            assert_eq!(result.total_kg_co2e, 35.0);
            assert_eq!(result.source, "Regional Avg (Fallback)");
            assert_eq!(result.year, "2024");
            assert!(matches!(reason, EstimationError::Status { status: 500, .. }));
        }
        other => panic!("expected fallback, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_total_falls_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/estimate");
            then.status(200).json_body(json!({ "error": "no_emission_factors_found" }));
        })
        .await;

    let est = estimate(&client_for(&server), "JP", 20.0).await;

    assert_eq!(
        est,
        Estimate::Fallback {
            result: carbonlens::services::fallback_estimate("JP", 20.0),
            reason: EstimationError::MissingTotal,
        }
    );
    assert_eq!(est.result().total_kg_co2e, 9.0);
}

#[tokio::test]
async fn test_non_json_body_falls_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/estimate");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let est = estimate(&client_for(&server), "GB", 10.0).await;

    assert!(matches!(est, Estimate::Fallback { reason: EstimationError::Decode(_), .. }));
    assert_eq!(est.result().total_kg_co2e, 2.3);
}

#[tokio::test]
async fn test_unusable_gas_breakdown_falls_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/estimate");
            then.status(200).json_body(json!({
                "co2e": 50.0,
                "constituent_gases": { "co2": 49.0, "ch4": "n/a", "n2o": -1.0 }
            }));
        })
        .await;

    let est = estimate(&client_for(&server), "CN", 10.0).await;

    assert!(matches!(est, Estimate::Fallback { reason: EstimationError::Decode(_), .. }));
    assert_eq!(est.result().total_kg_co2e, 7.0);
    assert_eq!(est.result().source, "Regional Avg (Fallback)");
}

#[tokio::test]
async fn test_unreachable_api_uses_fallback() {
    let est = estimate(&unreachable_client(), "DE", 100.0).await;
    assert!(matches!(est, Estimate::Fallback { reason: EstimationError::Network(_), .. }));
    assert_eq!(est.result().total_kg_co2e, 35.0);
    assert_eq!(est.result().source, "Regional Avg (Fallback)");
    assert_eq!(est.result().year, "2024");
}

#[tokio::test]
async fn test_unknown_region_uses_default_factor() {
    let est = estimate(&unreachable_client(), "ZZ", 10.0).await;
    assert_eq!(est.result().total_kg_co2e, 5.0);
    assert_eq!(est.result().region_code, "ZZ");
}

#[tokio::test]
async fn test_every_region_yields_a_non_negative_result() {
    let client = unreachable_client();
    for energy in [0.001, 1.0, 250.0, 1.0e6] {
        for region in REGIONS.iter() {
            let est = estimate(&client, region.region_code, energy).await;
            assert_eq!(est.result().region_code, region.region_code);
            assert!(est.result().total_kg_co2e >= 0.0);
        }
    }
}
