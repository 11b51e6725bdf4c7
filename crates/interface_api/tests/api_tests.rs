//! HTTP API Tests
//!
//! Drives the router in-process through `axum-test`.
//!
//! # Test Organization
//!
//! - `health_tests` - Liveness endpoint
//! - `restatement_tests` - Ledger and aggregate endpoints
//! - `tariff_tests` - Evaluation and regional schedules

use axum::http::StatusCode;
use axum_test::TestServer;
use interface_api::{config::ApiConfig, create_router};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

fn server() -> TestServer {
    TestServer::new(create_router(ApiConfig::default())).unwrap()
}

/// Reads a decimal serialized as a JSON string
fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

// ============================================================================
// HEALTH TESTS
// ============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_version() {
        let response = server().get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["engines"], json!(["restatement", "tariff"]));
        assert_eq!(body["default_region"], "CJF");
    }
}

// ============================================================================
// RESTATEMENT TESTS
// ============================================================================

mod restatement_tests {
    use super::*;

    fn reference_body() -> Value {
        json!({
            "principal": "10000.00",
            "start": "2024-01-01",
            "end": "2024-03-31",
            "indices": [{
                "index": "ipca_e",
                "points": [
                    {"date": "2024-01-01", "value": "1.0"},
                    {"date": "2024-02-01", "value": "0.5"},
                    {"date": "2024-03-01", "value": "0.8"}
                ]
            }],
            "fixed_interest": {"monthly_rate": "1.0", "method": "simple"}
        })
    }

    #[tokio::test]
    async fn test_reference_scenario_over_http() {
        let response = server().post("/api/v1/restatements").json(&reference_body()).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["rows"].as_array().unwrap().len(), 3);
        assert_eq!(decimal(&body["totals"]["final_value"]), dec!(10536.53));
        assert!(body["calculation_id"].as_str().unwrap().starts_with("CALC-"));
        assert!(body["warnings"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_inverted_window_is_unprocessable() {
        let mut body = reference_body();
        body["start"] = json!("2024-04-01");

        let response = server().post("/api/v1/restatements").json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let error: Value = response.json();
        assert_eq!(error["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_long_selic_window_warns() {
        let body = json!({
            "principal": "1000",
            "start": "2010-01-01",
            "end": "2024-12-31",
            "selic": [{"date": "2010-01-04", "value": "0.03"}],
            "regime_rules": [{"method": "selic_passthrough"}]
        });

        let response = server().post("/api/v1/restatements").json(&body).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
        assert_eq!(body["warnings"][0]["max_years"], 10);
    }

    #[tokio::test]
    async fn test_aggregate_endpoint() {
        let body = json!({
            "principal": "1000",
            "start": "2024-01-01",
            "end": "2024-03-31",
            "fixed_interest": {"monthly_rate": "1", "method": "compound"}
        });

        let response = server().post("/api/v1/restatements/aggregate").json(&body).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(decimal(&body["final_value"]), dec!(1030.301));
        assert!(body["percentages"]["interest"].is_string());
    }
}

// ============================================================================
// TARIFF TESTS
// ============================================================================

mod tariff_tests {
    use super::*;

    #[tokio::test]
    async fn test_evaluate_default_catalog() {
        let body = json!({
            "category": "civil_actions",
            "inputs": {"distribuicao": {"claim_value": "1000"}}
        });

        let response = server().post("/api/v1/tariffs/evaluate").json(&body).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["items"].as_array().unwrap().len(), 3);
        assert!(body["quote_id"].as_str().unwrap().starts_with("QUOTE-"));
    }

    #[tokio::test]
    async fn test_blanket_exemption_zeroes_total() {
        let body = json!({
            "category": "civil_appeals",
            "exemption": {"mode": "zero_all"}
        });

        let response = server().post("/api/v1/tariffs/evaluate").json(&body).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(decimal(&body["total"]), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_invalid_rules_are_unprocessable() {
        let body = json!({
            "rules": [{"id": "citacao", "label": "Citation", "kind": "fixed", "amount": "-5"}]
        });

        let response = server().post("/api/v1/tariffs/evaluate").json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_missing_rules_and_category_is_bad_request() {
        let response = server().post("/api/v1/tariffs/evaluate").json(&json!({})).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_region_schedule() {
        let response = server().get("/api/v1/tariffs/regions/trf3").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["region"], "TRF3");
        assert_eq!(decimal(&body["table_i"]["min"]), dec!(80));
    }

    #[tokio::test]
    async fn test_unknown_region_is_not_found() {
        let response = server().get("/api/v1/tariffs/regions/trf9").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let response = server().get("/api/v1/tariffs/regions").await;

        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_region_listing_includes_default() {
        let response = server().get("/api/v1/tariffs/regions").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["default"], "CJF");
        assert_eq!(body["regions"].as_array().unwrap().len(), 7);
    }
}
