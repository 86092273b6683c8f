//! Integration tests for the API Server
//!
//! Tests health, metrics, the indicator endpoints and signal evaluation.


use macrolens::store::{MemoryStore, SheetStore};
use serde_json::{json, Value};
use std::sync::Arc;

use test_utils::{server_for, TestApiServer};

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "macrolens-dashboard");
    assert_eq!(body["store"], "memory");
    assert!(body["store_error"].is_null());
}

#[tokio::test]
async fn health_endpoint_reports_unreadable_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("macro_dashboard.csv");
    std::fs::write(&path, "indicator;value\npmi;50\n").unwrap();
    let server = server_for(Arc::new(SheetStore::new(path)));

    let response = server.get("/health").expect_failure().await;
    assert_eq!(response.status_code(), 503);

    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["store"], "sheet");
    assert!(body["store_error"].as_str().unwrap().contains("malformed sheet"));
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/api/signals").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("http_request_duration_seconds"));
    assert!(body.contains("http_requests_in_flight"));
    assert!(body.contains("signal_evaluations_total"));
    assert!(body.contains("signals_emitted_total{group=\"inflation\"}"));
}

#[tokio::test]
async fn indicators_default_when_store_is_empty() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/indicators").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["core_pce"], 2.0);
    assert_eq!(body["fed_rate"], 5.25);
    assert_eq!(body["btc"], 70000.0);
    assert_eq!(body.as_object().unwrap().len(), 14);
}

#[tokio::test]
async fn indicators_reflect_stored_values() {
    let app = TestApiServer::with_store(MemoryStore::with_rows([("pmi", 44.0)])).await;
    let body: Value = app.server.get("/api/indicators").await.json();
    assert_eq!(body["pmi"], 44.0);
    assert_eq!(body["dxy"], 103.0);
}

#[tokio::test]
async fn signals_for_default_snapshot() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/signals").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let signals = body["signals"].as_array().unwrap();
    assert_eq!(signals.len(), 2);
    assert_eq!(signals[0]["name"], "Inflation ~2%");
    assert_eq!(signals[0]["implication"], "Goldilocks zone");
    assert_eq!(signals[1]["name"], "Fed Rate >5%");
    assert_eq!(signals[1]["unfavoredAssets"][0], "Tech/Growth equities");
    assert!(body["evaluatedAt"].as_str().is_some());
}

#[tokio::test]
async fn saving_indicators_persists_all_keys() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .put("/api/indicators")
        .json(&json!({ "core_cpi": 3.4, "dxy": 107.0 }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["signals"][0]["name"], "High Inflation >3%");
    assert_eq!(body["signals"][1]["name"], "Strong dollar (>105)");

    let rows = app.store.rows().await;
    assert_eq!(rows.len(), 14);
    assert!(rows.contains(&("core_cpi".to_string(), 3.4)));
    assert!(rows.contains(&("pmi".to_string(), 50.0)));

    let stored: Value = app.server.get("/api/signals").await.json();
    assert_eq!(stored["signals"], body["signals"]);
}

#[tokio::test]
async fn saving_rejects_non_canonical_keys() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .put("/api/indicators")
        .json(&json!({ "Core PCE": 2.5 }))
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 422);
    assert!(app.store.rows().await.is_empty());
}

#[tokio::test]
async fn evaluate_does_not_touch_the_store() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/signals/evaluate")
        .json(&json!({
            "core_pce": 3.5, "core_cpi": 2.0, "ten_y": 5.0, "fed_rate": 1.5,
            "pmi": 55.0, "unemp": 5.0, "dxy": 106.0, "debt_gdp": 130.0,
            "m2": 12.0, "repo": 9.0, "margin": 1100.0
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let groups: Vec<&str> = body["signals"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["group"].as_str().unwrap())
        .collect();
    assert_eq!(
        groups,
        vec![
            "inflation",
            "ten_year_yield",
            "pmi",
            "unemployment",
            "dollar_index",
            "fed_funds_rate",
            "debt_to_gdp",
            "m2_growth",
            "repo_rate",
            "margin_debt",
        ]
    );
    assert!(app.store.rows().await.is_empty());
}

#[tokio::test]
async fn reference_endpoint_serves_static_table() {
    let app = TestApiServer::new().await;
    let body: Value = app.server.get("/api/reference").await.json();
    assert_eq!(body["rows"].as_array().unwrap().len(), 15);
    assert_eq!(body["columns"][0], "Condition");
    assert_eq!(body["rows"][13]["condition"], "Margin Debt Peak");
    assert!(body["disclaimer"].as_str().unwrap().starts_with("Relationships"));
}

#[tokio::test]
async fn rules_endpoint_lists_ten_groups() {
    let app = TestApiServer::new().await;
    let body: Value = app.server.get("/api/rules").await.json();
    let groups = body.as_array().unwrap();
    assert_eq!(groups.len(), 10);
    assert_eq!(groups[0]["metric"], "inflation");
    assert_eq!(groups[8]["branches"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn rules_endpoint_lists_metric_inputs() {
    let app = TestApiServer::new().await;
    let body: Value = app.server.get("/api/rules").await.json();
    assert_eq!(body[0]["inputs"], json!(["core_pce", "core_cpi"]));
    assert_eq!(body[4]["inputs"], json!(["dxy"]));
    assert_eq!(body[4]["group"], "dollar_index");
}

#[tokio::test]
async fn non_finite_indicators_survive_a_get_put_round_trip() {
    let app = TestApiServer::with_store(MemoryStore::with_rows([
        ("pmi", f64::NAN),
        ("btc", f64::INFINITY),
        ("m2", f64::NEG_INFINITY),
    ]))
    .await;

    let indicators: Value = app.server.get("/api/indicators").await.json();
    assert_eq!(indicators["pmi"], "NaN");
    assert_eq!(indicators["btc"], "inf");
    assert_eq!(indicators["m2"], "-inf");

    let response = app.server.put("/api/indicators").json(&indicators).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["snapshot"]["pmi"], "NaN");
    assert!(body["signals"]
        .as_array()
        .unwrap()
        .iter()
        .all(|s| s["group"] != "pmi"));

    let rows = app.store.rows().await;
    let pmi = rows.iter().find(|(key, _)| key == "pmi").unwrap().1;
    assert!(pmi.is_nan());
    assert!(rows.contains(&("btc".to_string(), f64::INFINITY)));
}

#[tokio::test]
async fn non_numeric_strings_are_rejected() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .put("/api/indicators")
        .json(&json!({ "pmi": "55" }))
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 422);
    assert!(app.store.rows().await.is_empty());
}
