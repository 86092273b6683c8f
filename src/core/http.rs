//! HTTP endpoint server using Axum

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::metrics::Metrics;
use crate::models::indicators::{IndicatorKey, IndicatorSnapshot};
use crate::models::signal::SignalEvaluation;
use crate::services::indicators::{load_snapshot, save_snapshot};
use crate::signals::engine::SignalEngine;
use crate::signals::reference::{ReferenceRow, HISTORICAL_REFERENCE, REFERENCE_DISCLAIMER};
use crate::signals::rules::{RuleGroup, RULE_GROUPS};
use crate::store::{IndicatorStore, StoreError};

pub const SERVICE_NAME: &str = "macrolens-dashboard";

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub store: Arc<dyn IndicatorStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn IndicatorStore>, metrics: Arc<Metrics>) -> Self {
        Self {
            metrics,
            start_time: Arc::new(Instant::now()),
            store,
        }
    }

    /// Evaluate a snapshot and count it in the metrics.
    fn evaluate(&self, snapshot: &IndicatorSnapshot) -> SignalEvaluation {
        let evaluation = SignalEngine::evaluate_with_snapshot(snapshot);
        self.metrics.record_evaluation(&evaluation.signals);
        evaluation
    }
}

fn store_unavailable(operation: &'static str) -> impl FnOnce(StoreError) -> StatusCode {
    move |e| {
        error!(error = %e, operation, "indicator store failure");
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// Healthy while the store answers a single-key read; 503 otherwise.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    let check = state.store.get(IndicatorKey::CorePce.as_str()).await;
    let (code, status, store_error) = match check {
        Ok(_) => (StatusCode::OK, "healthy", None),
        Err(e) => {
            warn!(
                error = %e,
                backend = state.store.backend(),
                "indicator store unreachable"
            );
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", Some(e.to_string()))
        }
    };
    (
        code,
        Json(json!({
            "status": status,
            "uptime_seconds": uptime_seconds,
            "service": SERVICE_NAME,
            "store": state.store.backend(),
            "store_error": store_error,
        })),
    )
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    state.metrics.http_requests_in_flight.dec();

    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis() as u64,
            "HTTP request error"
        );
    }

    response
}

/// Current snapshot, defaults filled for keys the store lacks
async fn get_indicators(
    State(state): State<AppState>,
) -> Result<Json<IndicatorSnapshot>, StatusCode> {
    let snapshot = load_snapshot(state.store.as_ref())
        .await
        .map_err(store_unavailable("load"))?;
    Ok(Json(snapshot))
}

/// Save all indicators and return the resulting signals
async fn put_indicators(
    State(state): State<AppState>,
    Json(snapshot): Json<IndicatorSnapshot>,
) -> Result<Json<SignalEvaluation>, StatusCode> {
    save_snapshot(state.store.as_ref(), &snapshot)
        .await
        .map_err(store_unavailable("save"))?;
    state
        .metrics
        .indicator_writes_total
        .inc_by(IndicatorKey::ALL.len() as u64);
    info!(backend = state.store.backend(), "indicator snapshot saved");

    Ok(Json(state.evaluate(&snapshot)))
}

/// Signals for the stored snapshot
async fn get_signals(
    State(state): State<AppState>,
) -> Result<Json<SignalEvaluation>, StatusCode> {
    let snapshot = load_snapshot(state.store.as_ref())
        .await
        .map_err(store_unavailable("load"))?;
    Ok(Json(state.evaluate(&snapshot)))
}

/// Signals for a posted snapshot; nothing is written
async fn evaluate_signals(
    State(state): State<AppState>,
    Json(snapshot): Json<IndicatorSnapshot>,
) -> Json<SignalEvaluation> {
    Json(state.evaluate(&snapshot))
}

async fn get_reference() -> Json<Value> {
    Json(json!({
        "columns": ReferenceRow::COLUMNS,
        "rows": HISTORICAL_REFERENCE.as_slice(),
        "disclaimer": REFERENCE_DISCLAIMER,
    }))
}

/// A rule group plus the snapshot fields its metric reads.
#[derive(Serialize)]
struct RuleGroupView {
    #[serde(flatten)]
    rule: RuleGroup,
    inputs: Vec<IndicatorKey>,
}

async fn get_rules() -> Json<Vec<RuleGroupView>> {
    Json(
        RULE_GROUPS
            .iter()
            .map(|rule| RuleGroupView {
                rule: *rule,
                inputs: rule.metric.inputs(),
            })
            .collect(),
    )
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/indicators", get(get_indicators).put(put_indicators))
        .route("/api/signals", get(get_signals))
        .route("/api/signals/evaluate", post(evaluate_signals))
        .route("/api/reference", get(get_reference))
        .route("/api/rules", get(get_rules))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    port: u16,
    store: Arc<dyn IndicatorStore>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let metrics = Arc::new(Metrics::new()?);
    let state = AppState::new(store, metrics);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
