//! Health check endpoints.

use axum::{Json, extract::State};
use serde::Serialize;

use onetap_common::constants::messages;

use crate::state::AppState;

/// Liveness text at the root path
pub async fn liveness() -> &'static str {
    messages::LIVENESS
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Basic health check (is the server running?)
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
pub struct MetricsResponse {
    outstanding: usize,
    issued: u64,
    redeemed: u64,
    rejected: u64,
    uptime_secs: u64,
}

/// Store counters (for monitoring)
pub async fn metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    let stats = state.store.stats();

    Json(MetricsResponse {
        outstanding: stats.outstanding,
        issued: stats.issued,
        redeemed: stats.redeemed,
        rejected: stats.rejected,
        uptime_secs: state.uptime_secs(),
    })
}
