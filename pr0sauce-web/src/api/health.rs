//! Liveness report
//!
//! `/health` never calls the GraphQL or oEmbed services; it only reports
//! which ones this instance was configured against, so a misrouted
//! deployment is visible without reading the startup log.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{AppState, Upstreams};

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub upstreams: Upstreams,
}

/// GET /health
pub async fn health_report(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        service: "pr0sauce-web",
        version: env!("CARGO_PKG_VERSION"),
        upstreams: state.upstreams.as_ref().clone(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_report))
}
