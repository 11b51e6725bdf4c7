//! Liveness endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use domain_tariff::Region;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub engines: [&'static str; 2],
    pub default_region: Region,
}

/// Reports the build version and the engines this server exposes
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        engines: ["restatement", "tariff"],
        default_region: state.config.default_region,
    })
}
