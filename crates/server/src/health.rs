use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Instant;

use crate::db::SharedStore;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Call once during startup.
pub fn record_start_time() {
    START_TIME.get_or_init(Instant::now);
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Liveness plus a store round trip. Always 200; a broken store shows in
/// `store`.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(store): State<SharedStore>) -> Json<HealthResponse> {
    let store_status = match store.ping().await {
        Ok(()) => "connected".to_string(),
        Err(e) => format!("error: {e}"),
    };

    let uptime = START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0);

    Json(HealthResponse {
        status: "ok".to_string(),
        store: store_status,
        uptime_seconds: uptime,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
