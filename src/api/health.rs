use crate::api::GatewayState;
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    store_connected: bool,
    backend: &'static str,
    started_at: DateTime<Utc>,
    uptime_seconds: u64,
}

pub async fn health_check(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let store_connected = state.store.ping().await.is_ok();

    Json(HealthResponse {
        status: if store_connected {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        store_connected,
        backend: state.store.backend(),
        started_at: state.started_at,
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
