use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::admin::AdminState;
use crate::routing::Backend;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct RoutingStatus {
    pub active_backend: Backend,
    pub monitor_enabled: bool,
    pub primary: String,
    pub secondary: String,
}

pub async fn get_status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn get_routing(State(state): State<AdminState>) -> Json<RoutingStatus> {
    let (active_backend, monitor_enabled) = state.control.snapshot();
    Json(RoutingStatus {
        active_backend,
        monitor_enabled,
        primary: state.control.primary_name().to_string(),
        secondary: state.control.secondary_name().to_string(),
    })
}

pub async fn disable_primary(State(state): State<AdminState>) -> (StatusCode, String) {
    let status = state.control.force_secondary();
    (StatusCode::OK, status.message)
}

pub async fn enable_primary(State(state): State<AdminState>) -> (StatusCode, String) {
    let status = state.control.restore_primary();
    (StatusCode::OK, status.message)
}
