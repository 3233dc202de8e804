//! Liveness endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub profile: String,
    pub students: usize,
    pub debts: usize,
    pub collectors: usize,
    pub appointments: usize,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let svc = &state.service;
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        profile: state.config.profile_label().to_string(),
        students: svc.list_students().len(),
        debts: svc.list_debts().len(),
        collectors: svc.list_collectors().len(),
        appointments: svc.list_appointments().len(),
    })
}
