//! Collector CRUD handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use debtdesk_core::{Collector, CollectorInput};

use crate::state::AppState;

use super::{error_response, ApiResult, ErrorResponse};

/// List collectors in assignment order.
#[utoipa::path(
    get,
    path = "/api/collector",
    tag = "Collectors",
    responses((status = 200, description = "All collectors", body = Object))
)]
pub async fn collectors_list(State(state): State<Arc<AppState>>) -> Json<Vec<Collector>> {
    Json(state.service.list_collectors())
}

#[utoipa::path(
    post,
    path = "/api/collector",
    tag = "Collectors",
    request_body(content = Object, description = "{ name, seniority } with seniority 2..=10"),
    responses(
        (status = 201, description = "Collector created", body = Object),
        (status = 400, description = "Invalid name or seniority", body = ErrorResponse)
    )
)]
pub async fn collectors_create(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CollectorInput>,
) -> ApiResult<(StatusCode, Json<Collector>)> {
    state
        .service
        .create_collector(&input)
        .map(|c| (StatusCode::CREATED, Json(c)))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/api/collector/{id}",
    tag = "Collectors",
    params(("id" = String, Path, description = "Collector ID")),
    responses(
        (status = 200, description = "Collector details", body = Object),
        (status = 404, description = "Collector not found", body = ErrorResponse)
    )
)]
pub async fn collectors_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Collector>> {
    state.service.get_collector(&id).map(Json).map_err(error_response)
}

/// Replace a collector. Existing appointments are not re-checked.
#[utoipa::path(
    put,
    path = "/api/collector/{id}",
    tag = "Collectors",
    params(("id" = String, Path, description = "Collector ID")),
    request_body(content = Object, description = "{ name, seniority }"),
    responses(
        (status = 200, description = "Collector replaced", body = Object),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "Collector not found", body = ErrorResponse)
    )
)]
pub async fn collectors_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<CollectorInput>,
) -> ApiResult<Json<Collector>> {
    state
        .service
        .replace_collector(&id, &input)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/api/collector/{id}",
    tag = "Collectors",
    params(("id" = String, Path, description = "Collector ID")),
    responses(
        (status = 204, description = "Collector deleted"),
        (status = 404, description = "Collector not found", body = ErrorResponse)
    )
)]
pub async fn collectors_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .service
        .delete_collector(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}
