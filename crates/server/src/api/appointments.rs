//! Appointment handlers. Booking picks the first eligible collector.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use debtdesk_core::{Appointment, AppointmentInput};

use crate::state::AppState;

use super::{error_response, ApiResult, ErrorResponse};

#[utoipa::path(
    get,
    path = "/api/appointment",
    tag = "Appointments",
    responses((status = 200, description = "All appointments", body = Object))
)]
pub async fn appointments_list(State(state): State<Arc<AppState>>) -> Json<Vec<Appointment>> {
    Json(state.service.list_appointments())
}

/// Book an appointment for a student on a date (`YYYY-MM-DD`, not in the past).
///
/// The collector is the first one with `seniority >= 2 * fearFactor` that is
/// free that day. The student's first debt, if any, is attached.
#[utoipa::path(
    post,
    path = "/api/appointment",
    tag = "Appointments",
    request_body(content = Object, description = "{ date, studentId, studentFearFactor? }"),
    responses(
        (status = 201, description = "Appointment booked", body = Object),
        (status = 400, description = "Invalid date or no available collector", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
pub async fn appointments_create(
    State(state): State<Arc<AppState>>,
    Json(input): Json<AppointmentInput>,
) -> ApiResult<(StatusCode, Json<Appointment>)> {
    info!(date = %input.date, student_id = %input.student_id, "Received appointment request");
    state
        .service
        .create_appointment(&input)
        .map(|a| (StatusCode::CREATED, Json(a)))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/api/appointment/{id}",
    tag = "Appointments",
    params(("id" = String, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment details", body = Object),
        (status = 404, description = "Appointment not found", body = ErrorResponse)
    )
)]
pub async fn appointments_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Appointment>> {
    state
        .service
        .get_appointment(&id)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/api/appointment/{id}",
    tag = "Appointments",
    params(("id" = String, Path, description = "Appointment ID")),
    responses(
        (status = 204, description = "Appointment deleted"),
        (status = 404, description = "Appointment not found", body = ErrorResponse)
    )
)]
pub async fn appointments_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .service
        .delete_appointment(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}
