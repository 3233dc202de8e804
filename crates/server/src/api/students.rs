//! Student CRUD handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use debtdesk_core::{Student, StudentInput};

use crate::state::AppState;

use super::{error_response, ApiResult, ErrorResponse};

/// List all students.
#[utoipa::path(
    get,
    path = "/api/student",
    tag = "Students",
    responses((status = 200, description = "All students", body = Object))
)]
pub async fn students_list(State(state): State<Arc<AppState>>) -> Json<Vec<Student>> {
    Json(state.service.list_students())
}

/// Create a student. `sex` may be a boolean or a label such as `"female"`.
#[utoipa::path(
    post,
    path = "/api/student",
    tag = "Students",
    request_body(content = Object, description = "{ name, age, sex, fearFactor }"),
    responses(
        (status = 201, description = "Student created", body = Object),
        (status = 400, description = "Invalid age or fearFactor", body = ErrorResponse)
    )
)]
pub async fn students_create(
    State(state): State<Arc<AppState>>,
    Json(input): Json<StudentInput>,
) -> ApiResult<(StatusCode, Json<Student>)> {
    state
        .service
        .create_student(&input)
        .map(|s| (StatusCode::CREATED, Json(s)))
        .map_err(error_response)
}

/// Get a single student.
#[utoipa::path(
    get,
    path = "/api/student/{id}",
    tag = "Students",
    params(("id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Object),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
pub async fn students_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Student>> {
    state.service.get_student(&id).map(Json).map_err(error_response)
}

/// Replace a student. Debts already created keep their monthly percent.
#[utoipa::path(
    put,
    path = "/api/student/{id}",
    tag = "Students",
    params(("id" = String, Path, description = "Student ID")),
    request_body(content = Object, description = "{ name, age, sex, fearFactor }"),
    responses(
        (status = 200, description = "Student replaced", body = Object),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
pub async fn students_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<StudentInput>,
) -> ApiResult<Json<Student>> {
    state
        .service
        .replace_student(&id, &input)
        .map(Json)
        .map_err(error_response)
}

/// Delete a student. Their debts and appointments are kept.
#[utoipa::path(
    delete,
    path = "/api/student/{id}",
    tag = "Students",
    params(("id" = String, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
pub async fn students_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .service
        .delete_student(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}
