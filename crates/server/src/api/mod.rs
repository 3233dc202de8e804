//! Domain-focused API endpoint modules.
//!
//! Each sub-module owns one collection. Shared error mapping lives here.

mod appointments;
mod collectors;
mod debts;
pub mod doc;
mod health;
mod students;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use debtdesk_core::DeskError;

// ── Shared types ─────────────────────────────────────────────────

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);
pub type ApiResult<T> = Result<T, ApiError>;

/// Not-found errors become 404, every other rule violation 400.
pub(crate) fn error_response(err: DeskError) -> ApiError {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(ErrorResponse { error: err.to_string() }))
}

// ── Re-exports ───────────────────────────────────────────────────
// Flat `api::foo` paths used by route registration.

pub use appointments::{
    appointments_create, appointments_delete, appointments_get, appointments_list,
};
pub use collectors::{
    collectors_create, collectors_delete, collectors_get, collectors_list, collectors_update,
};
pub use debts::{debts_accrue, debts_create, debts_delete, debts_get, debts_list};
pub use health::health;
pub use students::{
    students_create, students_delete, students_get, students_list, students_update,
};
