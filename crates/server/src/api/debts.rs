//! Debt handlers, including the periodic accrual pass.
//!
//! The core keeps `totalAmount` at full precision. Responses round it to
//! cents through [`DebtView`].

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use debtdesk_core::interest::round_cents;
use debtdesk_core::{Debt, DebtInput};

use crate::state::AppState;

use super::{error_response, ApiResult, ErrorResponse};

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DebtView {
    pub id: String,
    pub student_id: String,
    pub amount: f64,
    /// Rounded to 2 decimals.
    pub total_amount: f64,
    pub monthly_percent: f64,
    pub creation_date: DateTime<Utc>,
    pub last_update_date: Option<DateTime<Utc>>,
}

impl From<Debt> for DebtView {
    fn from(debt: Debt) -> Self {
        Self {
            id: debt.id,
            student_id: debt.student_id,
            amount: debt.amount,
            total_amount: round_cents(debt.total_amount),
            monthly_percent: debt.monthly_percent,
            creation_date: debt.creation_date,
            last_update_date: debt.last_update_date,
        }
    }
}

fn views(debts: Vec<Debt>) -> Vec<DebtView> {
    debts.into_iter().map(DebtView::from).collect()
}

#[utoipa::path(
    get,
    path = "/api/debt",
    tag = "Debts",
    responses((status = 200, description = "All debts", body = Vec<DebtView>))
)]
pub async fn debts_list(State(state): State<Arc<AppState>>) -> Json<Vec<DebtView>> {
    Json(views(state.service.list_debts()))
}

/// Create a debt for an existing student.
///
/// A `lastUpdateDate` in the future pre-accrues daily interest up to it.
#[utoipa::path(
    post,
    path = "/api/debt",
    tag = "Debts",
    request_body(content = Object, description = "{ studentId, amount, lastUpdateDate? }"),
    responses(
        (status = 201, description = "Debt created", body = DebtView),
        (status = 400, description = "Invalid amount or date", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
pub async fn debts_create(
    State(state): State<Arc<AppState>>,
    Json(input): Json<DebtInput>,
) -> ApiResult<(StatusCode, Json<DebtView>)> {
    state
        .service
        .create_debt(&input)
        .map(|d| (StatusCode::CREATED, Json(d.into())))
        .map_err(error_response)
}

/// Run the periodic accrual pass over every debt and return them all.
/// A second call on the same day changes nothing.
#[utoipa::path(
    put,
    path = "/api/debt",
    tag = "Debts",
    responses((status = 200, description = "Debts after accrual", body = Vec<DebtView>))
)]
pub async fn debts_accrue(State(state): State<Arc<AppState>>) -> Json<Vec<DebtView>> {
    let (debts, report) = state.service.accrue_debts();
    info!(
        accrued = report.accrued,
        skipped = report.skipped,
        total = debts.len(),
        "Accrual pass complete"
    );
    Json(views(debts))
}

#[utoipa::path(
    get,
    path = "/api/debt/{id}",
    tag = "Debts",
    params(("id" = String, Path, description = "Debt ID")),
    responses(
        (status = 200, description = "Debt details", body = DebtView),
        (status = 404, description = "Debt not found", body = ErrorResponse)
    )
)]
pub async fn debts_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DebtView>> {
    state
        .service
        .get_debt(&id)
        .map(|d| Json(d.into()))
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/api/debt/{id}",
    tag = "Debts",
    params(("id" = String, Path, description = "Debt ID")),
    responses(
        (status = 204, description = "Debt deleted"),
        (status = 404, description = "Debt not found", body = ErrorResponse)
    )
)]
pub async fn debts_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .service
        .delete_debt(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}
