//! OpenAPI documentation aggregator.
//!
//! Collects all `#[utoipa::path]`-annotated handlers and `ToSchema`-derived
//! types into a single OpenAPI spec, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "debtdesk API",
        version = "0.1.0",
        description = "Debt-collection scheduling: students, interest-accruing debts, collectors and appointments.",
    ),
    tags(
        (name = "Health", description = "Server liveness"),
        (name = "Students", description = "Student CRUD"),
        (name = "Debts", description = "Debt creation, lookup and periodic interest accrual"),
        (name = "Collectors", description = "Collector CRUD"),
        (name = "Appointments", description = "First-fit collector booking"),
    ),
    paths(
        // Health
        crate::api::health::health,
        // Students
        crate::api::students::students_list,
        crate::api::students::students_create,
        crate::api::students::students_get,
        crate::api::students::students_update,
        crate::api::students::students_delete,
        // Debts
        crate::api::debts::debts_list,
        crate::api::debts::debts_create,
        crate::api::debts::debts_accrue,
        crate::api::debts::debts_get,
        crate::api::debts::debts_delete,
        // Collectors
        crate::api::collectors::collectors_list,
        crate::api::collectors::collectors_create,
        crate::api::collectors::collectors_get,
        crate::api::collectors::collectors_update,
        crate::api::collectors::collectors_delete,
        // Appointments
        crate::api::appointments::appointments_list,
        crate::api::appointments::appointments_create,
        crate::api::appointments::appointments_get,
        crate::api::appointments::appointments_delete,
    ),
    components(schemas(
        crate::api::ErrorResponse,
        crate::api::health::HealthResponse,
        crate::api::debts::DebtView,
    ))
)]
pub struct ApiDoc;
