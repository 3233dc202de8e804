//! HTTP router construction.
//!
//! Assembles all Axum routes, middleware, and OpenAPI docs into a single `Router`.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api;
use crate::state::AppState;

/// `*` allows any origin; anything else is taken as a single allowed origin.
fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(e) => {
            warn!("Invalid CORS_ORIGIN '{}': {}; allowing any origin", origin, e);
            CorsLayer::permissive()
        }
    }
}

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/health", get(api::health))
        .route(
            "/api/student",
            get(api::students_list).post(api::students_create),
        )
        .route(
            "/api/student/{id}",
            get(api::students_get)
                .put(api::students_update)
                .delete(api::students_delete),
        )
        // PUT on the collection runs the periodic accrual pass
        .route(
            "/api/debt",
            get(api::debts_list)
                .post(api::debts_create)
                .put(api::debts_accrue),
        )
        .route(
            "/api/debt/{id}",
            get(api::debts_get).delete(api::debts_delete),
        )
        .route(
            "/api/collector",
            get(api::collectors_list).post(api::collectors_create),
        )
        .route(
            "/api/collector/{id}",
            get(api::collectors_get)
                .put(api::collectors_update)
                .delete(api::collectors_delete),
        )
        .route(
            "/api/appointment",
            get(api::appointments_list).post(api::appointments_create),
        )
        .route(
            "/api/appointment/{id}",
            get(api::appointments_get).delete(api::appointments_delete),
        )
        .layer(cors)
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, TimeZone, Utc};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use debtdesk_core::{Config, FixedClock};

    use crate::app_config::build_service;

    fn app_with_clock(seed: bool) -> (Router, Arc<FixedClock>) {
        let mut config = Config::for_profile("");
        config.data.seed_sample_data = seed;
        config.server.cors_origin = "*".to_string();
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()));
        let service = build_service(&config, clock.clone());
        let state = Arc::new(AppState {
            service: Arc::new(service),
            config,
        });
        (build_router(state), clock)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn health_reports_seeded_counts() {
        let (app, _) = app_with_clock(true);
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["collectors"], 6);
        assert_eq!(body["appointments"], 1);
    }

    #[tokio::test]
    async fn student_lifecycle_with_string_fields() {
        let (app, _) = app_with_clock(false);
        let (status, created) = send(
            &app,
            "POST",
            "/api/student",
            Some(json!({"name": "Alice", "age": "17", "sex": "female", "fearFactor": "1"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["sex"], true);
        assert_eq!(created["age"], 17);
        let id = created["id"].as_str().unwrap().to_string();

        let (status, fetched) = send(&app, "GET", &format!("/api/student/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["name"], "Alice");

        let (status, replaced) = send(
            &app,
            "PUT",
            &format!("/api/student/{id}"),
            Some(json!({"name": "Alice", "age": 25, "sex": false, "fearFactor": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(replaced["id"], id.as_str());

        let (status, _) = send(&app, "DELETE", &format!("/api/student/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, err) = send(&app, "GET", &format!("/api/student/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(err["error"].as_str().unwrap().contains("Student not found"));
    }

    #[tokio::test]
    async fn invalid_student_is_rejected() {
        let (app, _) = app_with_clock(false);
        let (status, body) = send(
            &app,
            "POST",
            "/api/student",
            Some(json!({"name": "Bob", "age": "old", "sex": "male", "fearFactor": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("age"));
    }

    #[tokio::test]
    async fn debt_creation_fixes_monthly_percent() {
        let (app, _) = app_with_clock(false);
        let (_, student) = send(
            &app,
            "POST",
            "/api/student",
            Some(json!({"name": "Eve", "age": 17, "sex": "female", "fearFactor": 1})),
        )
        .await;

        let (status, debt) = send(
            &app,
            "POST",
            "/api/debt",
            Some(json!({"studentId": student["id"], "amount": 1000})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(debt["amount"], 1000.0);
        assert_eq!(debt["monthlyPercent"], 30.0);
        assert_eq!(debt["totalAmount"], 1000.0);
        assert!(debt["id"].as_str().is_some());
    }

    #[tokio::test]
    async fn debt_for_missing_student_is_404() {
        let (app, _) = app_with_clock(false);
        let (status, body) = send(
            &app,
            "POST",
            "/api/debt",
            Some(json!({"studentId": "nope", "amount": 10})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Student not found: nope");
    }

    #[tokio::test]
    async fn accrual_endpoint_is_idempotent_per_day() {
        let (app, clock) = app_with_clock(false);
        let (_, student) = send(
            &app,
            "POST",
            "/api/student",
            Some(json!({"name": "Eve", "age": 17, "sex": true, "fearFactor": 1})),
        )
        .await;
        send(&app, "POST", "/api/debt", Some(json!({"studentId": student["id"], "amount": 1000}))).await;

        clock.advance(Duration::days(1));
        let (status, first) = send(&app, "PUT", "/api/debt", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first[0]["totalAmount"], 1010.0);

        let (_, second) = send(&app, "PUT", "/api/debt", None).await;
        assert_eq!(second[0]["totalAmount"], 1010.0);
        assert_eq!(first[0]["lastUpdateDate"], second[0]["lastUpdateDate"]);
    }

    #[tokio::test]
    async fn appointment_booking_uses_first_fit() {
        let (app, _) = app_with_clock(true);
        // s1 has fear factor 2, so c1/c2 (seniority 2) are skipped and c3 is first.
        let (status, appt) = send(
            &app,
            "POST",
            "/api/appointment",
            Some(json!({"date": "2025-02-10", "studentId": "s1"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(appt["collectorId"], "c3");
        assert_eq!(appt["debtId"], "debt1");

        let (_, again) = send(
            &app,
            "POST",
            "/api/appointment",
            Some(json!({"date": "2025-02-10", "studentId": "s1"})),
        )
        .await;
        assert_eq!(again["collectorId"], "c4");

        let id = appt["id"].as_str().unwrap();
        let (status, fetched) = send(&app, "GET", &format!("/api/appointment/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["date"], "2025-02-10");
    }

    #[tokio::test]
    async fn appointment_without_capacity_is_rejected() {
        let (app, _) = app_with_clock(true);
        let (status, body) = send(
            &app,
            "POST",
            "/api/appointment",
            Some(json!({"date": "2025-02-10", "studentId": "s1", "studentFearFactor": 6})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("No available collectors"));

        let (_, list) = send(&app, "GET", "/api/appointment", None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn appointment_in_the_past_is_rejected() {
        let (app, _) = app_with_clock(true);
        let (status, body) = send(
            &app,
            "POST",
            "/api/appointment",
            Some(json!({"date": "2024-12-31", "studentId": "s1"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("past"));
    }

    #[tokio::test]
    async fn collector_seniority_bounds() {
        let (app, _) = app_with_clock(false);
        let (status, _) = send(
            &app,
            "POST",
            "/api/collector",
            Some(json!({"name": "Rookie", "seniority": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, created) = send(
            &app,
            "POST",
            "/api/collector",
            Some(json!({"name": "Veteran", "seniority": 10})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap();

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/api/collector/{id}"),
            Some(json!({"name": "Veteran", "seniority": 8})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["seniority"], 8);

        let (status, _) = send(&app, "DELETE", &format!("/api/collector/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "DELETE", &format!("/api/collector/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    async fn allowed_origin(cors_origin: &str) -> Option<String> {
        let mut config = Config::for_profile("");
        config.data.seed_sample_data = false;
        config.server.cors_origin = cors_origin.to_string();
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()));
        let state = Arc::new(AppState {
            service: Arc::new(build_service(&config, clock)),
            config,
        });
        let request = Request::builder()
            .uri("/health")
            .header("origin", "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = build_router(state).oneshot(request).await.unwrap();
        response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn cors_origin_follows_config() {
        assert_eq!(allowed_origin("*").await.as_deref(), Some("*"));
        assert_eq!(
            allowed_origin("http://localhost:5173").await.as_deref(),
            Some("http://localhost:5173")
        );
        // Unparseable origins fall back to allowing any.
        assert_eq!(allowed_origin("bad\norigin").await.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn far_future_debt_is_rejected_without_storing() {
        let (app, _) = app_with_clock(true);
        let (status, body) = send(
            &app,
            "POST",
            "/api/debt",
            Some(json!({"studentId": "s1", "amount": 1000, "lastUpdateDate": "9999-12-31"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation error: totalAmount overflow");

        let (_, list) = send(&app, "GET", "/api/debt", None).await;
        assert_eq!(list.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn loosely_shaped_bodies_get_json_errors() {
        let (app, _) = app_with_clock(true);
        let (status, created) = send(
            &app,
            "POST",
            "/api/student",
            Some(json!({"name": "x", "age": 17, "sex": 1, "fearFactor": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["sex"], true);

        let (status, body) = send(
            &app,
            "POST",
            "/api/student",
            Some(json!({"name": null, "age": 17, "sex": "male", "fearFactor": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("name"));

        let (status, _) = send(
            &app,
            "POST",
            "/api/collector",
            Some(json!({"name": null, "seniority": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            "POST",
            "/api/appointment",
            Some(json!({"date": "2025-02-10", "studentId": null})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("studentId"));
    }
}
