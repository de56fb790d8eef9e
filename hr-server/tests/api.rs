//! End-to-end API tests against the full router with an in-memory store.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use hr_server::core::{Config, ServerState};
use hr_server::db::HrStorage;

fn test_app() -> Router {
    let config = Config {
        work_dir: "/tmp".to_string(),
        http_port: 0,
        environment: "test".to_string(),
        min_percent_change: rust_decimal::Decimal::from(-25),
        max_percent_change: rust_decimal::Decimal::from(50),
    };
    let storage = HrStorage::open_in_memory().unwrap();
    hr_server::api::build_app(ServerState::with_storage(config, storage))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn setup_employee(app: &Router, email: &str, salary: i64) -> String {
    let (status, dep) = send(
        app,
        "POST",
        "/api/departments",
        Some(json!({ "name": format!("dep-{email}"), "acting_user": "hr-admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, employee) = send(
        app,
        "POST",
        "/api/employees",
        Some(json!({
            "first_name": "Grace",
            "last_name": "Hopper",
            "email": email,
            "hire_date": "2020-06-01",
            "department_id": dep["id"],
            "job_title": "Engineer",
            "salary": salary.to_string(),
            "acting_user": "hr-admin"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    employee["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn unknown_employee_is_404_with_structured_body() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/api/employees/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
    assert_eq!(body["kind"], "NotFound");
}

#[tokio::test]
async fn salary_change_lifecycle() {
    let app = test_app();
    let id = setup_employee(&app, "grace@example.com", 80_000).await;

    // 80000 -> 90000 commits
    let (status, record) = send(
        &app,
        "POST",
        &format!("/api/employees/{id}/salary"),
        Some(json!({
            "new_salary": "90000",
            "reason": "promotion",
            "acting_user": "hr-admin"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["new_salary"], "90000");
    assert_eq!(record["previous_salary"], "80000");

    // same value again is a no-op conflict
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/employees/{id}/salary"),
        Some(json!({
            "new_salary": "90000",
            "reason": "again",
            "acting_user": "hr-admin"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "NoChange");

    // 90000 -> 200000 is outside the band
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/employees/{id}/salary"),
        Some(json!({
            "new_salary": "200000",
            "reason": "dream big",
            "acting_user": "hr-admin"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "OutOfPolicyRange");
    assert_eq!(body["code"], "E1002");
    assert!(body["details"]["percent"].is_string());

    // history: initial record + one change, newest first
    let (status, history) = send(
        &app,
        "GET",
        &format!("/api/employees/{id}/salary-history"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let history = history.as_array().unwrap().clone();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["new_salary"], "90000");
    assert_eq!(history[1]["previous_salary"], Value::Null);
}

#[tokio::test]
async fn employee_update_has_no_salary_path() {
    let app = test_app();
    let id = setup_employee(&app, "ada@example.com", 80_000).await;

    // a salary field on PUT is simply ignored by the DTO
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/employees/{id}"),
        Some(json!({
            "job_title": "Staff Engineer",
            "salary": "999999",
            "acting_user": "hr-admin"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["job_title"], "Staff Engineer");
    assert_eq!(updated["salary"], "80000");
}

#[tokio::test]
async fn batch_adjustments_report_per_item_outcomes() {
    let app = test_app();
    let a = setup_employee(&app, "a@example.com", 90_000).await;
    let b = setup_employee(&app, "b@example.com", 50_000).await;

    let (status, outcomes) = send(
        &app,
        "POST",
        "/api/salary-adjustments",
        Some(json!({
            "items": [
                { "employee_id": a, "new_salary": "95000", "reason": "merit", "acting_user": "hr-admin" },
                { "employee_id": b, "new_salary": "-1", "reason": "typo", "acting_user": "hr-admin" }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let outcomes = outcomes.as_array().unwrap().clone();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0]["success"], true);
    assert_eq!(outcomes[1]["success"], false);
    assert_eq!(outcomes[1]["errorKind"], "InvalidValue");

    // the committed sibling stuck
    let (_, employee) = send(&app, "GET", &format!("/api/employees/{a}"), None).await;
    assert_eq!(employee["salary"], "95000");
}

#[tokio::test]
async fn audit_log_records_and_verifies() {
    let app = test_app();
    let id = setup_employee(&app, "grace@example.com", 80_000).await;
    send(
        &app,
        "POST",
        &format!("/api/employees/{id}/salary"),
        Some(json!({
            "new_salary": "90000",
            "reason": "promotion",
            "acting_user": "hr-admin"
        })),
    )
    .await;

    let (status, page) = send(&app, "GET", "/api/audit-log?entity_type=employee", None).await;
    assert_eq!(status, StatusCode::OK);
    // employee insert + salary update, newest first
    assert_eq!(page["totalCount"], 2);
    assert_eq!(page["items"][0]["action"], "update");
    assert_eq!(page["items"][0]["changes"][0]["field"], "salary");

    let (status, verification) = send(&app, "GET", "/api/audit-log/verify", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verification["chain_intact"], true);
    assert_eq!(verification["breaks"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn reports_summarize_departments() {
    let app = test_app();
    setup_employee(&app, "grace@example.com", 80_000).await;

    let (status, summaries) = send(&app, "GET", "/api/reports/departments", None).await;
    assert_eq!(status, StatusCode::OK);
    let summaries = summaries.as_array().unwrap().clone();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["headcount"], 1);
    assert_eq!(summaries[0]["totalSalary"], "80000");
}

#[tokio::test]
async fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hr.redb");
    let config = Config {
        work_dir: dir.path().to_string_lossy().into_owned(),
        http_port: 0,
        environment: "test".to_string(),
        min_percent_change: rust_decimal::Decimal::from(-25),
        max_percent_change: rust_decimal::Decimal::from(50),
    };

    let id = {
        let storage = HrStorage::open(&path).unwrap();
        let app = hr_server::api::build_app(ServerState::with_storage(config.clone(), storage));
        setup_employee(&app, "grace@example.com", 80_000).await
    };

    let storage = HrStorage::open(&path).unwrap();
    let app = hr_server::api::build_app(ServerState::with_storage(config, storage));
    let (status, employee) = send(&app, "GET", &format!("/api/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(employee["salary"], "80000");
}
