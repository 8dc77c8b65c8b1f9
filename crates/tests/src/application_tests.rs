use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common;

#[tokio::test]
async fn student_records_application_dated_today() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::student(&store).await;

    let (status, body) = common::post_json(
        &app,
        "/api/applications",
        json!({ "company": "Zoho", "position": "QA Intern" }),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "applied");
    let today = chrono::Utc::now().date_naive().to_string();
    assert_eq!(body["applied_on"], today);
}

#[tokio::test]
async fn explicit_application_date_is_kept() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::student(&store).await;

    let (status, body) = common::post_json(
        &app,
        "/api/applications",
        json!({ "company": "Zoho", "position": "QA Intern", "applied_on": "2026-09-14" }),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["applied_on"], "2026-09-14");
}

#[tokio::test]
async fn missing_position_is_a_field_error() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::student(&store).await;

    let (status, body) = common::post_json(
        &app,
        "/api/applications",
        json!({ "company": "Zoho", "position": "" }),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["field_errors"]["position"].is_string());
}

#[tokio::test]
async fn blank_position_is_a_field_error() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::student(&store).await;

    let (status, body) = common::post_json(
        &app,
        "/api/applications",
        json!({ "company": "Zoho", "position": "   " }),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["field_errors"]["position"].is_string());

    let (_, listed) = common::get(&app, "/api/applications", Some(&cookie)).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn officer_cannot_record_but_sees_everything() {
    let (app, store) = common::test_app();
    let (_, student) = common::student(&store).await;
    let (_, officer) = common::officer(&store).await;
    common::record_application(&app, &student, "Zoho").await;
    common::record_application(&app, &student, "Freshworks").await;

    let (status, _) = common::post_json(
        &app,
        "/api/applications",
        json!({ "company": "Zoho", "position": "QA Intern" }),
        Some(&officer),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = common::get(&app, "/api/applications", Some(&officer)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn teacher_has_no_applications_section() {
    let (app, store) = common::test_app();
    let (_, teacher) = common::teacher(&store).await;

    let (status, body) = common::get(&app, "/api/applications", Some(&teacher)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "Unauthorized");
}

#[tokio::test]
async fn officer_moves_application_through_pipeline() {
    let (app, store) = common::test_app();
    let (_, student) = common::student(&store).await;
    let (_, officer) = common::officer(&store).await;
    let id = common::record_application(&app, &student, "Zoho").await;

    let uri = format!("/api/applications/{id}/status");
    let (status, body) =
        common::put_json(&app, &uri, json!({ "status": "shortlisted" }), Some(&officer)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "shortlisted");

    let (status, _) =
        common::put_json(&app, &uri, json!({ "status": "selected" }), Some(&officer)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, mine) = common::get(&app, "/api/applications", Some(&student)).await;
    assert_eq!(mine[0]["status"], "selected");
}

#[tokio::test]
async fn status_updates_are_checked() {
    let (app, store) = common::test_app();
    let (_, student) = common::student(&store).await;
    let (_, officer) = common::officer(&store).await;
    let id = common::record_application(&app, &student, "Zoho").await;
    let uri = format!("/api/applications/{id}/status");

    let (status, _) =
        common::put_json(&app, &uri, json!({ "status": "selected" }), Some(&student)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) =
        common::put_json(&app, &uri, json!({ "status": "hired" }), Some(&officer)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let missing = format!("/api/applications/{}/status", Uuid::new_v4());
    let (status, _) =
        common::put_json(&app, &missing, json!({ "status": "rejected" }), Some(&officer)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
