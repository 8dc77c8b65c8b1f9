use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common;

#[tokio::test]
async fn student_submits_pending_request() {
    let (app, store) = common::test_app();
    let (student, cookie) = common::student(&store).await;

    let (status, body) = common::post_json(
        &app,
        "/api/noc-requests",
        json!({
            "company": "  Infosys  ",
            "role_title": "Data Intern",
            "duration_weeks": 12,
            "notes": "Summer break"
        }),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["company"], "Infosys");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["student_id"], student.id.to_string());
    assert_eq!(body["student_name"], "Kabir Das");
}

#[tokio::test]
async fn invalid_request_reports_each_field() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::student(&store).await;

    let (status, body) = common::post_json(
        &app,
        "/api/noc-requests",
        json!({ "company": "", "role_title": "Intern", "duration_weeks": 0 }),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "ValidationError");
    assert!(body["field_errors"]["company"].is_string());
    assert!(body["field_errors"]["duration_weeks"].is_string());
}

#[tokio::test]
async fn blank_company_and_title_are_field_errors() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::student(&store).await;

    let (status, body) = common::post_json(
        &app,
        "/api/noc-requests",
        json!({ "company": "   ", "role_title": " ", "duration_weeks": 6 }),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["field_errors"]["company"].is_string());
    assert!(body["field_errors"]["role_title"].is_string());
}

#[tokio::test]
async fn only_students_submit() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::teacher(&store).await;

    let (status, body) = common::post_json(
        &app,
        "/api/noc-requests",
        json!({ "company": "Acme", "role_title": "Intern", "duration_weeks": 4 }),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "Unauthorized");
}

#[tokio::test]
async fn students_see_own_requests_reviewers_see_all() {
    let (app, store) = common::test_app();
    let (_, kabir) = common::student(&store).await;
    let (_, zoya) = common::sign_in(
        &store,
        "zoya.khan@students.university.edu",
        "Zoya Khan",
        shared_types::Role::Student,
    )
    .await;
    let (_, teacher) = common::teacher(&store).await;

    common::submit_noc(&app, &kabir, "Infosys").await;
    common::submit_noc(&app, &zoya, "Wipro").await;

    let (status, body) = common::get(&app, "/api/noc-requests", Some(&kabir)).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["company"], "Infosys");

    let (_, body) = common::get(&app, "/api/noc-requests", Some(&teacher)).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn review_approves_pending_request_once() {
    let (app, store) = common::test_app();
    let (_, student) = common::student(&store).await;
    let (teacher, teacher_cookie) = common::teacher(&store).await;
    let id = common::submit_noc(&app, &student, "Infosys").await;

    let uri = format!("/api/noc-requests/{id}/review");
    let (status, body) = common::put_json(
        &app,
        &uri,
        json!({ "decision": "approved", "note": "Enjoy the internship" }),
        Some(&teacher_cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");
    assert_eq!(body["reviewer_id"], teacher.id.to_string());
    assert_eq!(body["reviewer_note"], "Enjoy the internship");

    let (status, body) =
        common::put_json(&app, &uri, json!({ "decision": "rejected" }), Some(&teacher_cookie)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "BadRequest");

    let (_, mine) = common::get(&app, "/api/noc-requests", Some(&student)).await;
    assert_eq!(mine[0]["status"], "approved");
}

#[tokio::test]
async fn status_filter_narrows_the_queue() {
    let (app, store) = common::test_app();
    let (_, student) = common::student(&store).await;
    let (_, officer) = common::officer(&store).await;
    let first = common::submit_noc(&app, &student, "Infosys").await;
    common::submit_noc(&app, &student, "Wipro").await;

    let uri = format!("/api/noc-requests/{first}/review");
    let (status, _) =
        common::put_json(&app, &uri, json!({ "decision": "rejected" }), Some(&officer)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, pending) = common::get(&app, "/api/noc-requests?status=pending", Some(&officer)).await;
    let pending = pending.as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["company"], "Wipro");

    let (status, _) = common::get(&app, "/api/noc-requests?status=lost", Some(&officer)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn review_rejects_pending_decision_and_unknown_ids() {
    let (app, store) = common::test_app();
    let (_, student) = common::student(&store).await;
    let (_, admin) = common::admin(&store).await;
    let id = common::submit_noc(&app, &student, "Infosys").await;

    let uri = format!("/api/noc-requests/{id}/review");
    let (status, _) = common::put_json(&app, &uri, json!({ "decision": "pending" }), Some(&admin)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/noc-requests/{}/review", Uuid::new_v4());
    let (status, body) =
        common::put_json(&app, &uri, json!({ "decision": "approved" }), Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "NotFound");
}

#[tokio::test]
async fn students_cannot_review() {
    let (app, store) = common::test_app();
    let (_, student) = common::student(&store).await;
    let id = common::submit_noc(&app, &student, "Infosys").await;

    let uri = format!("/api/noc-requests/{id}/review");
    let (status, _) =
        common::put_json(&app, &uri, json!({ "decision": "approved" }), Some(&student)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
