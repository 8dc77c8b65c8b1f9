use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::Session;
use tower::ServiceExt;
use uuid::Uuid;

use crate::common;

#[tokio::test]
async fn session_requires_a_cookie() {
    let (app, _store) = common::test_app();

    let (status, body) = common::get(&app, "/api/session", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "Unauthenticated");
}

#[tokio::test]
async fn student_session_lists_allowed_sections() {
    let (app, store) = common::test_app();
    let (profile, cookie) = common::student(&store).await;

    let (status, body) = common::get(&app, "/api/session", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["user_id"], profile.id.to_string());
    assert_eq!(body["session"]["role"], "student");
    assert_eq!(body["role_label"], "Student");
    assert_eq!(
        body["allowed_sections"],
        json!(["overview", "profile", "noc-request", "applications"])
    );
    assert_eq!(body["default_path"], "/");
}

#[tokio::test]
async fn tampered_token_is_treated_as_signed_out() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::student(&store).await;
    let tampered = format!("{cookie}x");

    let (status, _) = common::get(&app, "/api/session", Some(&tampered)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bearer_token_is_accepted() {
    let (app, store) = common::test_app();
    let (profile, _) = common::teacher(&store).await;
    let token = server::auth::jwt::issue_session_token(&Session::from(profile)).unwrap();

    let req = Request::builder()
        .uri("/api/session")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_role_gets_guest_summary() {
    let (app, _store) = common::test_app();
    let cookie = common::cookie_for(&Session {
        user_id: Uuid::new_v4(),
        email: "visitor@university.edu".to_string(),
        display_name: "Visiting Scholar".to_string(),
        role: "librarian".to_string(),
        avatar_url: None,
    });

    let (status, body) = common::get(&app, "/api/session", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["role"], "librarian");
    assert_eq!(body["role_label"], "Guest");
    assert_eq!(body["allowed_sections"], json!(["overview"]));
}

#[tokio::test]
async fn section_access_reports_redirects() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::teacher(&store).await;

    let (status, body) = common::get(&app, "/api/sections/users/access", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["section"], "users");
    assert_eq!(body["authorized"], false);
    assert_eq!(body["redirect_to"], "/");

    let (status, body) =
        common::get(&app, "/api/sections/noc-approvals/access", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authorized"], true);
    assert!(body.get("redirect_to").is_none());

    let (_, body) = common::get(&app, "/api/sections/noc-request/access", None).await;
    assert_eq!(body["authorized"], false);
    assert_eq!(body["redirect_to"], "/login?redirect=%2Fnoc-request");
}

#[tokio::test]
async fn section_access_unknown_section_is_not_found() {
    let (app, _store) = common::test_app();

    let (status, body) = common::get(&app, "/api/sections/payroll/access", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "NotFound");
}
