use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shared_types::Session;
use uuid::Uuid;

use crate::common;

#[tokio::test]
async fn load_returns_stored_profile() {
    let (app, store) = common::test_app();
    let (profile, cookie) = common::student(&store).await;

    let (status, body) = common::get(&app, "/api/profile", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], profile.id.to_string());
    assert_eq!(body["email"], "kabir.das@students.university.edu");
    assert_eq!(body["role"], "student");
    assert_eq!(body["phone"], Value::Null);
}

#[tokio::test]
async fn load_without_session_is_unauthenticated() {
    let (app, _store) = common::test_app();

    let (status, body) = common::get(&app, "/api/profile", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "Unauthenticated");
}

#[tokio::test]
async fn three_digit_phone_is_saved() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::student(&store).await;

    let (status, body) =
        common::patch_json(&app, "/api/profile", json!({ "phone": "123" }), Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone"], "123");
    assert!(body["updated_at"].is_string());
}

#[tokio::test]
async fn email_in_patch_is_ignored() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::student(&store).await;

    let (status, body) = common::patch_json(
        &app,
        "/api/profile",
        json!({ "email": "someone.else@elsewhere.com", "name": "Kabir D." }),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Kabir D.");
    assert_eq!(body["email"], "kabir.das@students.university.edu");

    let (_, reloaded) = common::get(&app, "/api/profile", Some(&cookie)).await;
    assert_eq!(reloaded["email"], "kabir.das@students.university.edu");
    assert_eq!(reloaded["name"], "Kabir D.");
}

#[tokio::test]
async fn invalid_fields_return_field_errors() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::student(&store).await;

    let (status, body) = common::patch_json(
        &app,
        "/api/profile",
        json!({ "name": "   ", "phone": "12" }),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "ValidationError");
    assert!(body["field_errors"]["name"].is_string());
    assert!(body["field_errors"]["phone"].is_string());

    // Nothing was written.
    let (_, reloaded) = common::get(&app, "/api/profile", Some(&cookie)).await;
    assert_eq!(reloaded["name"], "Kabir Das");
    assert_eq!(reloaded["phone"], Value::Null);
}

#[tokio::test]
async fn empty_string_clears_department() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::student(&store).await;

    common::patch_json(&app, "/api/profile", json!({ "department": "Mechanical" }), Some(&cookie)).await;
    let (status, body) =
        common::patch_json(&app, "/api/profile", json!({ "department": "" }), Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["department"], Value::Null);
}

#[tokio::test]
async fn last_write_wins() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::student(&store).await;

    let first = common::patch_json(&app, "/api/profile", json!({ "name": "First Tab" }), Some(&cookie));
    let second =
        common::patch_json(&app, "/api/profile", json!({ "name": "Second Tab" }), Some(&cookie));
    let (first_status, _) = first.await;
    let (second_status, _) = second.await;
    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);

    let (_, reloaded) = common::get(&app, "/api/profile", Some(&cookie)).await;
    assert_eq!(reloaded["name"], "Second Tab");
}

#[tokio::test]
async fn empty_patch_returns_current_row() {
    let (app, store) = common::test_app();
    let (profile, cookie) = common::student(&store).await;

    let (status, body) = common::patch_json(&app, "/api/profile", json!({}), Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], profile.name);
}

#[tokio::test]
async fn missing_row_is_not_found() {
    let (app, _store) = common::test_app();
    let cookie = common::cookie_for(&Session {
        user_id: Uuid::new_v4(),
        email: "ghost@students.university.edu".to_string(),
        display_name: "Ghost".to_string(),
        role: "student".to_string(),
        avatar_url: None,
    });

    let (status, body) = common::get(&app, "/api/profile", Some(&cookie)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "NotFound");
}

#[tokio::test]
async fn unknown_role_cannot_open_profile() {
    let (app, _store) = common::test_app();
    let cookie = common::cookie_for(&Session {
        user_id: Uuid::new_v4(),
        email: "visitor@university.edu".to_string(),
        display_name: "Visiting Scholar".to_string(),
        role: "librarian".to_string(),
        avatar_url: None,
    });

    let (status, body) = common::get(&app, "/api/profile", Some(&cookie)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "Unauthorized");
}

#[tokio::test]
async fn offline_store_is_transient() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::student(&store).await;
    store.set_offline(true);

    let (status, body) = common::get(&app, "/api/profile", Some(&cookie)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["kind"], "Transient");

    store.set_offline(false);
    let (status, _) = common::get(&app, "/api/profile", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
}
