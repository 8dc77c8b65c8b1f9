use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shared_types::Role;
use uuid::Uuid;

use crate::common;

fn names(body: &Value) -> Vec<&str> {
    body.as_array()
        .expect("expected a JSON array")
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect()
}

#[tokio::test]
async fn teacher_lists_students_by_name() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::teacher(&store).await;
    common::sign_in(&store, "zoya.khan@students.university.edu", "Zoya Khan", Role::Student).await;
    common::student(&store).await;
    common::sign_in(&store, "arjun.nair@students.university.edu", "Arjun Nair", Role::Student).await;

    let (status, body) = common::get(&app, "/api/profiles?role=student", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Arjun Nair", "Kabir Das", "Zoya Khan"]);
}

#[tokio::test]
async fn teacher_cannot_list_every_user() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::teacher(&store).await;

    let (status, body) = common::get(&app, "/api/profiles", Some(&cookie)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "Unauthorized");
}

#[tokio::test]
async fn student_cannot_list_students() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::student(&store).await;

    let (status, _) = common::get(&app, "/api/profiles?role=student", Some(&cookie)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_lists_everyone_with_limit() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::admin(&store).await;
    common::student(&store).await;
    common::teacher(&store).await;
    common::officer(&store).await;

    let (status, body) = common::get(&app, "/api/profiles", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Asha Rao", "Kabir Das", "Meera Iyer", "Ravi Menon"]);

    let (status, body) = common::get(&app, "/api/profiles?limit=2", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Asha Rao", "Kabir Das"]);
}

#[tokio::test]
async fn unknown_role_filter_is_bad_request() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::admin(&store).await;

    let (status, body) = common::get(&app, "/api/profiles?role=dean", Some(&cookie)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "BadRequest");
}

#[tokio::test]
async fn admin_assigns_role() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::admin(&store).await;
    let (student, _) = common::student(&store).await;

    let uri = format!("/api/profiles/{}/role", student.id);
    let (status, body) = common::put_json(&app, &uri, json!({ "role": "teacher" }), Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "teacher");

    let (_, listed) = common::get(&app, "/api/profiles?role=teacher", Some(&cookie)).await;
    assert_eq!(names(&listed), vec!["Kabir Das"]);
}

#[tokio::test]
async fn admin_cannot_change_own_role() {
    let (app, store) = common::test_app();
    let (admin, cookie) = common::admin(&store).await;

    let uri = format!("/api/profiles/{}/role", admin.id);
    let (status, body) = common::put_json(&app, &uri, json!({ "role": "student" }), Some(&cookie)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "BadRequest");
}

#[tokio::test]
async fn assigning_unknown_role_or_profile_fails() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::admin(&store).await;
    let (student, _) = common::student(&store).await;

    let uri = format!("/api/profiles/{}/role", student.id);
    let (status, _) = common::put_json(&app, &uri, json!({ "role": "dean" }), Some(&cookie)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/profiles/{}/role", Uuid::new_v4());
    let (status, body) = common::put_json(&app, &uri, json!({ "role": "teacher" }), Some(&cookie)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "NotFound");
}

#[tokio::test]
async fn only_admins_assign_roles() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::officer(&store).await;
    let (student, student_cookie) = common::student(&store).await;

    let uri = format!("/api/profiles/{}/role", student.id);
    let (status, _) = common::put_json(&app, &uri, json!({ "role": "super_admin" }), Some(&cookie)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = common::get(&app, "/api/profile", Some(&student_cookie)).await;
    assert_eq!(body["role"], "student");
}

#[tokio::test]
async fn directory_page_size_is_explicit() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::teacher(&store).await;
    for n in 0..60 {
        let email = format!("student{n:02}@students.university.edu");
        common::sign_in(&store, &email, &format!("Student {n:02}"), Role::Student).await;
    }

    let (_, body) = common::get(&app, "/api/profiles?role=student", Some(&cookie)).await;
    assert_eq!(names(&body).len(), 50);

    let (status, body) = common::get(&app, "/api/profiles?role=student&limit=200", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body).len(), 60);
    assert_eq!(shared_types::truncation_notice(60, shared_types::DIRECTORY_MAX_LIMIT), None);
}
