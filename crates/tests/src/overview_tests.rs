use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shared_types::Session;
use uuid::Uuid;

use crate::common;

fn tiles(body: &Value) -> Vec<(String, i64)> {
    body.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|c| {
            (
                c["label"].as_str().unwrap_or_default().to_string(),
                c["value"].as_i64().unwrap_or_default(),
            )
        })
        .collect()
}

fn tile(label: &str, value: i64) -> (String, i64) {
    (label.to_string(), value)
}

#[tokio::test]
async fn student_tiles_count_own_work() {
    let (app, store) = common::test_app();
    let (_, student) = common::student(&store).await;
    let (_, officer) = common::officer(&store).await;
    common::submit_noc(&app, &student, "Infosys").await;
    let application = common::record_application(&app, &student, "Zoho").await;
    common::record_application(&app, &student, "Freshworks").await;

    let uri = format!("/api/applications/{application}/status");
    common::put_json(&app, &uri, json!({ "status": "selected" }), Some(&officer)).await;

    let (status, body) = common::get(&app, "/api/overview", Some(&student)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        tiles(&body),
        vec![
            tile("NOC requests", 1),
            tile("Awaiting approval", 1),
            tile("Applications", 2),
            tile("Offers", 1),
        ]
    );
    assert_eq!(body[0]["link"], "noc-request");
}

#[tokio::test]
async fn teacher_tiles() {
    let (app, store) = common::test_app();
    let (_, student) = common::student(&store).await;
    let (_, teacher) = common::teacher(&store).await;
    common::submit_noc(&app, &student, "Infosys").await;
    common::submit_noc(&app, &student, "Wipro").await;

    let (_, body) = common::get(&app, "/api/overview", Some(&teacher)).await;
    assert_eq!(tiles(&body), vec![tile("Pending approvals", 2), tile("Students", 1)]);
}

#[tokio::test]
async fn officer_tiles() {
    let (app, store) = common::test_app();
    let (_, student) = common::student(&store).await;
    let (_, officer) = common::officer(&store).await;
    common::record_application(&app, &student, "Zoho").await;

    let (_, body) = common::get(&app, "/api/overview", Some(&officer)).await;
    assert_eq!(
        tiles(&body),
        vec![
            tile("Pending approvals", 0),
            tile("Applications", 1),
            tile("Selected", 0),
            tile("Students", 1),
        ]
    );
}

#[tokio::test]
async fn admin_tiles_count_accounts_per_role() {
    let (app, store) = common::test_app();
    let (_, admin) = common::admin(&store).await;
    common::student(&store).await;
    common::teacher(&store).await;

    let (_, body) = common::get(&app, "/api/overview", Some(&admin)).await;
    assert_eq!(
        tiles(&body),
        vec![
            tile("Pending approvals", 0),
            tile("Student accounts", 1),
            tile("Faculty Mentor accounts", 1),
            tile("T&P Officer accounts", 0),
            tile("Administrator accounts", 1),
        ]
    );
}

#[tokio::test]
async fn unknown_role_gets_no_tiles() {
    let (app, _store) = common::test_app();
    let cookie = common::cookie_for(&Session {
        user_id: Uuid::new_v4(),
        email: "visitor@university.edu".to_string(),
        display_name: "Visiting Scholar".to_string(),
        role: "librarian".to_string(),
        avatar_url: None,
    });

    let (status, body) = common::get(&app, "/api/overview", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
