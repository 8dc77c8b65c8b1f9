use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use shared_types::Session;
use uuid::Uuid;

use crate::common;

fn location(headers: &axum::http::HeaderMap) -> &str {
    headers
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn signed_out_overview_redirects_to_login() {
    let (app, _store) = common::test_app();

    let (status, headers, _) = common::get_page(&app, "/", None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/login");
}

#[tokio::test]
async fn signed_out_section_remembers_requested_path() {
    let (app, _store) = common::test_app();

    let (status, headers, _) = common::get_page(&app, "/noc-request", None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/login?redirect=%2Fnoc-request");

    let (_, headers, _) = common::get_page(&app, "/students?q=rao", None).await;
    assert_eq!(location(&headers), "/login?redirect=%2Fstudents%3Fq%3Drao");
}

#[tokio::test]
async fn teacher_is_sent_home_from_users() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::teacher(&store).await;

    let (status, headers, _) = common::get_page(&app, "/users", Some(&cookie)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/");
}

#[tokio::test]
async fn student_cannot_open_approvals_but_can_request() {
    let (app, store) = common::test_app();
    let (_, cookie) = common::student(&store).await;

    let (status, _, _) = common::get_page(&app, "/noc-approvals", Some(&cookie)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (status, _, body) = common::get_page(&app, "/noc-request", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "page /noc-request");
}

#[tokio::test]
async fn every_role_reaches_each_allowed_section() {
    let (app, store) = common::test_app();
    let signed_in = [
        common::student(&store).await,
        common::teacher(&store).await,
        common::officer(&store).await,
        common::admin(&store).await,
    ];

    for (profile, cookie) in &signed_in {
        let descriptor = shared_types::describe(&profile.role);
        for section in shared_types::SectionId::ALL {
            let (status, _, _) = common::get_page(&app, section.path(), Some(cookie)).await;
            let expected = if descriptor.allows(section) {
                StatusCode::OK
            } else {
                StatusCode::SEE_OTHER
            };
            assert_eq!(status, expected, "{} -> {}", profile.role, section);
        }
    }
}

#[tokio::test]
async fn unknown_role_only_reaches_overview() {
    let (app, _store) = common::test_app();
    let cookie = common::cookie_for(&Session {
        user_id: Uuid::new_v4(),
        email: "visitor@university.edu".to_string(),
        display_name: "Visiting Scholar".to_string(),
        role: "librarian".to_string(),
        avatar_url: None,
    });

    let (status, _, _) = common::get_page(&app, "/", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, headers, _) = common::get_page(&app, "/profile", Some(&cookie)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/");
}

#[tokio::test]
async fn public_paths_are_not_gated() {
    let (app, _store) = common::test_app();

    for path in ["/login", "/login?redirect=%2Fprofile", "/assets/main.css", "/favicon.ico"] {
        let (status, _, _) = common::get_page(&app, path, None).await;
        assert_eq!(status, StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn unknown_page_falls_through_to_renderer() {
    let (app, _store) = common::test_app();

    let (status, _, body) = common::get_page(&app, "/nowhere", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "page /nowhere");
}
