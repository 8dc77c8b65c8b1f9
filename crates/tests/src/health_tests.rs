use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn health_needs_no_session() {
    let (app, _store) = common::test_app();

    let (status, body) = common::get(&app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "connected");
    assert!(body["version"].is_string());
    assert!(body["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn health_reports_unreachable_store() {
    let (app, store) = common::test_app();
    store.set_offline(true);

    let (status, body) = common::get(&app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["store"].as_str().unwrap().starts_with("error:"));
}

#[tokio::test]
async fn api_docs_are_public() {
    let (app, _store) = common::test_app();

    let (status, _, _) = common::get_page(&app, "/docs", None).await;
    assert_eq!(status, StatusCode::OK);
}
