use std::sync::{Arc, Once};

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode, Uri},
    Router,
};
use serde_json::Value;
use server::auth::cookies::SESSION_COOKIE;
use server::profile::{ProfileBridge, SignIn};
use server::store::MemoryStore;
use shared_types::{Profile, Role, RoleAssignment, Session};
use tower::ServiceExt;
use uuid::Uuid;

static ENV: Once = Once::new();

/// Stand-in for the Dioxus page renderer: echoes the path it was asked for.
async fn page(uri: Uri) -> String {
    format!("page {}", uri.path())
}

/// Build a test router over a fresh in-memory store, wrapped in the same
/// session layers the app uses.
pub fn test_app() -> (Router, Arc<MemoryStore>) {
    ENV.call_once(|| std::env::set_var("JWT_SECRET", "integration-test-secret"));

    let store = Arc::new(MemoryStore::new());
    let router = server::openapi::api_router(store.clone()).fallback(page);
    let router = server::auth::middleware::with_session_layers(router);
    (router, store)
}

/// Create (or reuse) a profile for `email` with `role` and return it with
/// a `Cookie` header value carrying its session.
pub async fn sign_in(store: &MemoryStore, email: &str, name: &str, role: Role) -> (Profile, String) {
    let bridge = ProfileBridge::new(store);
    let mut profile = bridge
        .record_sign_in(&SignIn {
            email: email.to_string(),
            name: name.to_string(),
            avatar_url: None,
            is_admin: false,
        })
        .await
        .expect("Failed to record sign-in");

    if profile.role != role.as_str() {
        profile = bridge
            .assign_role(
                Uuid::nil(),
                profile.id,
                &RoleAssignment {
                    role: role.as_str().to_string(),
                },
            )
            .await
            .expect("Failed to assign role");
    }

    let cookie = cookie_for(&Session::from(profile.clone()));
    (profile, cookie)
}

/// `Cookie` header value for an arbitrary session, stored or not.
pub fn cookie_for(session: &Session) -> String {
    let token = server::auth::jwt::issue_session_token(session).expect("Failed to issue token");
    format!("{SESSION_COOKIE}={token}")
}

pub async fn student(store: &MemoryStore) -> (Profile, String) {
    sign_in(store, "kabir.das@students.university.edu", "Kabir Das", Role::Student).await
}

pub async fn teacher(store: &MemoryStore) -> (Profile, String) {
    sign_in(store, "meera.iyer@university.edu", "Meera Iyer", Role::Teacher).await
}

pub async fn officer(store: &MemoryStore) -> (Profile, String) {
    sign_in(store, "placements@university.edu", "Ravi Menon", Role::TpOfficer).await
}

pub async fn admin(store: &MemoryStore) -> (Profile, String) {
    sign_in(store, "admin@university.edu", "Asha Rao", Role::SuperAdmin).await
}

fn request(method: Method, uri: &str, cookie: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// GET a route, optionally signed in.
pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> (StatusCode, Value) {
    send(app, request(Method::GET, uri, cookie, None)).await
}

/// POST JSON to a route.
pub async fn post_json(app: &Router, uri: &str, body: Value, cookie: Option<&str>) -> (StatusCode, Value) {
    send(app, request(Method::POST, uri, cookie, Some(&body))).await
}

/// PUT JSON to a route.
pub async fn put_json(app: &Router, uri: &str, body: Value, cookie: Option<&str>) -> (StatusCode, Value) {
    send(app, request(Method::PUT, uri, cookie, Some(&body))).await
}

/// PATCH JSON to a route.
pub async fn patch_json(app: &Router, uri: &str, body: Value, cookie: Option<&str>) -> (StatusCode, Value) {
    send(app, request(Method::PATCH, uri, cookie, Some(&body))).await
}

/// GET a page and return status plus headers, for redirect assertions.
pub async fn get_page(app: &Router, uri: &str, cookie: Option<&str>) -> (StatusCode, HeaderMap, String) {
    let response = app
        .clone()
        .oneshot(request(Method::GET, uri, cookie, None))
        .await
        .expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    (status, headers, String::from_utf8_lossy(&body_bytes).to_string())
}

/// Send a request through the router and parse the response.
async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&body_bytes).to_string(),
        ))
    };

    (status, body)
}

/// Submit a NOC request as `cookie` and return its id.
pub async fn submit_noc(app: &Router, cookie: &str, company: &str) -> String {
    let (status, body) = post_json(
        app,
        "/api/noc-requests",
        serde_json::json!({
            "company": company,
            "role_title": "Backend Intern",
            "start_date": "2026-12-01",
            "duration_weeks": 8
        }),
        Some(cookie),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "submit failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

/// Record an application as `cookie` and return its id.
pub async fn record_application(app: &Router, cookie: &str, company: &str) -> String {
    let (status, body) = post_json(
        app,
        "/api/applications",
        serde_json::json!({ "company": company, "position": "SDE Intern" }),
        Some(cookie),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "record failed: {body}");
    body["id"].as_str().unwrap().to_string()
}
