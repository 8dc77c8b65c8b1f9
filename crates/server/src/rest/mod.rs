pub mod placement;
pub mod profile;
pub mod session;

use axum::{
    routing::{get, put},
    Router,
};

use crate::db::AppState;

/// JSON API consumed by REST clients. Browser pages use server functions.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Session and gate
        .route("/api/session", get(session::get_session))
        .route("/api/sections/{section}/access", get(session::section_access))
        // Profile Data Bridge
        .route(
            "/api/profile",
            get(profile::get_profile).patch(profile::patch_profile),
        )
        .route("/api/profiles", get(profile::list_profiles))
        .route("/api/profiles/{id}/role", put(profile::assign_role))
        // NOC requests
        .route(
            "/api/noc-requests",
            get(placement::list_noc_requests).post(placement::submit_noc_request),
        )
        .route("/api/noc-requests/{id}/review", put(placement::review_noc_request))
        // Applications
        .route(
            "/api/applications",
            get(placement::list_applications).post(placement::record_application),
        )
        .route(
            "/api/applications/{id}/status",
            put(placement::update_application_status),
        )
        .route("/api/overview", get(placement::overview))
}
