use axum::Router;
use shared_types::{
    AppError, AppErrorKind, Application, ApplicationStatus, ApplicationStatusUpdate,
    NewApplication, NewNocRequest, NocRequest, NocReview, Profile, ProfilePatch, RequestStatus,
    RoleAssignment, SectionAccess, SectionId, Session, SessionInfo, StatCard,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::db::{AppState, SharedStore};
use crate::health;
use crate::rest;

#[derive(OpenApi)]
#[openapi(
    info(title = "InternHub API", description = "Role-based internship dashboard"),
    paths(
        health::health_check,
        rest::session::get_session,
        rest::session::section_access,
        rest::profile::get_profile,
        rest::profile::patch_profile,
        rest::profile::list_profiles,
        rest::profile::assign_role,
        rest::placement::list_noc_requests,
        rest::placement::submit_noc_request,
        rest::placement::review_noc_request,
        rest::placement::list_applications,
        rest::placement::record_application,
        rest::placement::update_application_status,
        rest::placement::overview,
    ),
    components(schemas(
        AppError,
        AppErrorKind,
        health::HealthResponse,
        Session,
        SessionInfo,
        SectionId,
        SectionAccess,
        Profile,
        ProfilePatch,
        RoleAssignment,
        NocRequest,
        NewNocRequest,
        NocReview,
        RequestStatus,
        Application,
        NewApplication,
        ApplicationStatus,
        ApplicationStatusUpdate,
        StatCard,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "session", description = "Session and section gate"),
        (name = "profiles", description = "Profile Data Bridge and directory"),
        (name = "noc-requests", description = "No-Objection Certificate requests"),
        (name = "applications", description = "Internship applications"),
        (name = "overview", description = "Dashboard counters"),
    )
)]
pub struct ApiDoc;

/// REST API, health check, OAuth callback (when enabled) and the API
/// docs at `/docs`.
pub fn api_router(store: SharedStore) -> Router {
    let state = AppState { store };
    let flags = crate::config::feature_flags();

    let mut router = Router::new()
        .merge(rest::api_router())
        .route("/health", axum::routing::get(health::health_check));

    if flags.oauth {
        router = router.route(
            "/auth/callback/google",
            axum::routing::get(crate::auth::oauth_callback::oauth_callback),
        );
    }

    router
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
