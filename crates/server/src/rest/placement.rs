use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared_types::{
    AppError, Application, ApplicationStatusUpdate, NewApplication, NewNocRequest, NocRequest,
    NocReview, RequestStatus, SectionId, StatCard,
};
use uuid::Uuid;

use crate::auth::extractors::{SectionRequired, SessionRequired};
use crate::db::SharedStore;
use crate::placement::Placements;

const OVERVIEW: u8 = SectionId::Overview as u8;
const NOC_REQUEST: u8 = SectionId::NocRequest as u8;
const APPLICATIONS: u8 = SectionId::Applications as u8;
const NOC_APPROVALS: u8 = SectionId::NocApprovals as u8;

#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct NocListParams {
    /// `pending`, `approved` or `rejected`.
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// NOC requests
// ---------------------------------------------------------------------------

/// Reviewers get every request, students their own. Newest first.
#[utoipa::path(
    get,
    path = "/api/noc-requests",
    params(NocListParams),
    responses(
        (status = 200, description = "NOC requests", body = Vec<NocRequest>),
        (status = 400, description = "Unknown status", body = AppError),
        (status = 401, description = "No valid session", body = AppError)
    ),
    tag = "noc-requests"
)]
#[tracing::instrument(skip(store, session), fields(user_id = %session.user_id))]
pub async fn list_noc_requests(
    State(store): State<SharedStore>,
    SessionRequired(session): SessionRequired,
    Query(params): Query<NocListParams>,
) -> Result<Json<Vec<NocRequest>>, AppError> {
    let status = params
        .status
        .as_deref()
        .map(|s| {
            RequestStatus::parse(s)
                .ok_or_else(|| AppError::bad_request(format!("Unknown status '{s}'")))
        })
        .transpose()?;
    let requests = Placements::new(store.as_ref()).list_noc(&session, status).await?;
    Ok(Json(requests))
}

#[utoipa::path(
    post,
    path = "/api/noc-requests",
    request_body = NewNocRequest,
    responses(
        (status = 201, description = "Request submitted", body = NocRequest),
        (status = 403, description = "Not a student", body = AppError),
        (status = 422, description = "Invalid fields", body = AppError)
    ),
    tag = "noc-requests"
)]
#[tracing::instrument(skip(store, session, body), fields(user_id = %session.user_id))]
pub async fn submit_noc_request(
    State(store): State<SharedStore>,
    SectionRequired(session): SectionRequired<NOC_REQUEST>,
    Json(body): Json<NewNocRequest>,
) -> Result<(StatusCode, Json<NocRequest>), AppError> {
    let request = Placements::new(store.as_ref()).submit_noc(&session, &body).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

#[utoipa::path(
    put,
    path = "/api/noc-requests/{id}/review",
    params(("id" = Uuid, Path, description = "NOC request id")),
    request_body = NocReview,
    responses(
        (status = 200, description = "Reviewed request", body = NocRequest),
        (status = 400, description = "Not pending or not a decision", body = AppError),
        (status = 403, description = "Role cannot review", body = AppError),
        (status = 404, description = "No such request", body = AppError)
    ),
    tag = "noc-requests"
)]
#[tracing::instrument(skip(store, session, body), fields(reviewer_id = %session.user_id))]
pub async fn review_noc_request(
    State(store): State<SharedStore>,
    SectionRequired(session): SectionRequired<NOC_APPROVALS>,
    Path(id): Path<Uuid>,
    Json(body): Json<NocReview>,
) -> Result<Json<NocRequest>, AppError> {
    let request = Placements::new(store.as_ref())
        .review_noc(&session, id, &body)
        .await?;
    Ok(Json(request))
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/applications",
    responses(
        (status = 200, description = "Applications, newest first", body = Vec<Application>),
        (status = 403, description = "Role lacks the applications section", body = AppError)
    ),
    tag = "applications"
)]
#[tracing::instrument(skip(store, session), fields(user_id = %session.user_id))]
pub async fn list_applications(
    State(store): State<SharedStore>,
    SectionRequired(session): SectionRequired<APPLICATIONS>,
) -> Result<Json<Vec<Application>>, AppError> {
    let applications = Placements::new(store.as_ref())
        .list_applications(&session)
        .await?;
    Ok(Json(applications))
}

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = NewApplication,
    responses(
        (status = 201, description = "Application recorded", body = Application),
        (status = 403, description = "Not a student", body = AppError),
        (status = 422, description = "Invalid fields", body = AppError)
    ),
    tag = "applications"
)]
#[tracing::instrument(skip(store, session, body), fields(user_id = %session.user_id))]
pub async fn record_application(
    State(store): State<SharedStore>,
    SectionRequired(session): SectionRequired<APPLICATIONS>,
    Json(body): Json<NewApplication>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let application = Placements::new(store.as_ref())
        .record_application(&session, &body)
        .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    put,
    path = "/api/applications/{id}/status",
    params(("id" = Uuid, Path, description = "Application id")),
    request_body = ApplicationStatusUpdate,
    responses(
        (status = 200, description = "Updated application", body = Application),
        (status = 403, description = "Role cannot update applications", body = AppError),
        (status = 404, description = "No such application", body = AppError)
    ),
    tag = "applications"
)]
#[tracing::instrument(skip(store, session, body), fields(user_id = %session.user_id))]
pub async fn update_application_status(
    State(store): State<SharedStore>,
    SectionRequired(session): SectionRequired<APPLICATIONS>,
    Path(id): Path<Uuid>,
    Json(body): Json<ApplicationStatusUpdate>,
) -> Result<Json<Application>, AppError> {
    let application = Placements::new(store.as_ref())
        .update_application_status(&session, id, &body)
        .await?;
    Ok(Json(application))
}

/// Role-specific counters for the overview page.
#[utoipa::path(
    get,
    path = "/api/overview",
    responses(
        (status = 200, description = "Overview tiles", body = Vec<StatCard>),
        (status = 401, description = "No valid session", body = AppError)
    ),
    tag = "overview"
)]
#[tracing::instrument(skip(store, session), fields(user_id = %session.user_id))]
pub async fn overview(
    State(store): State<SharedStore>,
    SectionRequired(session): SectionRequired<OVERVIEW>,
) -> Result<Json<Vec<StatCard>>, AppError> {
    let cards = Placements::new(store.as_ref()).overview(&session).await?;
    Ok(Json(cards))
}
