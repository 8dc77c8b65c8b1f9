use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared_types::{evaluate, AppError, Profile, ProfilePatch, Role, RoleAssignment, SectionId};
use uuid::Uuid;

use crate::auth::extractors::{SectionRequired, SessionRequired};
use crate::db::SharedStore;
use crate::profile::ProfileBridge;

const PROFILE: u8 = SectionId::Profile as u8;
const USERS: u8 = SectionId::Users as u8;

#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct ProfileListParams {
    /// Role key, e.g. `student`.
    pub role: Option<String>,
    /// Page size, 1 to 200. Defaults to 50.
    pub limit: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Caller's profile", body = Profile),
        (status = 401, description = "No valid session", body = AppError),
        (status = 404, description = "No profile row", body = AppError),
        (status = 503, description = "Data store unavailable", body = AppError)
    ),
    tag = "profiles"
)]
#[tracing::instrument(skip(store, session), fields(user_id = %session.user_id))]
pub async fn get_profile(
    State(store): State<SharedStore>,
    SectionRequired(session): SectionRequired<PROFILE>,
) -> Result<Json<Profile>, AppError> {
    let profile = ProfileBridge::new(store.as_ref()).load(session.user_id).await?;
    Ok(Json(profile))
}

/// Save name, phone and department. An `email` key is ignored.
#[utoipa::path(
    patch,
    path = "/api/profile",
    request_body = ProfilePatch,
    responses(
        (status = 200, description = "Stored profile after the write", body = Profile),
        (status = 401, description = "No valid session", body = AppError),
        (status = 422, description = "Invalid fields", body = AppError)
    ),
    tag = "profiles"
)]
#[tracing::instrument(skip(store, session, patch), fields(user_id = %session.user_id))]
pub async fn patch_profile(
    State(store): State<SharedStore>,
    SectionRequired(session): SectionRequired<PROFILE>,
    Json(patch): Json<ProfilePatch>,
) -> Result<Json<Profile>, AppError> {
    let profile = ProfileBridge::new(store.as_ref())
        .save(session.user_id, &patch)
        .await?;
    Ok(Json(profile))
}

/// Profile directory. Listing students needs the students section;
/// any other listing needs the users section.
#[utoipa::path(
    get,
    path = "/api/profiles",
    params(ProfileListParams),
    responses(
        (status = 200, description = "Profiles ordered by name", body = Vec<Profile>),
        (status = 400, description = "Unknown role", body = AppError),
        (status = 403, description = "Role lacks the section", body = AppError)
    ),
    tag = "profiles"
)]
#[tracing::instrument(skip(store, session))]
pub async fn list_profiles(
    State(store): State<SharedStore>,
    SessionRequired(session): SessionRequired,
    Query(params): Query<ProfileListParams>,
) -> Result<Json<Vec<Profile>>, AppError> {
    let role = params
        .role
        .as_deref()
        .map(|r| Role::parse(r).ok_or_else(|| AppError::bad_request(format!("Unknown role '{r}'"))))
        .transpose()?;
    let section = match role {
        Some(Role::Student) => SectionId::Students,
        _ => SectionId::Users,
    };
    evaluate(Some(&session), section).map_err(|d| d.to_error(section))?;

    let profiles = ProfileBridge::new(store.as_ref())
        .list(role, params.limit)
        .await?;
    Ok(Json(profiles))
}

#[utoipa::path(
    put,
    path = "/api/profiles/{id}/role",
    params(("id" = Uuid, Path, description = "Profile id")),
    request_body = RoleAssignment,
    responses(
        (status = 200, description = "Updated profile", body = Profile),
        (status = 400, description = "Unknown role or own account", body = AppError),
        (status = 403, description = "Not an administrator", body = AppError),
        (status = 404, description = "No such profile", body = AppError)
    ),
    tag = "profiles"
)]
#[tracing::instrument(skip(store, session, body), fields(actor = %session.user_id))]
pub async fn assign_role(
    State(store): State<SharedStore>,
    SectionRequired(session): SectionRequired<USERS>,
    Path(id): Path<Uuid>,
    Json(body): Json<RoleAssignment>,
) -> Result<Json<Profile>, AppError> {
    let profile = ProfileBridge::new(store.as_ref())
        .assign_role(session.user_id, id, &body)
        .await?;
    Ok(Json(profile))
}
