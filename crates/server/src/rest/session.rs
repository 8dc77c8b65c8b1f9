use axum::{extract::Path, Json};
use shared_types::{AppError, SectionAccess, SectionId, SessionInfo};

use crate::auth::extractors::{MaybeSession, SessionRequired};

/// Current session with its role summary.
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Signed in", body = SessionInfo),
        (status = 401, description = "No valid session", body = AppError)
    ),
    tag = "session"
)]
pub async fn get_session(SessionRequired(session): SessionRequired) -> Json<SessionInfo> {
    Json(SessionInfo::from(session))
}

/// Evaluate the authorization gate for a section.
///
/// Always 200: the answer says where a denied caller should go.
#[utoipa::path(
    get,
    path = "/api/sections/{section}/access",
    params(("section" = String, Path, description = "Section key, e.g. `noc-request`")),
    responses(
        (status = 200, description = "Gate decision", body = SectionAccess),
        (status = 404, description = "Unknown section", body = AppError)
    ),
    tag = "session"
)]
pub async fn section_access(
    MaybeSession(session): MaybeSession,
    Path(section): Path<String>,
) -> Result<Json<SectionAccess>, AppError> {
    let section = SectionId::from_key(&section)
        .ok_or_else(|| AppError::not_found(format!("Unknown section '{section}'")))?;
    Ok(Json(SectionAccess::evaluate(session.as_ref(), section)))
}
