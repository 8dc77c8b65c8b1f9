use axum::{extract::FromRequestParts, http::request::Parts};
use shared_types::{evaluate, AppError, SectionId, Session};

use super::jwt::Claims;

/// Requires a valid session. 401 otherwise.
pub struct SessionRequired(pub Session);

impl<S: Send + Sync> FromRequestParts<S> for SessionRequired {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .map(|claims| SessionRequired(claims.session()))
            .ok_or_else(|| AppError::unauthenticated("Sign in required"))
    }
}

/// Optional session. Never fails.
pub struct MaybeSession(pub Option<Session>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeSession(
            parts.extensions.get::<Claims>().map(Claims::session),
        ))
    }
}

/// Requires a session whose role may open the section tagged `SECTION`
/// (see `SectionId::tag`). 401 without a session, 403 when the role lacks
/// the section.
pub struct SectionRequired<const SECTION: u8>(pub Session);

impl<const SECTION: u8, S: Send + Sync> FromRequestParts<S> for SectionRequired<SECTION> {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let section = SectionId::from_tag(SECTION)
            .ok_or_else(|| AppError::internal(format!("Unknown section tag {SECTION}")))?;
        let session = parts.extensions.get::<Claims>().map(Claims::session);

        evaluate(session.as_ref(), section).map_err(|denial| denial.to_error(section))?;

        session
            .map(SectionRequired)
            .ok_or_else(|| AppError::unauthenticated("Sign in required"))
    }
}
