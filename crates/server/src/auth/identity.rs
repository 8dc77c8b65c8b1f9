//! Identity provider seam and the session resolver built on it.

use async_trait::async_trait;
use axum::http::request::Parts;
use shared_types::{AppError, Session};

use super::cookies::{CookieSlot, PendingCookieAction};
use super::jwt::Claims;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_session(&self) -> Option<Session>;
    async fn sign_out(&self);
}

/// Identity carried by one request: the claims the auth middleware
/// validated plus the slot used to clear the cookie on sign-out.
#[derive(Debug, Clone, Default)]
pub struct RequestIdentity {
    claims: Option<Claims>,
    cookie_slot: Option<CookieSlot>,
}

impl RequestIdentity {
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            claims: parts.extensions.get::<Claims>().cloned(),
            cookie_slot: parts.extensions.get::<CookieSlot>().cloned(),
        }
    }

    /// Identity of the request a server function is handling.
    pub fn current() -> Self {
        match dioxus::fullstack::FullstackContext::current() {
            Some(ctx) => Self::from_parts(&ctx.parts_mut()),
            None => Self::default(),
        }
    }

    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }
}

#[async_trait]
impl IdentityProvider for RequestIdentity {
    async fn current_session(&self) -> Option<Session> {
        self.claims.as_ref().map(Claims::session)
    }

    async fn sign_out(&self) {
        if let Some(slot) = &self.cookie_slot {
            slot.put(PendingCookieAction::Clear);
        }
    }
}

/// Resolve the caller's session or fail with `Unauthenticated`.
pub async fn resolve_session(provider: &dyn IdentityProvider) -> Result<Session, AppError> {
    provider
        .current_session()
        .await
        .ok_or_else(|| AppError::unauthenticated("Sign in required"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use shared_types::AppErrorKind;
    use uuid::Uuid;

    fn claims(role: &str) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            email: "ravi@university.edu".to_string(),
            name: "Ravi Menon".to_string(),
            role: role.to_string(),
            avatar_url: None,
            exp: 0,
            iat: 0,
            jti: "t".to_string(),
        }
    }

    fn parts_with(claims: Option<Claims>, slot: Option<CookieSlot>) -> Parts {
        let (mut parts, _) = Request::builder().uri("/").body(()).unwrap().into_parts();
        if let Some(c) = claims {
            parts.extensions.insert(c);
        }
        if let Some(s) = slot {
            parts.extensions.insert(s);
        }
        parts
    }

    #[tokio::test]
    async fn resolves_session_from_validated_claims() {
        let c = claims("teacher");
        let identity = RequestIdentity::from_parts(&parts_with(Some(c.clone()), None));
        let session = resolve_session(&identity).await.unwrap();
        assert_eq!(session.user_id, c.sub);
        assert_eq!(session.role, "teacher");
    }

    #[tokio::test]
    async fn no_claims_is_unauthenticated() {
        let identity = RequestIdentity::from_parts(&parts_with(None, None));
        let err = resolve_session(&identity).await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Unauthenticated);
    }

    #[tokio::test]
    async fn sign_out_schedules_cookie_clear() {
        let slot = CookieSlot::default();
        let identity =
            RequestIdentity::from_parts(&parts_with(Some(claims("student")), Some(slot.clone())));
        identity.sign_out().await;
        assert_eq!(slot.take(), Some(PendingCookieAction::Clear));
    }
}
