use dioxus::prelude::*;
use shared_types::{FeatureFlags, SectionAccess, SectionId, Session};

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::*;

/// The signed-in session, or `None` when there is no valid cookie.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_current_session() -> Result<Option<Session>, ServerFnError> {
    use crate::auth::identity::{IdentityProvider, RequestIdentity};

    Ok(RequestIdentity::current().current_session().await)
}

/// Re-read the caller's profile and re-issue the session cookie so role
/// and name changes take effect. Clears the cookie when the profile is
/// gone.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn refresh_session() -> Result<Option<Session>, ServerFnError> {
    use crate::auth::{cookies, jwt};
    use crate::profile::ProfileBridge;
    use shared_types::{AppError, AppErrorKind};

    let current = require_session().await?;
    let store = store()?;
    let profile = match ProfileBridge::new(store.as_ref()).load(current.user_id).await {
        Ok(profile) => profile,
        Err(e) if e.kind == AppErrorKind::NotFound => {
            tracing::warn!(user_id = %current.user_id, "Session references a missing profile, signing out");
            cookies::schedule_clear_cookie();
            return Ok(None);
        }
        Err(e) => return Err(e.into_server_fn_error()),
    };

    let session = Session::from(profile);
    let token = jwt::issue_session_token(&session)
        .map_err(|e| AppError::configuration(format!("Could not issue session: {e}")).into_server_fn_error())?;
    cookies::schedule_session_cookie(&token);

    if session.role != current.role {
        tracing::info!(user_id = %session.user_id, from = %current.role, to = %session.role, "Session role refreshed");
    }
    Ok(Some(session))
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    use crate::auth::identity::{IdentityProvider, RequestIdentity};

    RequestIdentity::current().sign_out().await;
    Ok(())
}

/// Google sign-in URL. `redirect_after` is where to land once signed in.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn oauth_authorize_url(redirect_after: Option<String>) -> Result<String, ServerFnError> {
    use shared_types::AppError;

    if !crate::config::feature_flags().oauth {
        return Err(AppError::configuration("Sign-in with Google is disabled").into_server_fn_error());
    }

    crate::auth::oauth::get_authorize_url(redirect_after)
        .await
        .map_err(|e| AppError::configuration(e).into_server_fn_error())
}

#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}

/// Gate decision for the caller and `section`.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn check_section_access(section: SectionId) -> Result<SectionAccess, ServerFnError> {
    use crate::auth::identity::{IdentityProvider, RequestIdentity};

    let session = RequestIdentity::current().current_session().await;
    Ok(SectionAccess::evaluate(session.as_ref(), section))
}
