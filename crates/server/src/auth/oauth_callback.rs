use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use oauth2::{AuthorizationCode, TokenResponse};
use shared_types::Session;
use tracing::{debug, error, info};

use super::{cookies, is_admin_email, jwt, oauth, oauth_state};
use crate::config::auth_settings;
use crate::db::SharedStore;
use crate::profile::{ProfileBridge, SignIn};

#[derive(Debug, serde::Deserialize)]
pub struct CallbackQuery {
    pub code: String,
    pub state: String,
}

fn error_redirect(msg: &str) -> Response {
    error!(error = %msg, "Sign-in failed");
    Redirect::to(&format!("/login?error={}", urlencoding::encode(msg))).into_response()
}

/// `GET /auth/callback/google`.
///
/// Exchanges the code, fetches the Google profile, enforces the email
/// domain allow-list, records the sign-in, sets the session cookie and
/// redirects to the path requested before sign-in.
pub async fn oauth_callback(
    State(store): State<SharedStore>,
    Query(params): Query<CallbackQuery>,
) -> Result<Response, Response> {
    info!("OAuth callback received");

    let (csrf_key, redirect_from_state) = oauth::parse_oauth_state(&params.state);
    let (verifier, redirect_in_store) = oauth_state::take_state(csrf_key)
        .await
        .ok_or_else(|| error_redirect("Invalid or expired sign-in attempt"))?;
    let redirect_after = redirect_in_store
        .or_else(|| oauth::sanitize_redirect(redirect_from_state));

    let client = oauth::build_google_client()
        .map_err(|e| error_redirect(&format!("OAuth configuration error: {e}")))?;

    let http_client = reqwest::Client::new();
    let token_response = client
        .exchange_code(AuthorizationCode::new(params.code))
        .set_pkce_verifier(verifier)
        .request_async(&http_client)
        .await
        .map_err(|e| error_redirect(&format!("Token exchange failed: {e}")))?;

    let info = oauth::fetch_google_user_info(token_response.access_token().secret())
        .await
        .map_err(|e| error_redirect(&e))?;

    let email = info.email.unwrap_or_default().trim().to_lowercase();
    if email.is_empty() || info.email_verified == Some(false) {
        return Err(error_redirect("Google did not return a verified email address"));
    }
    if !auth_settings().email_domain_allowed(&email) {
        return Err(error_redirect(
            "Please sign in with your university email address",
        ));
    }
    debug!(google_sub = %info.sub, "Google identity verified");

    let sign_in = SignIn {
        is_admin: is_admin_email(&email),
        name: info.name.unwrap_or_default(),
        avatar_url: info.picture,
        email,
    };
    let profile = ProfileBridge::new(store.as_ref())
        .record_sign_in(&sign_in)
        .await
        .map_err(|e| error_redirect(&e.message))?;

    let session = Session::from(profile);
    let token = jwt::issue_session_token(&session)
        .map_err(|e| error_redirect(&format!("Could not issue session: {e}")))?;

    let destination = redirect_after.unwrap_or_else(|| "/".to_string());
    let mut response = Redirect::to(&destination).into_response();
    cookies::set_session_cookie(response.headers_mut(), &token);

    info!(user_id = %session.user_id, role = %session.role, redirect = %destination, "Sign-in successful");
    Ok(response)
}
