use oauth2::{
    basic::BasicClient, AuthUrl, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    PkceCodeChallenge, RedirectUrl, Scope, TokenUrl,
};

use super::oauth_state;

/// OAuth client with auth URL, token URL and redirect URL set.
type ConfiguredClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

fn required_env(name: &str) -> Result<String, String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("{name} not set"))
}

pub fn build_google_client() -> Result<ConfiguredClient, String> {
    let client_id = required_env("OAUTH_GOOGLE_CLIENT_ID")?;
    let client_secret = required_env("OAUTH_GOOGLE_CLIENT_SECRET")?;
    let redirect_url = required_env("OAUTH_GOOGLE_REDIRECT_URL")?;

    let client = BasicClient::new(ClientId::new(client_id))
        .set_client_secret(ClientSecret::new(client_secret))
        .set_auth_uri(AuthUrl::new(GOOGLE_AUTH_URL.to_string()).map_err(|e| e.to_string())?)
        .set_token_uri(TokenUrl::new(GOOGLE_TOKEN_URL.to_string()).map_err(|e| e.to_string())?)
        .set_redirect_uri(RedirectUrl::new(redirect_url).map_err(|e| e.to_string())?);

    Ok(client)
}

/// Only same-site absolute paths survive the round trip. Anything else
/// (full URLs, protocol-relative `//host`, empty) is dropped.
pub fn sanitize_redirect(path: Option<&str>) -> Option<String> {
    let path = path?.trim();
    let safe = path.starts_with('/') && !path.starts_with("//") && !path.contains('\\');
    safe.then(|| path.to_string())
}

/// Build the Google authorization URL and remember the CSRF state.
///
/// The post-login path rides in the `state` parameter as `{csrf}|{path}`.
pub async fn get_authorize_url(redirect_after: Option<String>) -> Result<String, String> {
    let client = build_google_client()?;
    let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

    let csrf_token = CsrfToken::new_random();
    let csrf_secret = csrf_token.secret().clone();
    let redirect_after = sanitize_redirect(redirect_after.as_deref());

    let state_param = match &redirect_after {
        Some(path) => format!("{csrf_secret}|{path}"),
        None => csrf_secret.clone(),
    };

    let (url, _) = client
        .authorize_url(|| CsrfToken::new(state_param))
        .set_pkce_challenge(pkce_challenge)
        .add_scope(Scope::new("openid".to_string()))
        .add_scope(Scope::new("email".to_string()))
        .add_scope(Scope::new("profile".to_string()))
        .url();

    oauth_state::store_state(csrf_secret, pkce_verifier, redirect_after).await;

    Ok(url.to_string())
}

/// Split `{csrf}` or `{csrf}|{path}`.
pub fn parse_oauth_state(state: &str) -> (&str, Option<&str>) {
    match state.split_once('|') {
        Some((csrf, redirect)) => (csrf, Some(redirect)),
        None => (state, None),
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct GoogleUserInfo {
    pub sub: String,
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: Option<bool>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

pub async fn fetch_google_user_info(access_token: &str) -> Result<GoogleUserInfo, String> {
    let client = reqwest::Client::new();
    let resp = client
        .get(GOOGLE_USERINFO_URL)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| format!("Failed to fetch Google user info: {e}"))?;

    resp.json::<GoogleUserInfo>()
        .await
        .map_err(|e| format!("Failed to parse Google user info: {e}"))
}
