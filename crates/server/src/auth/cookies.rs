use axum::http::{header, HeaderMap, HeaderValue};
use cookie::Cookie;
use std::sync::{Arc, Mutex};

use super::jwt;

pub const SESSION_COOKIE: &str = "internhub_session";

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

fn cookie_domain() -> Option<String> {
    std::env::var("COOKIE_DOMAIN")
        .ok()
        .filter(|d| !d.is_empty())
}

fn session_cookie(value: &str, max_age: cookie::time::Duration) -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, value.to_string()))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .secure(cookie_secure());

    if let Some(domain) = cookie_domain() {
        cookie = cookie.domain(domain);
    }

    cookie.build()
}

/// Set-Cookie value carrying a session token.
pub fn build_session_cookie(token: &str, max_age_hours: i64) -> Option<HeaderValue> {
    let cookie = session_cookie(token, cookie::time::Duration::hours(max_age_hours));
    HeaderValue::from_str(&cookie.to_string()).ok()
}

/// Set-Cookie value that expires the session cookie.
pub fn build_clear_cookie() -> Option<HeaderValue> {
    let cookie = session_cookie("", cookie::time::Duration::ZERO);
    HeaderValue::from_str(&cookie.to_string()).ok()
}

/// Session token from the cookie, or a Bearer header for REST clients.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_cookie(headers, SESSION_COOKIE) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for header_value in headers.get_all(header::COOKIE) {
        if let Ok(cookie_str) = header_value.to_str() {
            for piece in cookie_str.split(';') {
                if let Ok(c) = Cookie::parse(piece.trim().to_string()) {
                    if c.name() == name && !c.value().is_empty() {
                        return Some(c.value().to_string());
                    }
                }
            }
        }
    }
    None
}

pub fn set_session_cookie(headers: &mut HeaderMap, token: &str) {
    if let Some(value) = build_session_cookie(token, jwt::session_expiry_hours()) {
        headers.append(header::SET_COOKIE, value);
    }
}

pub fn clear_session_cookie(headers: &mut HeaderMap) {
    if let Some(value) = build_clear_cookie() {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Cookie change requested by a server function, applied by the auth
/// middleware once the handler returns.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingCookieAction {
    Set(String),
    Clear,
}

#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

impl CookieSlot {
    pub fn put(&self, action: PendingCookieAction) {
        if let Ok(mut guard) = self.0.lock() {
            *guard = Some(action);
        }
    }

    pub fn take(&self) -> Option<PendingCookieAction> {
        self.0.lock().ok().and_then(|mut guard| guard.take())
    }
}

fn schedule(action: PendingCookieAction) {
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        if let Some(slot) = parts.extensions.get::<CookieSlot>() {
            slot.put(action);
        }
    }
}

pub fn schedule_session_cookie(token: &str) {
    schedule(PendingCookieAction::Set(token.to_string()));
}

pub fn schedule_clear_cookie() {
    schedule(PendingCookieAction::Clear);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_preferred_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; internhub_session=from-cookie"),
        );
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        assert_eq!(extract_session_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn bearer_used_without_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        assert_eq!(extract_session_token(&headers).as_deref(), Some("from-header"));
        assert_eq!(extract_session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn empty_cookie_value_is_no_session() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("internhub_session="));
        assert_eq!(extract_session_token(&headers), None);
    }

    #[test]
    fn session_cookie_is_http_only() {
        let value = build_session_cookie("tok", 12).unwrap();
        let text = value.to_str().unwrap();
        assert!(text.starts_with("internhub_session=tok"));
        assert!(text.contains("HttpOnly"));
        assert!(text.contains("Path=/"));
        assert!(text.contains("Max-Age=43200"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let value = build_clear_cookie().unwrap();
        assert!(value.to_str().unwrap().contains("Max-Age=0"));
    }

    #[test]
    fn slot_hands_action_over_once() {
        let slot = CookieSlot::default();
        slot.put(PendingCookieAction::Clear);
        assert_eq!(slot.take(), Some(PendingCookieAction::Clear));
        assert_eq!(slot.take(), None);
    }
}
