use axum::extract::Request;
use axum::http::{header, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Router;
use shared_types::{evaluate, lookup, SectionId};

use super::cookies::{self, CookieSlot, PendingCookieAction};
use super::jwt::{validate_session_token, Claims};

/// Permissive auth middleware.
///
/// Validates the session token and inserts `Claims` into the request
/// extensions, inserts a `CookieSlot` for server functions, then applies
/// any scheduled cookie change to the response. Never rejects: handlers
/// and the section gate decide.
pub async fn auth_middleware(mut req: Request, next: Next) -> Response {
    if let Some(token) = cookies::extract_session_token(req.headers()) {
        match validate_session_token(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid session token");
            }
        }
    }

    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;

    match cookie_slot.take() {
        Some(PendingCookieAction::Set(token)) => {
            cookies::set_session_cookie(response.headers_mut(), &token);
        }
        Some(PendingCookieAction::Clear) => {
            cookies::clear_session_cookie(response.headers_mut());
        }
        None => {}
    }

    response
}

const UNGATED_PREFIXES: [&str; 7] = [
    "/api", "/auth", "/docs", "/health", "/assets", "/_dioxus", "/login",
];

fn is_page_request(req: &Request) -> bool {
    if req.method() != Method::GET {
        return false;
    }
    let path = req.uri().path();
    if UNGATED_PREFIXES
        .iter()
        .any(|prefix| path == *prefix || path.starts_with(&format!("{prefix}/")))
    {
        return false;
    }
    // Static files.
    !path.rsplit('/').next().unwrap_or_default().contains('.')
}

/// Evaluates the authorization gate for page routes before the page
/// renders. Must run inside `auth_middleware`.
///
/// Denied navigations answer `303 See Other`: to sign-in when there is
/// no session, to the role's default section otherwise.
pub async fn section_gate(req: Request, next: Next) -> Response {
    if !is_page_request(&req) {
        return next.run(req).await;
    }
    let Some(section) = SectionId::from_path(req.uri().path()) else {
        return next.run(req).await;
    };

    let session = req.extensions().get::<Claims>().map(Claims::session);
    if let Some(session) = &session {
        if lookup(&session.role).is_none() {
            tracing::warn!(
                role = %session.role,
                user_id = %session.user_id,
                "Role has no registry entry, serving minimal shell"
            );
        }
    }

    match evaluate(session.as_ref(), section) {
        Ok(_) => next.run(req).await,
        Err(denial) => {
            let requested = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("/");
            let location = denial.redirect_to(requested);
            tracing::info!(
                section = %section,
                location = %location,
                "Section gate denied navigation"
            );
            (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
        }
    }
}

/// Wrap `router` with the section gate and, outside it, the auth
/// middleware. Layers added to `router` beforehand see the claims.
pub fn with_session_layers(router: Router) -> Router {
    router
        .layer(axum::middleware::from_fn(section_gate))
        .layer(axum::middleware::from_fn(auth_middleware))
}
