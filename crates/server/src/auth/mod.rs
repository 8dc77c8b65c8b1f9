pub mod cookies;
pub mod extractors;
pub mod identity;
pub mod jwt;
pub mod middleware;
pub mod oauth;
pub mod oauth_callback;
pub mod oauth_state;

/// Whether `email` is the `ADMIN_EMAIL` address (case-insensitive).
/// `false` when the variable is unset or empty.
pub fn is_admin_email(email: &str) -> bool {
    match std::env::var("ADMIN_EMAIL") {
        Ok(admin) if !admin.trim().is_empty() => admin.trim().eq_ignore_ascii_case(email),
        _ => false,
    }
}
