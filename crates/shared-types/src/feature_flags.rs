use serde::{Deserialize, Serialize};

/// Feature flags controlling which optional integrations are active.
///
/// Loaded from `config.toml` at server startup and exposed to clients
/// via a server function. Every field defaults to `false` so that a
/// missing or incomplete config file disables all optional features.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    #[serde(default)]
    pub oauth: bool,
    #[serde(default)]
    pub telemetry: bool,
}

/// Email domains accepted at sign-in when `config.toml` names none.
pub const DEFAULT_ALLOWED_EMAIL_DOMAINS: [&str; 2] = ["university.edu", "students.university.edu"];

fn default_allowed_email_domains() -> Vec<String> {
    DEFAULT_ALLOWED_EMAIL_DOMAINS
        .iter()
        .map(|d| d.to_string())
        .collect()
}

/// Sign-in policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSettings {
    /// Email domain suffixes allowed to sign in. Matching is exact on the
    /// part after `@`, case-insensitive.
    #[serde(default = "default_allowed_email_domains")]
    pub allowed_email_domains: Vec<String>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            allowed_email_domains: default_allowed_email_domains(),
        }
    }
}

impl AuthSettings {
    /// Whether `email` belongs to one of the allowed domains.
    pub fn email_domain_allowed(&self, email: &str) -> bool {
        let Some((local, domain)) = email.trim().rsplit_once('@') else {
            return false;
        };
        if local.is_empty() {
            return false;
        }
        self.allowed_email_domains
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(domain))
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub auth: AuthSettings,
}
