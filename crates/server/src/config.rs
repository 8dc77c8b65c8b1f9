use shared_types::{AppConfig, AuthSettings, FeatureFlags};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Parse config file contents, falling back to defaults when invalid.
pub fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!(path = CONFIG_PATH, error = %e, "Failed to parse config, using defaults");
        AppConfig::default()
    })
}

/// Read `config.toml` once and keep it for the life of the process.
/// A missing or unparseable file yields the defaults.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let config = parse_config(&contents);
            tracing::info!(features = ?config.features, domains = ?config.auth.allowed_email_domains, "Configuration loaded");
            config
        }
        Err(e) => {
            tracing::warn!(path = CONFIG_PATH, error = %e, "Config file not found, using defaults");
            AppConfig::default()
        }
    })
}

/// Feature flags; defaults when `load_config()` has not run.
pub fn feature_flags() -> &'static FeatureFlags {
    static DEFAULT: FeatureFlags = FeatureFlags {
        oauth: false,
        telemetry: false,
    };
    CONFIG.get().map(|c| &c.features).unwrap_or(&DEFAULT)
}

pub fn auth_settings() -> &'static AuthSettings {
    static DEFAULT: OnceLock<AuthSettings> = OnceLock::new();
    match CONFIG.get() {
        Some(config) => &config.auth,
        None => DEFAULT.get_or_init(AuthSettings::default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_toml_falls_back_to_defaults() {
        let config = parse_config("features = [");
        assert!(!config.features.oauth);
        assert!(config.auth.email_domain_allowed("x@university.edu"));
    }

    #[test]
    fn custom_domains_replace_defaults() {
        let config = parse_config(
            r#"
            [features]
            oauth = true

            [auth]
            allowed_email_domains = ["college.ac.in"]
            "#,
        );
        assert!(config.features.oauth);
        assert!(!config.features.telemetry);
        assert!(config.auth.email_domain_allowed("a@college.ac.in"));
        assert!(!config.auth.email_domain_allowed("a@university.edu"));
    }

    #[test]
    fn shipped_config_enables_sign_in() {
        let config = parse_config(include_str!("../../../config.toml"));
        assert!(config.features.oauth);
        assert!(config.auth.email_domain_allowed("asha@students.university.edu"));
        assert!(config.auth.email_domain_allowed("rao@university.edu"));
    }
}
