//! Application configuration with security considerations.
//!
//! All values come from the process environment and are loaded once at
//! startup. The resulting [`AppConfig`] is immutable and handed to the web
//! handlers through the application state.
//!
//! # Security Notes
//! - Sensitive fields are clearly marked and should never be logged
//! - Production environments should use secure secret management systems

use anyhow::{Context, bail};
use envconfig::Envconfig;

/// Environment variables that must be present (and non-empty) to start.
pub const REQUIRED_VARS: [&str; 3] = ["FB_APP_SECRET", "FB_PAGE_ACCESS_TOKEN", "FB_VERIFY_TOKEN"];

/// Application configuration with security-aware field management.
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(from = "ENV", default = "local")]
    pub env: String,

    /// Port for web server binding (NON-SENSITIVE)
    #[envconfig(from = "PORT", default = "3000")]
    pub port: u16,

    /// 🔒 SENSITIVE: Facebook app secret, key of the webhook HMAC signature
    #[envconfig(from = "FB_APP_SECRET")]
    pub fb_app_secret: String,

    /// 🔒 SENSITIVE: Page access token used as Send API credential
    #[envconfig(from = "FB_PAGE_ACCESS_TOKEN")]
    pub fb_page_access_token: String,

    /// 🔒 SENSITIVE: Token configured in the app dashboard for the GET handshake
    #[envconfig(from = "FB_VERIFY_TOKEN")]
    pub fb_verify_token: String,

    /// Graph API host (NON-SENSITIVE)
    #[envconfig(from = "GRAPH_API_BASE", default = "https://graph.facebook.com")]
    pub graph_api_base: String,

    /// Graph API version used by the Send API (NON-SENSITIVE)
    #[envconfig(from = "GRAPH_API_VERSION", default = "v16.0")]
    pub graph_api_version: String,

    /// 🔒 SENSITIVE: Logfire write token, export is disabled when unset
    #[envconfig(from = "LOGFIRE_TOKEN")]
    pub logfire_token: Option<String>,
}

impl AppConfig {
    /// Loads the configuration from the environment and validates it.
    pub fn load() -> anyhow::Result<Self> {
        let app_config = Self::init_from_env().with_context(|| {
            format!(
                "Missing FB environment variables. Set {}",
                REQUIRED_VARS.join(", ")
            )
        })?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Rejects secrets that are present but empty.
    pub fn validate(&self) -> anyhow::Result<()> {
        let empty = [
            ("FB_APP_SECRET", &self.fb_app_secret),
            ("FB_PAGE_ACCESS_TOKEN", &self.fb_page_access_token),
            ("FB_VERIFY_TOKEN", &self.fb_verify_token),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect::<Vec<_>>();

        if !empty.is_empty() {
            bail!("FB environment variables must not be empty: {}", empty.join(", "));
        }

        Ok(())
    }

    /// Constructs the Send API endpoint for the page the token belongs to
    pub fn send_api_endpoint(&self) -> String {
        format!(
            "{base}/{version}/me/messages",
            base = self.graph_api_base.trim_end_matches('/'),
            version = self.graph_api_version
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    pub(crate) fn test_env() -> HashMap<String, String> {
        HashMap::from([
            ("FB_APP_SECRET".to_string(), "test_secret".to_string()),
            ("FB_PAGE_ACCESS_TOKEN".to_string(), "page_token".to_string()),
            ("FB_VERIFY_TOKEN".to_string(), "verify_me".to_string()),
        ])
    }

    pub(crate) fn test_config() -> AppConfig {
        AppConfig::init_from_hashmap(&test_env()).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let app_config = test_config();

        assert_eq!(app_config.port, 3000);
        assert_eq!(app_config.env, "local");
        assert!(app_config.logfire_token.is_none());
        assert_eq!(
            app_config.send_api_endpoint(),
            "https://graph.facebook.com/v16.0/me/messages"
        );
    }

    #[test]
    fn test_missing_secret_fails() {
        for var in REQUIRED_VARS {
            let mut env = test_env();
            env.remove(var);
            assert!(AppConfig::init_from_hashmap(&env).is_err(), "{var} should be required");
        }
    }

    #[test]
    fn test_empty_secret_fails_validation() {
        let mut env = test_env();
        env.insert("FB_VERIFY_TOKEN".to_string(), "".to_string());
        let app_config = AppConfig::init_from_hashmap(&env).unwrap();

        let err = app_config.validate().unwrap_err();
        assert!(err.to_string().contains("FB_VERIFY_TOKEN"));
    }

    #[test]
    fn test_custom_port_and_base() {
        let mut env = test_env();
        env.insert("PORT".to_string(), "8080".to_string());
        env.insert("GRAPH_API_BASE".to_string(), "http://127.0.0.1:9000/".to_string());
        let app_config = AppConfig::init_from_hashmap(&env).unwrap();

        assert_eq!(app_config.port, 8080);
        assert_eq!(
            app_config.send_api_endpoint(),
            "http://127.0.0.1:9000/v16.0/me/messages"
        );
    }
}
