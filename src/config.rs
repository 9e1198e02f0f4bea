//! Environment-driven configuration, loaded once at process start.
//!
//! The API key is required and the process refuses to start without it; every
//! other setting has a default. The key is wrapped in [`SecretString`] so it
//! cannot leak through `Debug` output or logs.

use secrecy::SecretString;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.teamtailor.com/v1";
pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const DEFAULT_PORT: u16 = 3000;

/// Startup configuration errors. All of these abort the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Environment variable {name} is not a valid number: {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,

    #[error("API version {0:?} is not a valid HTTP header value")]
    InvalidApiVersion(String),
}

/// Read-only service configuration shared by all export requests.
#[derive(Clone)]
pub struct AppConfig {
    /// Teamtailor API token, sent as `Authorization: Token token=<key>`.
    pub api_key: SecretString,
    /// Base API URL without a trailing slash, e.g. `https://api.teamtailor.com/v1`.
    pub base_url: String,
    /// Value for the `X-Api-Version` header.
    pub api_version: String,
    /// Requested `page[size]` for the candidates collection.
    pub page_size: u32,
    /// HTTP listening port.
    pub port: u16,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("page_size", &self.page_size)
            .field("port", &self.port)
            .finish()
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Kept separate from [`from_env`](Self::from_env) so tests do not have to
    /// mutate process-global environment state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("TEAMTAILOR_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVar("TEAMTAILOR_API_KEY"))?;

        let base_url = lookup("TEAMTAILOR_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let api_version =
            lookup("TEAMTAILOR_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        let page_size = parse_var(&lookup, "TEAMTAILOR_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        let port = parse_var(&lookup, "PORT", DEFAULT_PORT)?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            base_url,
            api_version,
            page_size,
            port,
        })
    }
}

/// Parses a numeric variable, falling back to `default` when unset.
fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[("TEAMTAILOR_API_KEY", "secret")]))
            .expect("config should load");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let result = AppConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingVar("TEAMTAILOR_API_KEY"))
        ));
    }

    #[test]
    fn empty_api_key_is_an_error() {
        let result = AppConfig::from_lookup(lookup_from(&[("TEAMTAILOR_API_KEY", "")]));
        assert!(matches!(result, Err(ConfigError::MissingVar(_))));
    }

    #[test]
    fn overrides_are_respected() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("TEAMTAILOR_API_KEY", "secret"),
            ("TEAMTAILOR_BASE_URL", "https://api.example.test/v9/"),
            ("TEAMTAILOR_API_VERSION", "v9"),
            ("TEAMTAILOR_PAGE_SIZE", "25"),
            ("PORT", "8080"),
        ]))
        .expect("config should load");

        // Trailing slash is normalized away so path joining stays predictable.
        assert_eq!(config.base_url, "https://api.example.test/v9");
        assert_eq!(config.api_version, "v9");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn non_numeric_page_size_is_an_error() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("TEAMTAILOR_API_KEY", "secret"),
            ("TEAMTAILOR_PAGE_SIZE", "many"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidNumber {
                name: "TEAMTAILOR_PAGE_SIZE",
                ..
            })
        ));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = AppConfig::from_lookup(lookup_from(&[(
            "TEAMTAILOR_API_KEY",
            "super_secret_token",
        )]))
        .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("super_secret_token"));
        assert!(debug.contains("[REDACTED]"));
    }
}
