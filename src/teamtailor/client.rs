//! Teamtailor HTTP client with token auth, API versioning, and a per-request
//! timeout.
//!
//! # Security
//!
//! - The API token travels only in the `Authorization` default header, which
//!   is marked sensitive so reqwest never prints it.
//! - Log lines carry the URL path and status only, never query strings or
//!   header values.

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use secrecy::ExposeSecret;
use tracing::info;
use url::Url;

use crate::config::{AppConfig, ConfigError};
use crate::error::ExportError;
use crate::teamtailor::types::JsonApiEnvelope;

/// Deadline applied to every Teamtailor request, including body read.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON:API media type expected by Teamtailor.
const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Header carrying the API version the caller was built against.
const API_VERSION_HEADER: &str = "X-Api-Version";

/// HTTP client for the Teamtailor JSON:API.
///
/// Cheap to clone; the underlying connection pool is shared. All request
/// headers are fixed at construction from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct TeamtailorClient {
    http: reqwest::Client,
    base_url: Url,
    page_size: u32,
    timeout: Duration,
}

impl TeamtailorClient {
    /// Builds a client from the service configuration with the standard
    /// 30-second timeout.
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        Self::with_timeout(config, FETCH_TIMEOUT)
    }

    /// Builds a client with an explicit timeout. Production code uses
    /// [`new`](Self::new); tests shrink the deadline to keep timeout cases
    /// fast.
    pub fn with_timeout(config: &AppConfig, timeout: Duration) -> Result<Self, ConfigError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: e.to_string(),
            })?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!(
            "Token token={}",
            config.api_key.expose_secret()
        ))
        .map_err(|_| ConfigError::InvalidApiKey)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            API_VERSION_HEADER,
            HeaderValue::from_str(&config.api_version)
                .map_err(|_| ConfigError::InvalidApiVersion(config.api_version.clone()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_API_MEDIA_TYPE));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url,
            page_size: config.page_size,
            timeout,
        })
    }

    /// Base API URL without a trailing slash.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Configured `page[size]` for collection requests.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetches one collection page from an absolute URL and parses the
    /// JSON:API envelope.
    ///
    /// # Errors
    ///
    /// - `ExportError::RemoteTimeout` - the request or body read exceeded the
    ///   configured deadline
    /// - `ExportError::RemoteApi` - non-2xx status; carries the status code
    ///   and the body, read exactly once and parsed as JSON when possible
    /// - `ExportError::MalformedResponse` - 2xx body that is not a JSON:API
    ///   collection envelope
    /// - `ExportError::ConnectionFailed` - the request never produced a
    ///   response
    pub async fn fetch_envelope(&self, url: &str) -> Result<JsonApiEnvelope, ExportError> {
        let start = Instant::now();
        let log_path = loggable_path(url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        info!(
            "[TT] GET {} {} {}ms",
            log_path,
            status.as_u16(),
            start.elapsed().as_millis()
        );

        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            // Parse the body we already read; never attempt a second read.
            let body = match serde_json::from_str::<serde_json::Value>(&text) {
                Ok(value) => value,
                Err(_) => serde_json::Value::String(text),
            };
            return Err(ExportError::RemoteApi {
                message: format!("Teamtailor API request failed: {status}"),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| ExportError::MalformedResponse(e.to_string()))
    }

    /// Maps a reqwest failure to the export taxonomy.
    fn transport_error(&self, error: reqwest::Error) -> ExportError {
        if error.is_timeout() {
            ExportError::RemoteTimeout {
                timeout: self.timeout,
            }
        } else {
            // reqwest's Display omits the URL's sensitive parts already, but
            // keep it to connection-level detail only.
            ExportError::ConnectionFailed(error.without_url().to_string())
        }
    }
}

/// Path component of a URL for logging; query strings stay out of the logs.
fn loggable_path(url: &str) -> String {
    Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| "<invalid-url>".to_string())
}
