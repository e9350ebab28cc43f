use std::env;
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::repository::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const ENV_API_URL: &str = "TRACKER_API_URL";
pub const ENV_API_TOKEN: &str = "TRACKER_API_TOKEN";
pub const ENV_API_TIMEOUT: &str = "TRACKER_API_TIMEOUT_SECS";

/// Bearer token attached to every request.
///
/// Passed explicitly into the client; nothing reads a token from global state.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    /// Returns `None` for a blank token.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        Some(Self {
            token: token.to_owned(),
        })
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials(***)")
    }
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: Url,
    pub credentials: Option<Credentials>,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Builds a config for `base_url` with default timeout and no credentials.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if `base_url` does not parse as an
    /// absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            credentials: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads `TRACKER_API_URL`, `TRACKER_API_TOKEN` and `TRACKER_API_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the configured URL is invalid.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the configured URL is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let base_url = lookup(ENV_API_URL)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let timeout = lookup(ENV_API_TIMEOUT)
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let credentials = lookup(ENV_API_TOKEN).and_then(Credentials::bearer);

        Ok(Self::new(&base_url)?
            .with_credentials(credentials)
            .with_timeout(Duration::from_secs(timeout)))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw.trim()).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(raw.to_owned()));
    }
    Ok(url)
}
