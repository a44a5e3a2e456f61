//! Client configuration: base URL and default headers.

use std::collections::BTreeMap;

use url::Url;

use crate::error::ApiError;

/// Production endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://foundation-api.teleology.io";

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Immutable settings shared by every request a client builds.
///
/// Header names are stored lowercase so that merges are case-insensitive.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    default_headers: BTreeMap<String, String>,
}

impl ClientConfig {
    /// Config for the production endpoint authenticated with `api_key`.
    pub fn new(api_key: &str) -> Self {
        let mut default_headers = BTreeMap::new();
        default_headers.insert(API_KEY_HEADER.to_string(), api_key.to_string());
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_headers,
        }
    }

    /// Replace the base URL. Fails with `InvalidUrl` unless `base_url` is an
    /// absolute URL that can serve as a base for reference resolution.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!("{base_url}: cannot be used as a base URL")));
        }
        self.base_url = parsed.into();
        Ok(self)
    }

    /// Add or replace a header sent with every request.
    pub fn with_default_header(mut self, name: &str, value: &str) -> Self {
        self.default_headers.insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Parse the base URL for reference resolution.
    pub(crate) fn parsed_base_url(&self) -> Result<Url, ApiError> {
        Url::parse(&self.base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.base_url)))
    }

    pub fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: BTreeMap<&str, &str> = self
            .default_headers
            .iter()
            .map(|(k, v)| {
                let shown = if k == API_KEY_HEADER { "<redacted>" } else { v.as_str() };
                (k.as_str(), shown)
            })
            .collect();
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("default_headers", &headers)
            .finish()
    }
}
