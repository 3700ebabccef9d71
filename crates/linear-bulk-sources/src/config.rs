//! Linear client configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Largest page the Linear API accepts for connection queries.
pub const MAX_PAGE_SIZE: u32 = 250;

/// Configuration for the Linear GraphQL client.
///
/// Deserialization goes through [`LinearClientConfigBuilder::build`], so a
/// loaded configuration is validated the same way as a built one.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawLinearClientConfig")]
pub struct LinearClientConfig {
    /// GraphQL endpoint.
    api_url: String,

    /// Personal API key or OAuth token, sent as the `Authorization` header.
    #[serde(skip_serializing)]
    api_key: String,

    /// Timeout for a single HTTP request.
    #[serde(serialize_with = "serialize_seconds")]
    request_timeout: Duration,

    /// Records requested per page (`first`).
    page_size: u32,

    /// Value of the `User-Agent` header.
    user_agent: String,
}

/// Wire form of [`LinearClientConfig`]; every field is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLinearClientConfig {
    #[serde(default)]
    api_url: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
    /// Seconds.
    #[serde(default)]
    request_timeout: Option<u64>,
    #[serde(default)]
    page_size: Option<u32>,
    #[serde(default)]
    user_agent: Option<String>,
}

impl TryFrom<RawLinearClientConfig> for LinearClientConfig {
    type Error = &'static str;

    fn try_from(raw: RawLinearClientConfig) -> Result<Self, Self::Error> {
        LinearClientConfigBuilder {
            api_url: raw.api_url,
            api_key: raw.api_key,
            request_timeout: raw.request_timeout.map(Duration::from_secs),
            page_size: raw.page_size,
            user_agent: raw.user_agent,
        }
        .build()
    }
}

fn serialize_seconds<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_secs())
}

fn default_api_url() -> String {
    "https://api.linear.app/graphql".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_user_agent() -> String {
    format!("linear-bulk/{}", env!("CARGO_PKG_VERSION"))
}

impl LinearClientConfig {
    /// Creates a new builder for LinearClientConfig.
    pub fn builder() -> LinearClientConfigBuilder {
        LinearClientConfigBuilder::default()
    }

    /// Returns the GraphQL endpoint.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the per-request HTTP timeout.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the page size used for paginated queries.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the user agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl fmt::Debug for LinearClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearClientConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .field("page_size", &self.page_size)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Builder for LinearClientConfig.
#[derive(Debug, Default)]
pub struct LinearClientConfigBuilder {
    api_url: Option<String>,
    api_key: Option<String>,
    request_timeout: Option<Duration>,
    page_size: Option<u32>,
    user_agent: Option<String>,
}

impl LinearClientConfigBuilder {
    /// Sets the GraphQL endpoint.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Sets the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the per-request HTTP timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the page size.
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Sets the user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or empty, or the page
    /// size is outside `1..=250`.
    pub fn build(self) -> Result<LinearClientConfig, &'static str> {
        let api_key = self.api_key.ok_or("api_key is required")?;
        if api_key.trim().is_empty() {
            return Err("api_key must not be empty");
        }

        let page_size = self.page_size.unwrap_or_else(default_page_size);
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err("page_size must be between 1 and 250");
        }

        Ok(LinearClientConfig {
            api_url: self.api_url.unwrap_or_else(default_api_url),
            api_key,
            request_timeout: self.request_timeout.unwrap_or_else(default_request_timeout),
            page_size,
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
        })
    }
}
