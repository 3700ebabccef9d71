//! Layered settings for the command-line front end.
//!
//! Values come from an optional settings file, overridden by `LINEAR_BULK_*`
//! environment variables (for example `LINEAR_BULK_API_KEY`).

use std::fmt;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use config::{Config, Environment, File};
use linear_bulk_cache::RequestContext;
use linear_bulk_sources::LinearClientConfig;
use serde::Deserialize;

const ENV_PREFIX: &str = "LINEAR_BULK";

#[derive(Clone, Default, Deserialize)]
pub struct Settings {
    /// GraphQL endpoint override.
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    /// HTTP request timeout in seconds.
    #[serde(default)]
    pub request_timeout: Option<u64>,
    #[serde(default)]
    pub page_size: Option<u32>,
    /// Deadline in seconds for each page request made by the cache.
    #[serde(default)]
    pub fetch_timeout: Option<u64>,
}

impl Settings {
    /// Loads settings from `path` (if it exists) and the process environment.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        Self::from_sources(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn from_sources(path: &Path, env: Environment) -> anyhow::Result<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env.try_parsing(true))
            .build()
            .and_then(|config| config.try_deserialize::<Settings>())
            .with_context(|| format!("failed to load settings from {}", path.display()))
    }

    /// Builds the client configuration.
    ///
    /// # Errors
    ///
    /// Fails when no API key is configured or a value is out of range.
    pub fn client_config(&self) -> anyhow::Result<LinearClientConfig> {
        let api_key = self
            .api_key
            .as_deref()
            .context("no API key configured; set LINEAR_BULK_API_KEY or api_key")?;

        let mut builder = LinearClientConfig::builder().api_key(api_key);
        if let Some(url) = &self.api_url {
            builder = builder.api_url(url);
        }
        if let Some(secs) = self.request_timeout {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }
        if let Some(size) = self.page_size {
            builder = builder.page_size(size);
        }

        builder.build().map_err(anyhow::Error::msg)
    }

    /// Returns the request context used for every cache call.
    pub fn request_context(&self) -> RequestContext {
        match self.fetch_timeout {
            Some(secs) => RequestContext::new().with_timeout(Duration::from_secs(secs)),
            None => RequestContext::new(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .field("page_size", &self.page_size)
            .field("fetch_timeout", &self.fetch_timeout)
            .finish()
    }
}
