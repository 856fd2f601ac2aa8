//! Runtime configuration for reaching the collection endpoint.

use url::Url;

use crate::client::TodoClient;
use crate::error::ConfigError;

/// Environment variable holding the endpoint's base URL.
pub const BASE_URL_ENV: &str = "TODO_API_URL";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: Url,
}

impl Config {
    /// Read the configuration from the process environment, falling back to
    /// [`DEFAULT_BASE_URL`] when `TODO_API_URL` is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            base_url: parse_base_url(&raw)?,
        })
    }

    pub fn client(&self) -> TodoClient {
        TodoClient::from_url(self.base_url.clone())
    }
}

/// Parse and validate a base URL. Only http and https are accepted.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}
