//! Client configuration read from the process environment

use std::env;
use std::time::Duration;

use super::{ConfigError, Environment};
use crate::client::BASE_URL;

/// Everything needed to build a [`MonoClient`](crate::MonoClient)
#[derive(Clone, PartialEq, Eq)]
pub struct MonoConfig {
    /// Secret key sent in the `mono-sec-key` header
    pub api_key: String,
    /// API host, without the version prefix
    pub base_url: String,
    /// Client-wide request timeout. `None` keeps the HTTP client default.
    pub request_timeout: Option<Duration>,
    /// Deployment stage of the caller
    pub environment: Environment,
}

impl MonoConfig {
    /// Reads `MONO_SECRET_KEY`, `MONO_BASE_URL`, `MONO_REQUEST_TIMEOUT_SECS` and `APP_ENV`
    ///
    /// # Errors
    ///
    /// Returns an error if the secret key is missing or a variable holds an invalid value
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("MONO_SECRET_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("MONO_SECRET_KEY"))?;

        let base_url = env::var("MONO_BASE_URL")
            .ok()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| BASE_URL.to_string());

        let request_timeout = match env::var("MONO_REQUEST_TIMEOUT_SECS") {
            Ok(val) => Some(Duration::from_secs(val.trim().parse::<u64>().map_err(|_| {
                ConfigError::Invalid {
                    name: "MONO_REQUEST_TIMEOUT_SECS",
                    value: val.clone(),
                }
            })?)),
            Err(_) => None,
        };

        Ok(Self {
            api_key,
            base_url,
            request_timeout,
            environment: Environment::from_env()?,
        })
    }
}

impl std::fmt::Debug for MonoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonoConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("environment", &self.environment)
            .finish()
    }
}
