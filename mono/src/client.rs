use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};

use crate::lookup::LookUp;
use crate::request::{self, RequestError, RequestSpec};
use crate::types::MonoConfig;

/// Mono API host
pub const BASE_URL: &str = "https://api.withmono.com";

/// Version prefix shared by every endpoint
const API_VERSION: &str = "v2";

/// Handle to the Mono API.
///
/// Holds the API key and a pooled HTTP client. Cloning is cheap and clones share the
/// connection pool, so one handle can serve any number of concurrent calls.
#[derive(Clone)]
pub struct MonoClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl MonoClient {
    /// Creates a client for the production host with a default HTTP client
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Builds a client from configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be initialized (e.g. no TLS backend)
    pub fn from_config(config: &MonoConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .user_agent(format!("mono-rs/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Points the client at another host (sandbox, local mock server)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Host the client talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a versioned endpoint, e.g. `lookup/bvn/initiate`
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{API_VERSION}/{}",
            self.base_url,
            path.trim_start_matches('/')
        )
    }

    /// Starts a request to a versioned endpoint, already carrying the API key
    #[must_use]
    pub fn request(&self, method: Method, path: &str) -> RequestSpec {
        RequestSpec::new(method, self.endpoint(path), self.api_key.clone())
    }

    /// Runs `spec` through [`request::execute`] with this client's connection pool
    ///
    /// # Errors
    /// See [`request::execute`]
    pub async fn execute<R, B>(&self, spec: RequestSpec<B>) -> Result<R, RequestError>
    where
        R: DeserializeOwned + Default,
        B: Serialize,
    {
        request::execute(&self.http, spec).await
    }

    /// Runs `spec` through [`request::execute_strict`] with this client's connection pool
    ///
    /// # Errors
    /// See [`request::execute_strict`]
    pub async fn execute_strict<R, B>(&self, spec: RequestSpec<B>) -> Result<R, RequestError>
    where
        R: DeserializeOwned,
        B: Serialize,
    {
        request::execute_strict(&self.http, spec).await
    }

    /// Lookup products sharing this client
    #[must_use]
    pub fn lookup(&self) -> LookUp {
        LookUp::new(self.clone())
    }
}

impl std::fmt::Debug for MonoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonoClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
