//! Generic request executor.
//!
//! Every API call goes through [`execute`]: a [`RequestSpec`] describes the call, the body
//! is serialized once, the default headers are applied before the caller's, and the
//! response body is decoded into whatever shape the caller asks for.

mod error;

use std::collections::BTreeMap;
use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

pub use error::RequestError;

/// Name of the header carrying the API secret key
pub const AUTH_HEADER: &str = "mono-sec-key";

/// Declarative description of one outbound call.
///
/// Built with [`RequestSpec::new`] and the consuming `with_*` methods; immutable after that.
/// Extra headers are kept in a map keyed by the lowercased name, so a name can only appear
/// once whatever its casing.
#[derive(Clone)]
pub struct RequestSpec<B = Value> {
    url: String,
    method: Method,
    body: Option<B>,
    api_key: String,
    headers: BTreeMap<String, String>,
}

impl RequestSpec {
    /// Creates a spec without a body or extra headers
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            body: None,
            api_key: api_key.into(),
            headers: BTreeMap::new(),
        }
    }
}

impl<B> RequestSpec<B> {
    /// Attaches a JSON body, replacing any previous one
    #[must_use]
    pub fn with_body<T: Serialize>(self, body: T) -> RequestSpec<T> {
        RequestSpec {
            url: self.url,
            method: self.method,
            body: Some(body),
            api_key: self.api_key,
            headers: self.headers,
        }
    }

    /// Adds an extra header. Names are case-insensitive: a later value for the same name
    /// replaces the earlier one.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut name = name.into();
        name.make_ascii_lowercase();
        self.headers.insert(name, value.into());
        self
    }

    /// Target URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// HTTP verb
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Request body, if any
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// API key sent in [`AUTH_HEADER`]
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Extra headers applied on top of the defaults
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Final header set: `Content-Type` and the auth header first, then the extra headers,
    /// which win on a name collision.
    fn header_map(&self) -> Result<HeaderMap, RequestError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut key = header_value(AUTH_HEADER, &self.api_key)?;
        key.set_sensitive(true);
        headers.insert(HeaderName::from_static(AUTH_HEADER), key);

        for (name, value) in &self.headers {
            let header = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                RequestError::RequestBuild(format!("invalid header name {name:?}: {e}"))
            })?;
            headers.insert(header, header_value(name, value)?);
        }

        Ok(headers)
    }
}

impl<B: fmt::Debug> fmt::Debug for RequestSpec<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSpec")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("body", &self.body)
            .field("api_key", &"<redacted>")
            .field("headers", &self.headers)
            .finish()
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, RequestError> {
    HeaderValue::from_str(value)
        .map_err(|e| RequestError::RequestBuild(format!("invalid value for header {name:?}: {e}")))
}

/// Serializes, builds and sends the request, returning the raw response body.
async fn send<B: Serialize>(http: &Client, spec: &RequestSpec<B>) -> Result<Vec<u8>, RequestError> {
    let body = spec
        .body
        .as_ref()
        .map(serde_json::to_vec)
        .transpose()
        .map_err(RequestError::Encoding)?;

    let url = Url::parse(&spec.url)
        .map_err(|e| RequestError::RequestBuild(format!("invalid URL {:?}: {e}", spec.url)))?;
    let headers = spec.header_map()?;

    debug!("Sending {} request to: {}", spec.method, url);

    let mut request = http.request(spec.method.clone(), url).headers(headers);
    if let Some(body) = body {
        request = request.body(body);
    }

    let response = request.send().await.map_err(|e| {
        debug!("Request failed: {}", e);
        RequestError::from(e)
    })?;

    let status = response.status();
    let bytes = response.bytes().await?;
    debug!(%status, len = bytes.len(), "Received response");

    Ok(bytes.to_vec())
}

/// Executes `spec` and decodes the response body into `R`.
///
/// The HTTP status code is not inspected; the API reports failures inside the body.
///
/// A body that does not decode into `R` is **not** an error: it is logged and
/// `R::default()` is returned as if the call had succeeded. Use [`execute_strict`] to have
/// the decode failure reported instead.
///
/// # Errors
/// - [`RequestError::Encoding`] if the body cannot be serialized (nothing is sent)
/// - [`RequestError::RequestBuild`] if the URL or a header is malformed (nothing is sent)
/// - [`RequestError::Transport`] if the request or the response body read fails
pub async fn execute<R, B>(http: &Client, spec: RequestSpec<B>) -> Result<R, RequestError>
where
    R: DeserializeOwned + Default,
    B: Serialize,
{
    let body = send(http, &spec).await?;

    Ok(serde_json::from_slice(&body).unwrap_or_else(|e| {
        warn!(
            url = %spec.url,
            error = %e,
            "Response body did not decode, using the default payload"
        );
        R::default()
    }))
}

/// Same as [`execute`], but a response body that does not decode into `R` is returned as
/// [`RequestError::Decode`].
///
/// # Errors
/// Everything [`execute`] returns, plus [`RequestError::Decode`].
pub async fn execute_strict<R, B>(http: &Client, spec: RequestSpec<B>) -> Result<R, RequestError>
where
    R: DeserializeOwned,
    B: Serialize,
{
    let body = send(http, &spec).await?;
    serde_json::from_slice(&body).map_err(RequestError::Decode)
}
