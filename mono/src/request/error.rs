use thiserror::Error;

/// Error types for a single outbound API call
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request body could not be serialized to JSON. Nothing was sent.
    #[error("Encoding error: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The request could not be constructed (malformed URL, illegal header name or value).
    /// Nothing was sent.
    #[error("Request build error: {0}")]
    RequestBuild(String),

    /// Network error when communicating with the API
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not decode into the requested shape.
    ///
    /// Only returned by [`execute_strict`](super::execute_strict).
    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),
}
