//! Error types for the upstream adapters.

/// Errors that can occur while calling an upstream API.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum UpstreamError {
    /// The upstream answered with a non-success HTTP status.
    #[error("upstream returned HTTP {status}")]
    Status {
        status: u16,
        /// Raw response body, passed through to the caller as `details`.
        body: String,
    },

    /// No response from the upstream (connect, DNS, or timeout failure).
    #[error("no response from upstream: {0}")]
    Network(String),

    /// Credential material could not be loaded, signed, or exchanged.
    #[error("credential error: {0}")]
    Credential(String),

    /// The upstream answered with a body we could not decode.
    #[error("unexpected upstream payload: {0}")]
    Payload(String),

    /// The HTTP client itself could not be constructed.
    #[error("HTTP client construction failed: {0}")]
    Client(String),

    /// Underlying I/O error (key-file read).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl UpstreamError {
    /// Wrap a transport-level failure where no upstream response exists.
    pub(crate) fn network(err: &reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}
