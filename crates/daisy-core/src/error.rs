//! Error types shared across the daisy crates.

/// Failure of a provider call. No variant is fatal: the search session turns
/// every one of them into a visible error message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Connect/read timeout or any other transport failure.
    #[error("network error: {0}")]
    Network(String),
    /// The upstream answered with a non-2xx status.
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// The upstream answered, but not in a shape we can use.
    #[error("unexpected provider response: {0}")]
    UpstreamFormat(String),
    /// Missing API key or unusable endpoint configuration.
    #[error("provider misconfigured: {0}")]
    Config(String),
}

impl ProviderError {
    pub fn format(msg: impl Into<String>) -> Self {
        ProviderError::UpstreamFormat(msg.into())
    }
}

/// Failure to persist the record cache. Read failures are not errors: a
/// cache that cannot be read is treated as empty.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cache I/O failed on {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cache encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
