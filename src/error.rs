use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the trend engine and its remote collaborators.
#[derive(Debug, Error)]
pub enum Error {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote completion API rejected the call for quota or rate-limit
    /// reasons. Recoverable: callers fall back to the local generator.
    #[error("completion quota exhausted: {0}")]
    QuotaExhausted(String),

    /// Any other remote completion failure. Not recoverable locally.
    #[error("failed to analyze trends: {0}")]
    Remote(String),

    /// A response body could not be parsed into the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid or missing configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A repository read or write failed.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// True when the failure is a quota/rate-limit rejection that the
    /// analyzer may recover from via the fallback generator.
    pub fn is_quota(&self) -> bool {
        matches!(self, Self::QuotaExhausted(_))
    }
}
