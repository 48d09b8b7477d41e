//! Error types for the backend client

use thiserror::Error;

/// Result type alias for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;

/// Errors that can occur when querying the time-series backend
#[derive(Error, Debug)]
pub enum BackendError {
    /// Transport-level failure (connection, DNS, TLS, body read)
    #[error("transport error: {0}")]
    Http(reqwest::Error),

    /// The bounded-duration call exceeded its deadline
    #[error("backend request timed out")]
    Timeout,

    /// Backend rejected the request; the raw body is kept for diagnostics
    #[error("backend returned {status}: {body}")]
    Api { status: u16, body: String },

    /// URL construction failed
    #[error("invalid backend URL: {0}")]
    Url(#[from] url::ParseError),

    /// Client misconfiguration (e.g. missing credentials)
    #[error("backend configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout
        } else {
            BackendError::Http(err)
        }
    }
}
