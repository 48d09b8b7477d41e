//! Error types for the translator client

use thiserror::Error;

/// Result type alias for translator operations
pub type Result<T> = std::result::Result<T, TranslatorError>;

/// Errors that can occur when calling the external translator
#[derive(Error, Debug)]
pub enum TranslatorError {
    /// Transport-level failure
    #[error("transport error: {0}")]
    Http(reqwest::Error),

    /// The bounded-duration call exceeded its deadline
    #[error("translator request timed out")]
    Timeout,

    /// Provider rejected the request
    #[error("translator returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The provider answered but produced no choices
    #[error("translator returned an empty response")]
    EmptyResponse,

    /// URL construction failed
    #[error("invalid translator URL: {0}")]
    Url(#[from] url::ParseError),

    /// Client misconfiguration
    #[error("translator configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for TranslatorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TranslatorError::Timeout
        } else {
            TranslatorError::Http(err)
        }
    }
}
