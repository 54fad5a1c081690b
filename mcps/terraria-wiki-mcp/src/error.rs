//! Error types for wiki search operations

use thiserror::Error;

/// Errors that can occur while talking to the wiki or managing a session
#[derive(Error, Debug)]
pub enum WikiError {
    /// DNS, connection, TLS or body read failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The wiki answered with a non-success status code
    #[error("wiki returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// First part of the response body
        body: String,
    },

    /// The response body was empty, `null`, or not the expected JSON shape
    #[error("failed to decode wiki response: {0}")]
    Decode(String),

    /// A configured URL could not be parsed
    #[error("invalid wiki URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// `search` was called after `close`
    #[error("session is closed")]
    SessionClosed,
}

impl WikiError {
    /// Whether this error means the wiki could not be reached at all.
    ///
    /// Everything else (bad status, bad body) is reported to the user as
    /// "no results".
    pub fn is_transport(&self) -> bool {
        matches!(self, WikiError::Network(_))
    }
}

/// Result type alias for wiki operations
pub type WikiResult<T> = Result<T, WikiError>;
