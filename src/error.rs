//! Error types for the Hetzner Cloud client.

use thiserror::Error;

/// Errors returned by the library.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (connection, DNS, TLS, reading the body).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not JSON, or did not fit the typed record.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with a structured error body.
    #[error("API error ({code}): {message}")]
    Api { code: String, message: String },

    /// A response lacked the top-level key the endpoint documents.
    #[error("Response is missing the '{0}' key")]
    MissingKey(String),

    /// The resource was deleted through this handle and can no longer be used.
    #[error("{0}")]
    AlreadyDeleted(String),

    /// The configured base URL could not be parsed.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns true for errors raised by using a resource after deleting it.
    pub fn is_already_deleted(&self) -> bool {
        matches!(self, Error::AlreadyDeleted(_))
    }
}
