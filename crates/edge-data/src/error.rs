//! Fetch error types.

use thiserror::Error;

/// Errors that can occur when fetching from an upstream API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The base URL or path could not form a valid request URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request never produced a response (DNS, connect, outbound host denied).
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// Upstream answered with a non-2xx status.
    #[error("HTTP {status} for {url}: {message}")]
    Http {
        status: u16,
        url: String,
        message: String,
    },

    /// Upstream declared a body that is not JSON.
    #[error("Expected JSON from {url}, got {content_type}")]
    UnexpectedContentType { url: String, content_type: String },

    /// The body was not the JSON shape the caller asked for.
    #[error("Failed to decode response from {url}: {source}")]
    Deserialization {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// HTTP status carried by the error, if upstream answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
