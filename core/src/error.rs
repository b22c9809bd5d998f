//! Error types for the Megaphone client.
//!
//! # Design
//! `MissingRequiredParameter` is the only error raised locally, and it is
//! always returned before a request reaches the transport. Every other
//! variant describes what the connection saw on the wire. `NotFound` and
//! `Unauthorized` get dedicated variants because callers frequently branch on
//! them; all remaining non-2xx responses land in `HttpError` with the raw
//! status code and body.

use thiserror::Error;

/// Shorthand for results produced by this crate.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by resources, the connection and transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required identifier or body field was absent. No request was sent.
    #[error("missing required parameter: {field}")]
    MissingRequiredParameter { field: &'static str },

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server rejected the token (401 or 403).
    #[error("unauthorized (HTTP {status}): {body}")]
    Unauthorized { status: u16, body: String },

    /// The server returned a non-2xx status other than 401, 403 or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// A required configuration value was missing.
    #[error("missing configuration value: {0}")]
    Config(&'static str),
}

impl ApiError {
    /// True for errors raised by local validation rather than by the server.
    pub fn is_missing_parameter(&self) -> bool {
        matches!(self, ApiError::MissingRequiredParameter { .. })
    }
}
