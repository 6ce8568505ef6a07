//! Error types for the Quobyte API client

use thiserror::Error;

/// Quobyte API client error
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request params could not be serialized
    #[error("failed to encode request: {0}")]
    Encoding(#[source] serde_json::Error),

    /// Response violated the JSON-RPC protocol (malformed envelope, or
    /// neither result nor error populated)
    #[error("protocol violation: {0}")]
    Protocol(String),

    /// The server reported a JSON-RPC application error
    #[error("method: {method} error message: {message}")]
    Remote {
        /// Method the failing request was dispatched to
        method: String,
        /// Server-supplied message, or the symbolic name of a well-known
        /// error code when the message was empty
        message: String,
    },

    /// Credentials were rejected by the API service
    #[error("unable to authenticate with the Quobyte API service")]
    Authentication,

    /// Non-2xx, non-401 HTTP outcome
    #[error("JsonRPC failed with error (error code: {status}) {body}")]
    Transport {
        /// HTTP status code
        status: u16,
        /// Response body, kept verbatim for diagnostics
        body: String,
    },

    /// Network-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured API endpoint is not a valid URL
    #[error("invalid API endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

/// Result type for Quobyte API operations
pub type Result<T> = std::result::Result<T, ApiError>;
