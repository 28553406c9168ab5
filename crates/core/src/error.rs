use thiserror::Error;

use crate::records::Resource;
use crate::translator::ApiError;
use crate::transport::TransportError;

/// Errors surfaced by client operations.
///
/// Nothing is retried; every failure reaches the caller once.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced an HTTP status (network, DNS, timeout).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The status was outside the endpoint's acceptable set.
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Failed to encode request body: {0}")]
    Encode(String),

    #[error("No {resource} named '{name}'")]
    NotFound { resource: Resource, name: String },
}

impl ClientError {
    /// HTTP status carried by an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api(e) => Some(e.status),
            _ => None,
        }
    }
}
