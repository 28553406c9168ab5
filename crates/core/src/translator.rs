//! Classification of backend responses.
//!
//! This is the only place that decides whether an HTTP status is an error.
//! Each endpoint carries its own set of acceptable status codes.

use thiserror::Error;

use crate::transport::{Method, TransportResponse};

/// Set of HTTP status codes an endpoint treats as non-error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptableStatus(&'static [u16]);

impl AcceptableStatus {
    /// Plain endpoints: jobs, system, health, notion.
    pub const OK_ONLY: AcceptableStatus = AcceptableStatus(&[200]);

    /// Tracker endpoints. The backend reports business-validation failures
    /// (duplicate game, bad date...) as 400, which the client accepts as a
    /// completed call rather than raising.
    pub const TRACKER: AcceptableStatus = AcceptableStatus(&[200, 400]);

    pub const fn new(codes: &'static [u16]) -> Self {
        Self(codes)
    }

    pub fn contains(&self, status: u16) -> bool {
        self.0.contains(&status)
    }

    pub fn codes(&self) -> &'static [u16] {
        self.0
    }
}

/// Where a response came from, for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    /// Human description of the failed action.
    pub message: String,
    pub url: String,
    pub method: Method,
}

impl RequestInfo {
    pub fn new(message: impl Into<String>, url: impl Into<String>, method: Method) -> Self {
        Self {
            message: message.into(),
            url: url.into(),
            method,
        }
    }
}

/// A response whose status is outside the endpoint's acceptable set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}: {method} {url} returned {status}: {body}")]
pub struct ApiError {
    pub message: String,
    pub url: String,
    pub method: Method,
    pub status: u16,
    pub body: String,
}

/// Map a transport response to the payload or an `ApiError`.
pub fn translate(
    response: TransportResponse,
    acceptable: AcceptableStatus,
    request: &RequestInfo,
) -> Result<TransportResponse, ApiError> {
    if acceptable.contains(response.status) {
        return Ok(response);
    }

    Err(ApiError {
        message: request.message.clone(),
        url: request.url.clone(),
        method: request.method,
        status: response.status,
        body: response.text(),
    })
}
