//! HTTP transport abstraction.
//!
//! A `Transport` sends one request to the backend and hands back the raw
//! status and body. It never interprets status codes; classifying a
//! response is the translator's job.

mod http_client;
mod types;

pub use http_client::HttpTransport;
pub use types::*;

use async_trait::async_trait;

/// Sends requests to the backend API.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Base URL every request path is joined to.
    fn base_url(&self) -> &str;

    /// Perform one request. Any HTTP status is a successful send.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;

    /// Absolute URL for a path, as used in error reports.
    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url().trim_end_matches('/'), path)
    }
}
