//! reqwest-backed transport.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::BackendConfig;
use crate::metrics;

use super::{Method, Transport, TransportError, TransportRequest, TransportResponse};

/// Transport talking to the backend over HTTP.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the configured backend.
    pub fn new(config: &BackendConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TransportError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    /// Create a transport for an explicit base URL (e.g., "http://127.0.0.1:8080").
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

fn map_send_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::ConnectionFailed(e.to_string())
    } else {
        TransportError::Request(e.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = self.url_for(&request.path);
        debug!("{} {}", request.method, url);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let started = Instant::now();
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_backend_request(request.method, "transport_error", started);
                return Err(map_send_error(e));
            }
        };

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::Body(e.to_string())
            }
        })?;

        metrics::record_backend_request(request.method, &status.to_string(), started);
        debug!("{} {} -> {} ({} bytes)", request.method, url, status, body.len());

        Ok(TransportResponse::new(status, body.to_vec()))
    }
}
