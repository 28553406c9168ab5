//! Mock transport for testing.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::transport::{Method, Transport, TransportError, TransportRequest, TransportResponse};

/// A recorded request for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// The request that was sent.
    pub request: TransportRequest,
    /// When the request was sent.
    pub timestamp: chrono::DateTime<Utc>,
}

type Route = (Method, String);

/// Mock implementation of the Transport trait.
///
/// Provides controllable behavior for testing:
/// - Sticky responses per route, plus one-shot responses that take priority
/// - Recorded requests for call-count assertions
/// - Simulated transport failures
///
/// Unrouted requests get a 404, like the backend's router.
///
/// # Example
///
/// ```rust,ignore
/// let transport = MockTransport::new();
/// transport
///     .respond_json(Method::Get, "/v1/jobs/get_all", 200, json!({"jobs": []}))
///     .await;
///
/// let client = TrackerClient::new(Arc::new(transport.clone()));
/// client.get_all_jobs().await?;
///
/// assert_eq!(transport.request_count(Method::Get, "/v1/jobs/get_all").await, 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockTransport {
    base_url: String,
    /// Responses returned on every matching request.
    sticky: Arc<RwLock<HashMap<Route, TransportResponse>>>,
    /// Responses consumed in order before falling back to `sticky`.
    queued: Arc<RwLock<HashMap<Route, VecDeque<TransportResponse>>>>,
    /// Recorded requests.
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
    /// If set, the next request will fail with this error.
    next_error: Arc<RwLock<Option<TransportError>>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Create a mock transport with no routes.
    pub fn new() -> Self {
        Self {
            base_url: "http://mock-backend:8080".to_string(),
            sticky: Arc::new(RwLock::new(HashMap::new())),
            queued: Arc::new(RwLock::new(HashMap::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Answer every request to a route with this status and body.
    pub async fn respond(&self, method: Method, path: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.sticky
            .write()
            .await
            .insert((method, path.to_string()), TransportResponse::new(status, body));
    }

    /// Answer every request to a route with a JSON body.
    pub async fn respond_json(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.respond(method, path, status, body.to_string()).await;
    }

    /// Answer the next request to a route with this response only.
    pub async fn respond_once(&self, method: Method, path: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.queued
            .write()
            .await
            .entry((method, path.to_string()))
            .or_default()
            .push_back(TransportResponse::new(status, body));
    }

    /// Make the next request fail before reaching the backend.
    pub async fn fail_next(&self, error: TransportError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get all recorded requests.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    /// Number of requests sent to a route.
    pub async fn request_count(&self, method: Method, path: &str) -> usize {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.request.method == method && r.request.path == path)
            .count()
    }

    /// Total number of requests sent.
    pub async fn total_requests(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Clear recorded requests.
    pub async fn clear_recorded(&self) {
        self.requests.write().await.clear();
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.write().await.push(RecordedRequest {
            request: request.clone(),
            timestamp: Utc::now(),
        });

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        let route = (request.method, request.path);
        if let Some(response) = self
            .queued
            .write()
            .await
            .get_mut(&route)
            .and_then(|queue| queue.pop_front())
        {
            return Ok(response);
        }

        Ok(self
            .sticky
            .read()
            .await
            .get(&route)
            .cloned()
            .unwrap_or_else(|| TransportResponse::new(404, "404 page not found")))
    }
}
