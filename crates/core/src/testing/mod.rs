//! Testing utilities and mock implementations.
//!
//! This module provides a mock transport and backend-shaped JSON fixtures,
//! allowing the cache, poller and client to be exercised without a backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use dashboard_core::testing::{fixtures, MockTransport};
//!
//! let transport = MockTransport::new();
//! transport
//!     .respond_json(Method::Get, "/v1/trackers/games_tracker/get_all_games", 200,
//!         fixtures::games_body(vec![fixtures::game_json("Hades", 3)]))
//!     .await;
//! ```

mod mock_transport;

pub use mock_transport::{MockTransport, RecordedRequest};

use std::sync::Mutex;

use crate::error::ClientError;
use crate::jobs::{JobStatusSink, JobView};

/// Sink that keeps every rendered snapshot, for poller assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    snapshots: Mutex<Vec<Vec<JobView>>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All snapshots rendered so far.
    pub fn snapshots(&self) -> Vec<Vec<JobView>> {
        self.snapshots.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Most recent snapshot, if any.
    pub fn last(&self) -> Option<Vec<JobView>> {
        self.snapshots().pop()
    }

    /// Error messages reported by failed cycles.
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl JobStatusSink for RecordingSink {
    fn render(&self, jobs: &[JobView]) {
        if let Ok(mut snapshots) = self.snapshots.lock() {
            snapshots.push(jobs.to_vec());
        }
    }

    fn render_error(&self, error: &ClientError) {
        if let Ok(mut errors) = self.errors.lock() {
            errors.push(error.to_string());
        }
    }
}

/// Backend-shaped JSON fixtures.
pub mod fixtures {
    use serde_json::{json, Value};

    /// A game record as the backend returns it.
    pub fn game_json(name: &str, status: i64) -> Value {
        json!({
            "Name": name,
            "URL": format!("https://store.example.com/{}", name.to_lowercase().replace(' ', "-")),
            "CoverImg": null,
            "ReleaseDate": "2020-09-17T00:00:00Z",
            "Tags": ["Indie"],
            "Developers": ["Studio"],
            "Publishers": ["Publisher"],
            "Priority": 2,
            "Status": status,
            "Stars": 0,
            "PurchasedOrGamePass": false,
            "StartedDate": "0001-01-01T00:00:00Z",
            "FinishedDroppedDate": "0001-01-01T00:00:00Z",
            "Commentary": ""
        })
    }

    /// A media record as the backend returns it.
    pub fn media_json(name: &str, status: &str) -> Value {
        json!({
            "Name": name,
            "URL": format!("https://www.example.com/title/{}", name.to_lowercase().replace(' ', "-")),
            "MediaType": "1",
            "CoverImg": null,
            "ReleaseDate": "2019-01-01T00:00:00Z",
            "Genres": ["Drama"],
            "Staff": [],
            "Priority": "2",
            "Status": status,
            "Stars": 0,
            "StartedDate": "0001-01-01T00:00:00Z",
            "FinishedDroppedDate": "0001-01-01T00:00:00Z",
            "Commentary": ""
        })
    }

    /// A job record as the backend returns it.
    pub fn job_json(task: &str, state: &str) -> Value {
        let finished = matches!(state, "Completed" | "Failed");
        json!({
            "Task": task,
            "State": state,
            "StateDescription": format!("{} is {}", task, state.to_lowercase()),
            "Value": "",
            "CreatedAt": "2024-03-01 10:00:00",
            "Completed_Failed_At": if finished { "2024-03-01 10:00:30" } else { "" }
        })
    }

    pub fn games_body(games: Vec<Value>) -> Value {
        json!({ "games": games })
    }

    pub fn medias_body(medias: Vec<Value>) -> Value {
        json!({ "medias": medias })
    }

    pub fn jobs_body(jobs: Vec<Value>) -> Value {
        json!({ "jobs": jobs })
    }
}
