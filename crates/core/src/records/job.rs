//! Backend job records.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::dates::{null_as_default, parse_job_timestamp};

/// Lifecycle state of a backend job.
///
/// `Starting → Executing → {Completed | Failed}`. States the client does not
/// know are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobState {
    NotStarted,
    Starting,
    Executing,
    Completed,
    Failed,
    Other(String),
}

impl JobState {
    pub fn as_str(&self) -> &str {
        match self {
            JobState::NotStarted => "Not started",
            JobState::Starting => "Starting",
            JobState::Executing => "Executing",
            JobState::Completed => "Completed",
            JobState::Failed => "Failed",
            JobState::Other(raw) => raw,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, JobState::Starting | JobState::Executing)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }
}

impl From<String> for JobState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Not started" => JobState::NotStarted,
            "Starting" => JobState::Starting,
            "Executing" => JobState::Executing,
            "Completed" => JobState::Completed,
            "Failed" => JobState::Failed,
            _ => JobState::Other(raw),
        }
    }
}

impl From<JobState> for String {
    fn from(state: JobState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend job. Jobs are read-only from the client's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Job {
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub task: String,
    pub state: JobState,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    /// Creation time as the backend sent it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    /// Completion or failure time, empty while the job runs.
    #[serde(
        rename = "Completed_Failed_At",
        default,
        deserialize_with = "null_as_default"
    )]
    pub completed_or_failed_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    /// Parsed creation time; `None` when blank or not in the job timestamp layout.
    pub fn created_time(&self) -> Option<NaiveDateTime> {
        parse_job_timestamp(&self.created_at).ok().flatten()
    }

    /// Parsed completion or failure time.
    pub fn finished_time(&self) -> Option<NaiveDateTime> {
        parse_job_timestamp(&self.completed_or_failed_at).ok().flatten()
    }
}
