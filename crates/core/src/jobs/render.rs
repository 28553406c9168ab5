//! Snapshot rendering of the job list.

use std::fmt;

use crate::records::{Job, JobState};

/// Display class of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Pending,
    Running,
    Complete,
    Error,
}

impl JobStatus {
    pub fn from_state(state: &JobState) -> Self {
        match state {
            JobState::Starting | JobState::Executing => JobStatus::Running,
            JobState::Completed => JobStatus::Complete,
            JobState::Failed => JobStatus::Error,
            JobState::NotStarted | JobState::Other(_) => JobStatus::Pending,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            JobStatus::Pending => "⏸",
            JobStatus::Running => "⏳",
            JobStatus::Complete => "✅",
            JobStatus::Error => "❌",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Complete => "complete",
            JobStatus::Error => "error",
        }
    }
}

/// How a message line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

/// One job, ready to display.
#[derive(Debug, Clone, PartialEq)]
pub struct JobView {
    pub task: String,
    pub state: JobState,
    pub status: JobStatus,
    /// Running jobs are shown with their details open.
    pub expanded: bool,
    pub description: Option<(Tone, String)>,
    /// Job value, omitted when empty.
    pub value: Option<String>,
    /// Timestamps exactly as the backend reported them.
    pub created_at: Option<String>,
    pub finished_at: Option<String>,
}

impl JobView {
    pub fn from_job(job: &Job) -> Self {
        let status = JobStatus::from_state(&job.state);
        let tone = match status {
            JobStatus::Running => Some(Tone::Info),
            JobStatus::Complete => Some(Tone::Success),
            JobStatus::Error => Some(Tone::Error),
            JobStatus::Pending => None,
        };

        Self {
            task: job.task.clone(),
            state: job.state.clone(),
            status,
            expanded: status == JobStatus::Running,
            description: tone.map(|tone| (tone, job.state_description.clone())),
            value: non_empty(&job.value),
            created_at: non_empty(&job.created_at),
            finished_at: non_empty(&job.completed_or_failed_at),
        }
    }

    /// "`<State> at`" line for finished jobs.
    pub fn finished_line(&self) -> Option<String> {
        self.finished_at
            .as_ref()
            .map(|at| format!("{} at: {}", self.state, at))
    }
}

impl fmt::Display for JobView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} [{}]", self.status.glyph(), self.task, self.status.as_str())?;
        if let Some((_, description)) = &self.description {
            writeln!(f, "    {}", description)?;
        }
        if let Some(value) = &self.value {
            writeln!(f, "    {}", value)?;
        }
        match &self.created_at {
            Some(at) => writeln!(f, "    Created at: {}", at)?,
            None => writeln!(f, "    Created at: unknown")?,
        }
        if let Some(line) = self.finished_line() {
            writeln!(f, "    {}", line)?;
        }
        Ok(())
    }
}

fn non_empty(raw: &str) -> Option<String> {
    Some(raw.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Render jobs most recent first.
///
/// The backend lists jobs oldest first; the view reverses them.
pub fn render_jobs(jobs: &[Job]) -> Vec<JobView> {
    jobs.iter().rev().map(JobView::from_job).collect()
}
