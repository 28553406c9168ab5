//! Backend jobs: fetching, rendering and the status poller.

mod poller;
mod render;

pub use poller::{JobPoller, JobStatusSink};
pub use render::{render_jobs, JobStatus, JobView, Tone};

use crate::endpoint::{take_field, Endpoint};
use crate::error::ClientError;
use crate::records::Job;
use crate::transport::Transport;

/// Fetch every job, oldest first as the backend lists them.
pub(crate) async fn fetch_jobs(transport: &dyn Transport) -> Result<Vec<Job>, ClientError> {
    let endpoint = Endpoint::all_jobs();
    let response = endpoint.call(transport, None).await?;
    let body: serde_json::Value = endpoint.decode(transport, &response)?;

    match take_field(body, "jobs") {
        Some(jobs) => serde_json::from_value(jobs).map_err(|e| ClientError::Decode {
            url: transport.url_for(&endpoint.path),
            message: e.to_string(),
        }),
        None => Ok(Vec::new()),
    }
}

pub(crate) async fn delete_all_jobs(transport: &dyn Transport) -> Result<(), ClientError> {
    Endpoint::delete_all_jobs().call(transport, None).await?;
    Ok(())
}
