//! Background job-status poller.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::metrics;
use crate::transport::Transport;

use super::render::{render_jobs, JobView};

/// Receives each rendered snapshot of the job list.
pub trait JobStatusSink: Send + Sync {
    /// Publish a full snapshot, most recent job first. May be empty.
    fn render(&self, jobs: &[JobView]);

    /// Report a failed poll cycle. Polling continues afterwards.
    fn render_error(&self, _error: &ClientError) {}
}

struct Running {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Repeatedly fetches the job list and renders it to a sink.
///
/// Each cycle re-renders the whole list from scratch. The loop only ends
/// through its cancellation token, either via `stop()` or the token passed
/// to `run()`.
pub struct JobPoller {
    transport: Arc<dyn Transport>,
    sink: Arc<dyn JobStatusSink>,
    running: Mutex<Option<Running>>,
}

impl JobPoller {
    pub fn new(transport: Arc<dyn Transport>, sink: Arc<dyn JobStatusSink>) -> Self {
        Self {
            transport,
            sink,
            running: Mutex::new(None),
        }
    }

    /// Spawn the polling loop. Does nothing if already running.
    pub async fn start(&self, interval: Duration) {
        let mut running = self.running.lock().await;
        if running.as_ref().is_some_and(|r| !r.handle.is_finished()) {
            warn!("Job poller already running");
            return;
        }

        info!("Starting job poller (interval: {:?})", interval);
        let cancel = CancellationToken::new();
        let poller = PollLoop {
            transport: Arc::clone(&self.transport),
            sink: Arc::clone(&self.sink),
        };
        let token = cancel.clone();
        let handle = tokio::spawn(async move { poller.run(interval, token).await });
        *running = Some(Running { cancel, handle });
    }

    /// Cancel the loop and wait for it to exit. No-op when not running.
    pub async fn stop(&self) {
        let Some(running) = self.running.lock().await.take() else {
            debug!("Job poller not running");
            return;
        };

        running.cancel.cancel();
        if let Err(e) = running.handle.await {
            warn!("Job poller task ended abnormally: {}", e);
        }
        info!("Job poller stopped");
    }

    pub async fn is_running(&self) -> bool {
        self.running
            .lock()
            .await
            .as_ref()
            .is_some_and(|r| !r.handle.is_finished())
    }

    /// Run the loop in place until `cancel` fires.
    pub async fn run(&self, interval: Duration, cancel: CancellationToken) {
        PollLoop {
            transport: Arc::clone(&self.transport),
            sink: Arc::clone(&self.sink),
        }
        .run(interval, cancel)
        .await
    }

    /// Fetch and render once, returning the published snapshot.
    pub async fn poll_once(&self) -> Result<Vec<JobView>, ClientError> {
        PollLoop {
            transport: Arc::clone(&self.transport),
            sink: Arc::clone(&self.sink),
        }
        .cycle()
        .await
    }

    /// Ask the backend to delete every job.
    ///
    /// The next cycle shows the empty list; nothing is patched locally.
    pub async fn delete_all(&self) -> Result<(), ClientError> {
        super::delete_all_jobs(self.transport.as_ref()).await
    }
}

struct PollLoop {
    transport: Arc<dyn Transport>,
    sink: Arc<dyn JobStatusSink>,
}

impl PollLoop {
    async fn run(&self, interval: Duration, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Job poller received cancellation");
                    break;
                }
                result = self.cycle() => {
                    if let Err(e) = result {
                        warn!("Job poll failed: {}", e);
                        self.sink.render_error(&e);
                    }
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Job poller received cancellation");
                    break;
                }
                _ = tokio::time::sleep(interval) => {}
            }
        }
    }

    async fn cycle(&self) -> Result<Vec<JobView>, ClientError> {
        let jobs = match super::fetch_jobs(self.transport.as_ref()).await {
            Ok(jobs) => jobs,
            Err(e) => {
                metrics::POLL_CYCLES.with_label_values(&["error"]).inc();
                return Err(e);
            }
        };
        metrics::POLL_CYCLES.with_label_values(&["ok"]).inc();

        let views = render_jobs(&jobs);
        debug!("Rendering {} jobs", views.len());
        self.sink.render(&views);
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockTransport, RecordingSink};
    use crate::transport::{Method, TransportError};

    const GET_ALL: &str = "/v1/jobs/get_all";

    async fn setup() -> (MockTransport, Arc<RecordingSink>, JobPoller) {
        let transport = MockTransport::new();
        transport
            .respond_json(
                Method::Get,
                GET_ALL,
                200,
                fixtures::jobs_body(vec![
                    fixtures::job_json("A", "Completed"),
                    fixtures::job_json("B", "Executing"),
                ]),
            )
            .await;
        let sink = Arc::new(RecordingSink::new());
        let poller = JobPoller::new(Arc::new(transport.clone()), sink.clone());
        (transport, sink, poller)
    }

    #[tokio::test]
    async fn test_poll_once_renders_most_recent_first() {
        let (_, sink, poller) = setup().await;
        let views = poller.poll_once().await.unwrap();
        let tasks: Vec<&str> = views.iter().map(|v| v.task.as_str()).collect();
        assert_eq!(tasks, vec!["B", "A"]);
        assert_eq!(sink.snapshots().len(), 1);
    }

    #[tokio::test]
    async fn test_poll_once_keeps_job_with_unreadable_timestamp() {
        let (transport, sink, poller) = setup().await;
        let mut odd = fixtures::job_json("Odd", "Failed");
        odd["CreatedAt"] = serde_json::json!("01/03/2024 10:00");
        odd["Completed_Failed_At"] = serde_json::Value::Null;
        transport
            .respond_once(
                Method::Get,
                GET_ALL,
                200,
                fixtures::jobs_body(vec![fixtures::job_json("A", "Completed"), odd]).to_string(),
            )
            .await;

        let views = poller.poll_once().await.unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].task, "Odd");
        assert_eq!(views[0].created_at.as_deref(), Some("01/03/2024 10:00"));
        assert_eq!(views[0].finished_line(), None);
        assert_eq!(sink.snapshots().len(), 1);
    }

    #[tokio::test]
    async fn test_poll_once_rejects_non_200() {
        let (transport, sink, poller) = setup().await;
        transport.respond_once(Method::Get, GET_ALL, 400, "bad").await;
        let err = poller.poll_once().await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(sink.snapshots().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_polls_until_stopped() {
        let (transport, sink, poller) = setup().await;
        poller.start(Duration::from_secs(1)).await;
        assert!(poller.is_running().await);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        poller.stop().await;
        assert!(!poller.is_running().await);

        let polls = transport.request_count(Method::Get, GET_ALL).await;
        assert_eq!(polls, 3);
        assert_eq!(sink.snapshots().len(), 3);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(transport.request_count(Method::Get, GET_ALL).await, polls);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_is_noop() {
        let (transport, _, poller) = setup().await;
        poller.start(Duration::from_secs(1)).await;
        poller.start(Duration::from_secs(1)).await;
        tokio::time::sleep(Duration::from_millis(500)).await;
        poller.stop().await;
        assert_eq!(transport.request_count(Method::Get, GET_ALL).await, 1);
    }

    #[tokio::test]
    async fn test_stop_when_not_running() {
        let (_, _, poller) = setup().await;
        poller.stop().await;
        assert!(!poller.is_running().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_cycle_keeps_polling() {
        let (transport, sink, poller) = setup().await;
        transport.fail_next(TransportError::ConnectionFailed("refused".into())).await;

        let cancel = CancellationToken::new();
        let stopper = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            stopper.cancel();
        });
        poller.run(Duration::from_secs(1), cancel).await;

        assert_eq!(sink.errors().len(), 1);
        assert_eq!(sink.snapshots().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_all_then_empty_snapshot() {
        let (transport, sink, poller) = setup().await;
        transport.respond(Method::Delete, "/v1/jobs/delete_all", 200, "").await;
        transport
            .respond_json(Method::Get, GET_ALL, 200, fixtures::jobs_body(vec![]))
            .await;

        poller.delete_all().await.unwrap();
        poller.poll_once().await.unwrap();
        assert_eq!(sink.last(), Some(vec![]));
    }
}
