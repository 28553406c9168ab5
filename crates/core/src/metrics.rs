//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Backend requests (counts by outcome, latency)
//! - Collection cache (hits, misses, invalidations)
//! - Job poller cycles

use std::time::Instant;

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

use crate::transport::Method;

// =============================================================================
// Backend Metrics
// =============================================================================

/// Backend requests total by method and outcome (HTTP status or "transport_error").
pub static BACKEND_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("dashboard_backend_requests_total", "Total backend requests"),
        &["method", "outcome"],
    )
    .unwrap()
});

/// Backend request duration in seconds.
pub static BACKEND_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "dashboard_backend_request_duration_seconds",
            "Backend request duration in seconds",
        )
        .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["method"],
    )
    .unwrap()
});

// =============================================================================
// Cache Metrics
// =============================================================================

/// Collection lookups by resource and result ("hit" / "miss").
pub static CACHE_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("dashboard_cache_lookups_total", "Total collection cache lookups"),
        &["resource", "result"],
    )
    .unwrap()
});

/// Resource-wide invalidations.
pub static CACHE_INVALIDATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "dashboard_cache_invalidations_total",
            "Total resource-wide cache invalidations",
        ),
        &["resource"],
    )
    .unwrap()
});

// =============================================================================
// Poller Metrics
// =============================================================================

/// Job poll cycles by result ("ok" / "error").
pub static POLL_CYCLES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("dashboard_job_poll_cycles_total", "Total job poll cycles"),
        &["result"],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Record a finished backend request.
pub fn record_backend_request(method: Method, outcome: &str, started: Instant) {
    BACKEND_REQUESTS
        .with_label_values(&[method.as_str(), outcome])
        .inc();
    BACKEND_REQUEST_DURATION
        .with_label_values(&[method.as_str()])
        .observe(started.elapsed().as_secs_f64());
}

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(BACKEND_REQUESTS.clone()),
        Box::new(BACKEND_REQUEST_DURATION.clone()),
        Box::new(CACHE_LOOKUPS.clone()),
        Box::new(CACHE_INVALIDATIONS.clone()),
        Box::new(POLL_CYCLES.clone()),
    ]
}
