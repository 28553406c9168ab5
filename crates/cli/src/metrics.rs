//! Prometheus registry for the CLI.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use prometheus::{Encoder, Registry, TextEncoder};
use tracing::warn;

/// Registry holding every core metric.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    for metric in dashboard_core::metrics::all_metrics() {
        if let Err(e) = registry.register(metric) {
            warn!("Failed to register metric: {}", e);
        }
    }
    registry
});

/// Encode all metrics in the Prometheus text format.
pub fn encode_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&REGISTRY.gather(), &mut buffer)
        .context("failed to encode metrics")?;
    String::from_utf8(buffer).context("metrics are not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_includes_core_metrics() {
        dashboard_core::metrics::POLL_CYCLES
            .with_label_values(&["ok"])
            .inc();
        let text = encode_metrics().unwrap();
        assert!(text.contains("dashboard_job_poll_cycles_total"));
    }
}
