//! Metrics collection for slack-relay.
//!
//! The Prometheus recorder backs both the HTTP middleware metrics from
//! service-core and the relay outcome counter below.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_core::error::AppError;
use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Call once, at startup.
pub fn init_metrics() -> Result<(), AppError> {
    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        AppError::InternalError(anyhow::anyhow!(
            "failed to install Prometheus recorder: {}",
            e
        ))
    })?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| AppError::InternalError(anyhow::anyhow!("metrics already initialized")))
}

/// Metrics in Prometheus text format, if the recorder is installed.
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(|handle| handle.render())
}

/// Count one relay outcome: `sent`, `failed` or `rejected`.
pub fn record_relay(outcome: &'static str) {
    counter!("slack_relay_messages_total", "status" => outcome).increment(1);
}
