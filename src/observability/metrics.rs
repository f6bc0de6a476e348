//! Metrics collection and exposition.
//!
//! # Metrics
//! - `requestlog_captured_total` (counter): requests turned into archive records
//! - `requestlog_capture_errors_total` (counter): non-fatal capture failures by stage
//! - `requestlog_persisted_total` (counter): rows written
//! - `requestlog_persist_failures_total` (counter): writes that failed
//! - `requestlog_persist_duration_seconds` (histogram): insert latency by outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Capture stage that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStage {
    Body,
    Serialize,
}

impl CaptureStage {
    pub fn as_str(self) -> &'static str {
        match self {
            CaptureStage::Body => "body",
            CaptureStage::Serialize => "serialize",
        }
    }
}

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_capture() {
    counter!("requestlog_captured_total").increment(1);
}

pub fn record_capture_error(stage: CaptureStage) {
    counter!("requestlog_capture_errors_total", "stage" => stage.as_str()).increment(1);
}

pub fn record_persisted(start: Instant) {
    counter!("requestlog_persisted_total").increment(1);
    histogram!("requestlog_persist_duration_seconds", "outcome" => "ok")
        .record(start.elapsed().as_secs_f64());
}

pub fn record_persist_failure(start: Instant) {
    counter!("requestlog_persist_failures_total").increment(1);
    histogram!("requestlog_persist_duration_seconds", "outcome" => "error")
        .record(start.elapsed().as_secs_f64());
}
