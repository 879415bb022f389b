//! Metrics collection and exposition.
//!
//! # Metrics
//! - `posture_check_pass` (gauge): 1=pass, 0=fail, labelled by check id
//! - `posture_fetch_total` (counter): API calls by endpoint and outcome
//! - `posture_fetch_duration_seconds` (histogram): API call latency
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::api::Envelope;
use crate::posture::CheckId;

/// Install the Prometheus exporter, serving `/metrics` on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_check(check: CheckId, pass: bool) {
    gauge!("posture_check_pass", "check" => check.as_str()).set(if pass { 1.0 } else { 0.0 });
}

pub fn record_fetch(endpoint: &str, envelope: &Envelope, start: Instant) {
    let outcome = fetch_outcome(envelope);
    counter!(
        "posture_fetch_total",
        "endpoint" => endpoint.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!("posture_fetch_duration_seconds", "endpoint" => endpoint.to_string())
        .record(start.elapsed().as_secs_f64());
}

fn fetch_outcome(envelope: &Envelope) -> &'static str {
    match (envelope.ok, envelope.status) {
        (true, _) => "success",
        (false, 0) => "unreachable",
        (false, _) => "error_status",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_outcome() {
        assert_eq!(fetch_outcome(&Envelope::from_response(200, b"{}")), "success");
        assert_eq!(fetch_outcome(&Envelope::from_response(503, b"")), "error_status");
        assert_eq!(fetch_outcome(&Envelope::unreachable("refused")), "unreachable");
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_check(CheckId::NonRoot, false);
        record_fetch("/health", &Envelope::unreachable("x"), Instant::now());
    }
}
