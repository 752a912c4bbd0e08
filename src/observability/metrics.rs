//! Metrics collection and exposition.
//!
//! # Metrics
//! - `routes_requests_total` (counter): requests by method, path, status
//! - `routes_request_duration_seconds` (histogram): time to response head
//! - `routes_stream_items_total` (counter): numeric stream items emitted
//! - `routes_streams_cancelled_total` (counter): streams dropped early
//! - `routes_active_streams` (gauge): numeric streams currently open
//!
//! # Design Decisions
//! - Facade calls are no-ops until `init_metrics` installs a recorder
//! - Unmatched paths are recorded under a single label to bound cardinality

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Path label used for requests that matched no route.
pub const UNMATCHED_PATH: &str = "unmatched";

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    counter!(
        "routes_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "routes_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_stream_started() {
    gauge!("routes_active_streams").increment(1.0);
}

pub fn record_stream_item() {
    counter!("routes_stream_items_total").increment(1);
}

pub fn record_stream_finished(cancelled: bool) {
    gauge!("routes_active_streams").decrement(1.0);
    if cancelled {
        counter!("routes_streams_cancelled_total").increment(1);
    }
}
