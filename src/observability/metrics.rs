//! Metrics collection and exposition.
//!
//! # Metrics
//! - `urlshort_redirects_total` (counter): requests answered with a redirect
//! - `urlshort_fallbacks_total` (counter): requests passed to the fallback
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; calls are no-ops until a
//!   recorder is installed
//! - Prometheus exporter is opt-in via `observability.metrics_enabled`

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REDIRECTS_TOTAL: &str = "urlshort_redirects_total";
pub const FALLBACKS_TOTAL: &str = "urlshort_fallbacks_total";

/// Install the Prometheus recorder and its HTTP scrape listener.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    metrics::describe_counter!(REDIRECTS_TOTAL, "Requests answered with a permanent redirect");
    metrics::describe_counter!(
        FALLBACKS_TOTAL,
        "Requests with no redirect, passed to the fallback"
    );

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_redirect() {
    metrics::counter!(REDIRECTS_TOTAL).increment(1);
}

pub fn record_fallback() {
    metrics::counter!(FALLBACKS_TOTAL).increment(1);
}
