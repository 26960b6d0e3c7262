// =============================================================================
// METRICS MODULE
// =============================================================================
// This module sets up Prometheus metrics for observability.
//
// LEARNING NOTES:
// - Prometheus uses a "pull" model - it scrapes the /metrics endpoint
// - Counters only go up, gauges go up and down, histograms bucket values
// - Labels add dimensions to metrics (e.g., endpoint="/api/v1/materials")
//
// When no recorder is installed (unit tests), the metrics macros are no-ops,
// so the API layer can record unconditionally.
// =============================================================================

use anyhow::Result;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

use crate::models::MovementType;

// =============================================================================
// METRIC NAMES
// =============================================================================

/// HTTP request counter
/// Labels: method, endpoint, status
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";

/// HTTP request duration histogram (includes the simulated delay)
/// Labels: method, endpoint
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

/// Current stock of a material line
/// Labels: material_id, location
pub const MATERIAL_STOCK_LEVEL: &str = "material_stock_level";

/// Number of materials at or below their minimum stock
pub const LOW_STOCK_MATERIALS: &str = "low_stock_materials";

/// Number of unread notifications
pub const UNREAD_NOTIFICATIONS: &str = "unread_notifications";

/// Stock movements appended to material ledgers
/// Labels: material_id, type (in/out)
pub const STOCK_MOVEMENTS_TOTAL: &str = "stock_movements_total";

// =============================================================================
// SETUP FUNCTION
// =============================================================================
/// Install the global Prometheus recorder and return the handle that
/// renders the exposition text.
pub fn setup_metrics() -> Result<PrometheusHandle> {
    // The simulated delays sit between 100ms and 2s, so the buckets are
    // denser there than for a typical API.
    let latency_buckets = &[
        0.005, // 5ms
        0.01,  // 10ms
        0.05,  // 50ms
        0.1,   // 100ms (light calls)
        0.25,  // 250ms
        0.5,   // 500ms (standard calls)
        0.75,  // 750ms
        1.0,   // 1 second
        2.0,   // 2 seconds (report generation)
        2.5,   // 2.5 seconds
        5.0,   // 5 seconds
    ];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(HTTP_REQUEST_DURATION_SECONDS.to_string()),
            latency_buckets,
        )?
        .install_recorder()?;

    describe_counter!(HTTP_REQUESTS_TOTAL, "Total number of HTTP requests received");
    describe_histogram!(HTTP_REQUEST_DURATION_SECONDS, "HTTP request latency in seconds");
    describe_gauge!(MATERIAL_STOCK_LEVEL, "Current stock level for each material");
    describe_gauge!(
        LOW_STOCK_MATERIALS,
        "Number of materials at or below their minimum stock"
    );
    describe_gauge!(UNREAD_NOTIFICATIONS, "Number of unread notifications");
    describe_counter!(
        STOCK_MOVEMENTS_TOTAL,
        "Total number of stock movements recorded"
    );

    Ok(handle)
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Record an HTTP request
///
/// # Arguments
/// * `method` - HTTP method (GET, POST, etc.)
/// * `endpoint` - Route pattern (/api/v1/materials/:id)
/// * `status` - Response status code (200, 404)
/// * `duration_secs` - Request duration in seconds
pub fn record_http_request(method: &str, endpoint: &str, status: u16, duration_secs: f64) {
    counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        HTTP_REQUEST_DURATION_SECONDS,
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string()
    )
    .record(duration_secs);
}

pub fn set_stock_level(material_id: &str, location: &str, level: i64) {
    gauge!(
        MATERIAL_STOCK_LEVEL,
        "material_id" => material_id.to_string(),
        "location" => location.to_string()
    )
    .set(level as f64);
}

pub fn record_stock_movement(material_id: &str, kind: MovementType) {
    let kind = match kind {
        MovementType::In => "in",
        MovementType::Out => "out",
        MovementType::Transfer => "transfer",
        MovementType::Adjustment => "adjustment",
    };
    counter!(
        STOCK_MOVEMENTS_TOTAL,
        "material_id" => material_id.to_string(),
        "type" => kind
    )
    .increment(1);
}

pub fn set_low_stock_count(count: usize) {
    gauge!(LOW_STOCK_MATERIALS).set(count as f64);
}

pub fn set_unread_count(count: usize) {
    gauge!(UNREAD_NOTIFICATIONS).set(count as f64);
}
